//! Formatter templates.
//!
//! AI-generated chart configs often carry label formatters as JavaScript
//! function literals (`"function() { return this.value + '%'; }"`). We never
//! execute those. A single `return` of one field reference, optionally
//! number/date formatted and wrapped in string literals, is recognised and
//! replaced by a `FormatterTemplate` the rendering layer resolves locally.
//! Anything else is left as the original string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static FUNCTION_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^function\s*\([^)]*\)\s*\{\s*return\s+(?P<expr>[^;{}]+?)\s*;?\s*\}$").expect("valid regex")
});

static TO_FIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<field>[\w.]+)\.toFixed\(\s*(?P<n>\d+)\s*\)$").expect("valid regex"));

static NUMBER_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Highcharts\.numberFormat\(\s*(?P<field>[\w.]+)\s*,\s*(?P<n>\d+)\s*(?:,[^)]*)?\)$")
        .expect("valid regex")
});

static DATE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^Highcharts\.dateFormat\(\s*(?:'(?P<sq>[^']*)'|"(?P<dq>[^"]*)")\s*,\s*(?P<field>[\w.]+)\s*\)$"#)
        .expect("valid regex")
});

/// The point/axis attribute a formatter renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterField {
    Value,
    X,
    Y,
    Percentage,
    Key,
    PointName,
    SeriesName,
}

impl FormatterField {
    fn parse(expr: &str) -> Option<FormatterField> {
        match expr.trim() {
            "this.value" => Some(FormatterField::Value),
            "this.x" => Some(FormatterField::X),
            "this.y" | "this.point.y" => Some(FormatterField::Y),
            "this.percentage" | "this.point.percentage" => Some(FormatterField::Percentage),
            "this.key" => Some(FormatterField::Key),
            "this.point.name" => Some(FormatterField::PointName),
            "this.series.name" => Some(FormatterField::SeriesName),
            _ => None,
        }
    }
}

/// How the field value is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Render {
    Plain,
    Fixed { decimals: u8 },
    Date { pattern: String },
}

/// A closed, locally-resolved replacement for a formatter callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterTemplate {
    pub field: FormatterField,
    pub render: Render,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
}

impl FormatterTemplate {
    /// Recognise a function literal. `None` when it falls outside the vocabulary.
    pub fn parse(source: &str) -> Option<FormatterTemplate> {
        let caps = FUNCTION_LITERAL.captures(source.trim())?;
        let terms = split_concat(&caps["expr"])?;

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut target: Option<(FormatterField, Render)> = None;

        for term in terms {
            match term {
                Term::Literal(text) if target.is_none() => prefix.push_str(&text),
                Term::Literal(text) => suffix.push_str(&text),
                // Only one field reference per template.
                Term::Expr(_) if target.is_some() => return None,
                Term::Expr(expr) => target = Some(parse_field_expr(&expr)?),
            }
        }

        let (field, render) = target?;
        Some(FormatterTemplate {
            field,
            render,
            prefix,
            suffix,
        })
    }
}

fn parse_field_expr(expr: &str) -> Option<(FormatterField, Render)> {
    let expr = expr.trim();
    if let Some(field) = FormatterField::parse(expr) {
        return Some((field, Render::Plain));
    }
    if let Some(caps) = TO_FIXED.captures(expr).or_else(|| NUMBER_FORMAT.captures(expr)) {
        let field = FormatterField::parse(&caps["field"])?;
        let decimals = caps["n"].parse::<u8>().ok()?;
        return Some((field, Render::Fixed { decimals }));
    }
    if let Some(caps) = DATE_FORMAT.captures(expr) {
        let field = FormatterField::parse(&caps["field"])?;
        let pattern = caps
            .name("sq")
            .or_else(|| caps.name("dq"))
            .map(|m| m.as_str().to_string())?;
        return Some((field, Render::Date { pattern }));
    }
    None
}

#[derive(Debug, PartialEq)]
enum Term {
    Literal(String),
    Expr(String),
}

/// Split `a + 'b' + c` on top-level `+`, honouring quotes and parentheses.
fn split_concat(expr: &str) -> Option<Vec<Term>> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for ch in expr.chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '(') => {
                depth += 1;
                current.push(ch);
            }
            (None, ')') => {
                depth = depth.checked_sub(1)?;
                current.push(ch);
            }
            (None, '+') if depth == 0 => {
                terms.push(classify(&current)?);
                current.clear();
            }
            (None, c) => current.push(c),
        }
    }
    if quote.is_some() || depth != 0 {
        return None;
    }
    terms.push(classify(&current)?);
    Some(terms)
}

fn classify(raw: &str) -> Option<Term> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let quoted = s.len() >= 2
        && ((s.starts_with('\'') && s.ends_with('\'')) || (s.starts_with('"') && s.ends_with('"')));
    if quoted {
        return Some(Term::Literal(s[1..s.len() - 1].to_string()));
    }
    Some(Term::Expr(s.to_string()))
}

/// `formatter`, `pointFormatter`, `labelFormatter`, ...
pub fn is_formatter_key(key: &str) -> bool {
    key == "formatter" || key.ends_with("Formatter")
}

/// Replace recognised formatter strings in-place, recursively.
///
/// Returns how many strings were replaced.
pub fn resolve_formatters(value: &mut Value) -> usize {
    match value {
        Value::Array(items) => items.iter_mut().map(resolve_formatters).sum(),
        Value::Object(map) => {
            let mut resolved = 0;
            for (key, entry) in map.iter_mut() {
                if let Value::String(source) = entry {
                    if !is_formatter_key(key) {
                        continue;
                    }
                    match FormatterTemplate::parse(source) {
                        Some(template) => match serde_json::to_value(&template) {
                            Ok(v) => {
                                log::debug!("resolved formatter '{key}' to {template:?}");
                                *entry = v;
                                resolved += 1;
                            }
                            Err(e) => log::warn!("could not encode formatter template for '{key}': {e}"),
                        },
                        None => log::debug!("left formatter '{key}' as plain text"),
                    }
                } else {
                    resolved += resolve_formatters(entry);
                }
            }
            resolved
        }
        _ => 0,
    }
}

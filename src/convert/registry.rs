//! Priority-ordered converter dispatch.
//!
//! The registry is a process-wide read-only table built on first use. The
//! first converter whose family claims a tag wins; the catch-all sits last so
//! lookups never fail.

use once_cell::sync::Lazy;

use crate::convert::Converter;
use crate::domain::{ConvertOptions, ConvertedSeries, NamedSeries};
use crate::error::ConvertError;

static REGISTRY: Lazy<ConverterRegistry> = Lazy::new(ConverterRegistry::new);

/// The shared registry instance.
pub fn registry() -> &'static ConverterRegistry {
    &REGISTRY
}

#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    converters: [Converter; 7],
}

impl ConverterRegistry {
    fn new() -> Self {
        Self {
            converters: [
                Converter::Scatter,
                Converter::Combo,
                Converter::Bubble,
                Converter::Line,
                Converter::Bar,
                Converter::Pie,
                Converter::Fallback,
            ],
        }
    }

    pub fn converters(&self) -> &[Converter] {
        &self.converters
    }

    pub fn get_converter(&self, tag: &str) -> Converter {
        let converter = self
            .converters
            .iter()
            .copied()
            .find(|c| c.can_handle(tag))
            .unwrap_or(Converter::Fallback);
        log::debug!("using {converter} for chart type '{tag}'");
        converter
    }

    /// Declared family tags, for populating menus.
    pub fn supported_types(&self) -> Vec<&'static str> {
        self.converters.iter().flat_map(|c| c.family().iter().copied()).collect()
    }

    /// Dispatch on `tag` and convert. The tag is threaded into the options so
    /// family-aware converters (line/area, pie/donut) see it.
    pub fn convert(
        &self,
        tag: &str,
        series: &[NamedSeries],
        target_date: Option<&str>,
    ) -> Result<Vec<ConvertedSeries>, ConvertError> {
        let options = ConvertOptions {
            chart_type: Some(tag.to_string()),
            target_date: target_date.map(str::to_string),
        };
        self.get_converter(tag).convert(series, &options)
    }
}

//! Chart-data conversion engine.
//!
//! Responsibilities:
//!
//! - coerce raw points into numeric/timestamp pairs (`points`)
//! - split multi-unit datasets across two y-axes (`axis`)
//! - convert named series for each chart family (`bar`, `line`, `pie`,
//!   `scatter`, `bubble`, `combo`, `fallback`)
//! - dispatch a requested chart tag to the right converter (`registry`)

pub mod axis;
pub mod bar;
pub mod bubble;
pub mod combo;
pub mod fallback;
pub mod line;
pub mod pie;
pub mod points;
pub mod registry;
pub mod scatter;

pub use axis::assign_y_axes;
pub use registry::{ConverterRegistry, registry};

use crate::domain::{ConvertOptions, ConvertedSeries, NamedSeries};
use crate::error::ConvertError;

/// The closed set of conversion strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    Scatter,
    Combo,
    Bubble,
    Line,
    Bar,
    Pie,
    Fallback,
}

impl Converter {
    /// Diagnostic name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Converter::Scatter => "ScatterConverter",
            Converter::Combo => "ComboConverter",
            Converter::Bubble => "BubbleConverter",
            Converter::Line => "LineConverter",
            Converter::Bar => "BarConverter",
            Converter::Pie => "PieConverter",
            Converter::Fallback => "DefaultConverter",
        }
    }

    /// Family tags this converter claims. Empty for the catch-all.
    pub fn family(self) -> &'static [&'static str] {
        match self {
            Converter::Scatter => &scatter::FAMILY,
            Converter::Combo => &combo::FAMILY,
            Converter::Bubble => &bubble::FAMILY,
            Converter::Line => &line::FAMILY,
            Converter::Bar => &bar::FAMILY,
            Converter::Pie => &pie::FAMILY,
            Converter::Fallback => &[],
        }
    }

    pub fn can_handle(self, tag: &str) -> bool {
        match self {
            Converter::Fallback => true,
            _ => {
                let tag = tag.trim();
                self.family().iter().any(|f| f.eq_ignore_ascii_case(tag))
            }
        }
    }

    pub fn convert(
        self,
        series: &[NamedSeries],
        options: &ConvertOptions,
    ) -> Result<Vec<ConvertedSeries>, ConvertError> {
        match self {
            Converter::Scatter => scatter::convert(series),
            Converter::Combo => combo::convert(series),
            Converter::Bubble => bubble::convert(series),
            Converter::Line => line::convert(series, options.chart_type.as_deref()),
            Converter::Bar => bar::convert(series),
            Converter::Pie => pie::convert(series, options),
            Converter::Fallback => fallback::convert(series),
        }
    }
}

impl std::fmt::Display for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//! Table analysis ahead of an AI request.
//!
//! - `recommend`: suggest chart families from the shape of a table
//! - `sample`: cut and round a table before it is sent upstream

pub mod recommend;
pub mod sample;

pub use recommend::{TableProfile, profile_table, recommend_chart_kinds};
pub use sample::prepare_sample;

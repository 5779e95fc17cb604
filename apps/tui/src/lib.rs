// Export our modules for use in binaries and tests
pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod fixture;
pub mod flow;
pub mod i18n;
pub mod layout;
pub mod map;
pub mod pipeline;
pub mod routing;
pub mod sequence;
pub mod source;

pub use domain::{AnalysisPayload, AnalysisResult, LatLng};
pub use i18n::Language;

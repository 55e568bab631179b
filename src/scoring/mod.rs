//! Triage scoring core.
//!
//! Pure functions over a single patient's vitals and injury findings. None
//! of them fail or keep state between calls.

pub mod analysis;
pub mod imaging;
pub mod normalize;
pub mod protocol;
pub mod recommend;
pub mod risk;
pub mod survival;

pub use analysis::{assess, AnalysisRequest, Assessor};
pub use imaging::{DemoImageAnalyzer, ImageAnalysis, ImageAnalyzer};
pub use normalize::normalize;
pub use protocol::classify_protocol;
pub use recommend::recommend;
pub use risk::score;
pub use survival::estimate_survival;

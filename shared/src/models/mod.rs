//! Domain models for the CropCast flows

mod recommendation;
mod report;
mod yield_prediction;

pub use recommendation::*;
pub use report::*;
pub use yield_prediction::*;

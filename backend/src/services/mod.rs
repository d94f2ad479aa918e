//! Flow logic for the CropCast backend

pub mod conversation;
pub mod recommendation;
pub mod report_summary;
pub mod summarize;
pub mod yield_prediction;

pub use recommendation::RecommendationService;
pub use report_summary::ReportSummaryService;
pub use summarize::SummarizeDataTool;
pub use yield_prediction::YieldPredictionService;

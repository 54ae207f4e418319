pub mod assessments;
pub mod response;
pub mod risk;

pub use assessments::{assess_batch, create_assessment_request, AssessmentReport, RejectedAssessment};
pub use response::{ApiResponse, ResponseStatus};
pub use risk::analyze_request;

pub mod assessment_service;
pub mod risk_scorer;

pub use assessment_service::*;
pub use risk_scorer::*;

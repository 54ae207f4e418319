pub mod assessment;
pub mod risk_factor;
pub mod risk_score;

pub use assessment::*;
pub use risk_factor::*;
pub use risk_score::*;

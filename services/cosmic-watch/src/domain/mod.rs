pub mod feed;
pub mod risk;
pub mod watch;

pub use feed::{assemble_feed, NearEarthObject};
pub use risk::{RiskAssessment, RiskLevel};
pub use watch::*;

pub mod config;
pub mod planner;
pub mod session;

pub use config::PlannerConfig;
pub use planner::Planner;
pub use session::{PlanView, PlannerSession, PLACEHOLDER_MESSAGE};

pub mod classify;
pub mod orchestrator;
pub mod prompt;
pub mod testcases;

pub use classify::*;
pub use orchestrator::*;
pub use prompt::*;
pub use testcases::*;

pub mod planner;
pub mod reorganizer;

pub use crate::domain::model::{MovePolicy, RenamePlan, RenameRules, RunSummary};
pub use crate::domain::ports::{ConfigProvider, FileSystem};
pub use crate::utils::error::Result;

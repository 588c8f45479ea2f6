//! Command-line surface and workflow composition

pub mod args;
pub mod orchestration;

pub use args::{Cli, Command, PublishArgs, RepoArgs};
pub use orchestration::{Determination, Workflow, WorkflowResult};

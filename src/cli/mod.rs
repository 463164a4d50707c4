//! CLI commands

mod build;
mod common;
mod layout;
mod main;
mod pick;

pub use build::build;
pub use common::{collect_candidates, report_outcomes, resolve_build_config, Command};
pub use layout::layout;
pub use main::main;
pub use pick::pick;

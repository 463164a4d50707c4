//! Project file structures

mod build;
mod repr;

pub use build::Build;
pub use repr::Project;

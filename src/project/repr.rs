//! Project configuration file representation

use crate::project::build::Build;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, io};

/// In-memory representation of the current project configuration.
///
/// This is typically read from a file named `multirom.json`, and it contains
/// every named build the project knows how to assemble.
#[derive(Serialize, Deserialize, Debug)]
pub struct Project {
    builds: HashMap<String, Build>,
}

impl Project {
    pub fn read(filename: &str) -> io::Result<Self> {
        let project_file = fs::File::open(filename)?;
        let mut project: Self = serde_json::from_reader(project_file)?;

        for (name, build) in project.builds.iter_mut() {
            if build.as_name().is_none() {
                build.set_name(name);
            }
        }

        Ok(project)
    }

    /// Get the build with the given name within the project.
    pub fn build(&mut self, name: &str) -> Option<&Build> {
        let build = self.builds.get_mut(name);

        if let Some(build) = build {
            build.set_name(name);

            return Some(build);
        }

        None
    }

    /// Get the project's default build.
    pub fn default_build(&self) -> Option<(&String, &Build)> {
        self.builds.iter().next()
    }

    pub fn iter_builds(&self) -> impl Iterator<Item = (&str, &Build)> {
        self.builds.iter().map(|(k, v)| (k.as_str(), v))
    }
}

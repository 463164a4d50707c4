//! CLI support for non-command bits

use crate::cli::common::Command;
use crate::{cli, project};
use clap::{Arg, ArgSettings};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::io;

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!();
    app = app.arg(
        Arg::with_name("build")
            .long("build")
            .value_name("mycart")
            .takes_value(true)
            .help("Which build in the project file to assemble")
            .set(ArgSettings::Global),
    );
    app = project::Build::configure_app(app);
    app = app.arg(
        Arg::with_name("project")
            .long("project")
            .value_name("multirom.json")
            .takes_value(true)
            .help("The project file to load")
            .set(ArgSettings::Global),
    );

    for cmd in Command::enumerate().iter() {
        app = app.subcommand(cmd.into_clap_subcommand());
    }

    let matches = app.get_matches();

    let project_filename = matches.value_of("project").unwrap_or("multirom.json");
    let version = matches.value_of("build");
    let mut target = project::Build::from_arg_matches(&matches);

    let (command, _submatches) = matches.subcommand();
    let command = Command::from_str(command);

    // A project file is optional; flags alone can describe a build.
    match project::Project::read(project_filename) {
        Ok(mut project) => {
            let named = match version {
                Some(version) => project.build(version).cloned(),
                None => project.default_build().map(|(_, build)| build.clone()),
            };

            match named {
                Some(named) => target = named.apply_override(&target),
                None => {
                    if let Some(version) = version {
                        eprintln!(
                            "The build {} does not exist in {}.",
                            version, project_filename
                        );
                    }
                }
            }
        }
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => eprintln!("Cannot open project file, got error {}", e),
    }

    let base = project_base(project_filename);

    match command {
        Ok(Command::Build) => cli::build(&target, &base),
        Ok(Command::Layout) => cli::layout(&target, &base),
        Err(_) => cli::pick(&target, &base),
    }
}

/// Relative paths in a manifest resolve against the manifest's directory.
fn project_base(project_filename: &str) -> PathBuf {
    match Path::new(project_filename).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

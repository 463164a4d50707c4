//! Common utilities for command implementations

use crate::alloc::{Allocation, Outcome, RomFile};
use crate::plan::{ChipSize, MenuVariant};
use crate::project::Build;
use clap::{App, SubCommand};
use relative_path::{RelativePath, RelativePathBuf};
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Enumeration of all CLI commands
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Build,
    Layout,
}

impl Command {
    /// Enumerate all commands the builder recognizes.
    pub fn enumerate() -> Vec<Self> {
        vec![Command::Build, Command::Layout]
    }

    /// Construct the subcommand object for this particular `Command`.
    pub fn into_clap_subcommand<'a, 'b>(self) -> App<'a, 'b> {
        match self {
            Command::Build => SubCommand::with_name("build")
                .about("Assemble the selected ROMs into a flash cartridge image"),
            Command::Layout => SubCommand::with_name("layout")
                .about("Print the planned bank layout without writing an image"),
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "build" => Ok(Command::Build),
            "layout" => Ok(Command::Layout),
            "map" => Ok(Command::Layout),
            _ => Err(()),
        }
    }
}

/// Resolve a build's chip size, menu variant, and bootstrap path.
///
/// The bootstrap path falls back to the conventional `res/startup.gb`; the
/// chip size and menu variant have no sensible default and yield an error
/// when unspecified.
pub fn resolve_build_config(
    build: &Build,
) -> io::Result<(ChipSize, MenuVariant, RelativePathBuf)> {
    let chip = build.chip().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "Unspecified chip size, cannot plan the image.",
        )
    })?;
    let variant = build.variant().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "Unspecified menu variant, cannot plan the image.",
        )
    })?;
    let bootstrap = build
        .bootstrap()
        .unwrap_or_else(|| RelativePath::new("res/startup.gb"))
        .to_relative_path_buf();

    Ok((chip, variant, bootstrap))
}

/// Stat every ROM named by the build, resolving paths against `base`.
pub fn collect_candidates(build: &Build, base: &Path) -> io::Result<Vec<RomFile>> {
    let mut candidates = Vec::new();

    for rom in build.iter_roms() {
        candidates.push(RomFile::from_path(rom.to_path(base))?);
    }

    Ok(candidates)
}

/// Report each candidate's allocation outcome on stderr.
pub fn report_outcomes(candidates: &[RomFile], allocation: &Allocation) {
    for (rom, outcome) in candidates.iter().zip(allocation.outcomes()) {
        match outcome {
            Outcome::Accepted(bank) => {
                eprintln!("{}: assigned to bank {}", rom.name(), bank)
            }
            Outcome::RomTooLarge => eprintln!(
                "{}: larger than any bank can hold and thus not compatible, skipped",
                rom.name()
            ),
            Outcome::AllocationExhausted => {
                eprintln!("{}: no bank has enough space left, skipped", rom.name())
            }
        }
    }
}

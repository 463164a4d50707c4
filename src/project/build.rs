//! Build description

use crate::plan::{ChipSize, MenuVariant};
use clap::{App, Arg, ArgMatches, ArgSettings};
use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single named build within a project manifest.
///
/// Paths are stored relative to the manifest so a project directory can be
/// moved or shared without editing it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Build {
    chip: Option<ChipSize>,
    variant: Option<MenuVariant>,
    bootstrap: Option<RelativePathBuf>,

    #[serde(default)]
    roms: Vec<RelativePathBuf>,

    #[serde(default = "default_output")]
    output: RelativePathBuf,

    #[serde(skip)]
    name: Option<String>,
}

fn default_output() -> RelativePathBuf {
    RelativePathBuf::from("multirom.gb")
}

impl Default for Build {
    fn default() -> Self {
        Build {
            chip: None,
            variant: None,
            bootstrap: None,
            roms: Vec::new(),
            output: default_output(),
            name: None,
        }
    }
}

impl Build {
    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("chip")
                .long("chip")
                .value_name("2048")
                .help("Flash chip capacity in kilobytes (512, 1024, or 2048).")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("variant")
                .long("variant")
                .value_name("VARIANT")
                .help("Which bootstrap menu to build around (static3 or dynamic).")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("bootstrap")
                .long("bootstrap")
                .value_name("startup.gb")
                .help("The bootstrap menu binary to place at the start of the image.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("rom")
                .long("rom")
                .value_name("game.gb")
                .help("A game ROM to include, in selection order. May be repeated.")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("multirom.gb")
                .help("Where to write the assembled image.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
    }

    /// Construct a Build from clap ArgMatches
    pub fn from_arg_matches(args: &ArgMatches) -> Build {
        Build {
            chip: args
                .value_of("chip")
                .and_then(|s| ChipSize::from_str(s).ok()),
            variant: args
                .value_of("variant")
                .and_then(|s| MenuVariant::from_str(s).ok()),
            bootstrap: args.value_of("bootstrap").map(RelativePathBuf::from),
            roms: args
                .values_of("rom")
                .map_or(Vec::new(), |v| v.map(RelativePathBuf::from).collect()),
            output: args
                .value_of("output")
                .map(RelativePathBuf::from)
                .unwrap_or_else(default_output),
            name: None,
        }
    }

    pub fn chip(&self) -> Option<ChipSize> {
        self.chip
    }

    pub fn set_chip(&mut self, chip: ChipSize) {
        self.chip = Some(chip);
    }

    pub fn variant(&self) -> Option<MenuVariant> {
        self.variant
    }

    pub fn set_variant(&mut self, variant: MenuVariant) {
        self.variant = Some(variant);
    }

    pub fn bootstrap(&self) -> Option<&RelativePath> {
        self.bootstrap.as_deref()
    }

    /// List the game ROMs selected for this build, in selection order.
    pub fn iter_roms(&self) -> impl Iterator<Item = &RelativePath> {
        self.roms.iter().map(|p| p.as_ref())
    }

    /// Add a game ROM at the end of the selection order.
    pub fn add_rom_path(&mut self, path: &RelativePath) {
        self.roms.push(path.to_relative_path_buf());
    }

    pub fn output(&self) -> &RelativePath {
        self.output.as_ref()
    }

    pub fn as_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Merge another build's settings over this one, favoring the other's.
    pub fn apply_override(&self, other: &Build) -> Build {
        Build {
            chip: other.chip.or(self.chip),
            variant: other.variant.or(self.variant),
            bootstrap: other
                .bootstrap
                .clone()
                .or_else(|| self.bootstrap.clone()),
            roms: match other.roms.len() {
                0 => self.roms.clone(),
                _ => other.roms.clone(),
            },
            output: if other.output == default_output() {
                self.output.clone()
            } else {
                other.output.clone()
            },
            name: other.name.clone().or_else(|| self.name.clone()),
        }
    }
}

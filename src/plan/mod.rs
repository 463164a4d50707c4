//! Bank capacity planning for flash cartridge images.
//!
//! Every supported flash chip is addressed as four equally sized banks. The
//! menu variant decides which parts of those banks are off limits to game
//! content: the bootstrap menu claims some or all of bank 0, and the dynamic
//! menu additionally keeps an erase/scratch region in bank 1 for its own
//! runtime use.

use serde::Serialize;
use std::{io, result, str};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Number of banks on every supported flash chip.
pub const BANK_COUNT: usize = 4;

/// Enumeration of all flash chip capacities the builder supports.
#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq)]
pub enum ChipSize {
    Kb512,
    Kb1024,
    Kb2048,
}

impl ChipSize {
    /// Look up the chip size for a raw kilobyte count.
    pub fn from_kilobytes(kb: u64) -> Result<Self> {
        match kb {
            512 => Ok(ChipSize::Kb512),
            1024 => Ok(ChipSize::Kb1024),
            2048 => Ok(ChipSize::Kb2048),
            _ => Err(Error::InvalidChipSize(kb)),
        }
    }

    pub fn kilobytes(self) -> u64 {
        match self {
            ChipSize::Kb512 => 512,
            ChipSize::Kb1024 => 1024,
            ChipSize::Kb2048 => 2048,
        }
    }

    pub fn total_bytes(self) -> u64 {
        self.kilobytes() * 1024
    }

    /// Iterate all valid chip sizes.
    pub fn iter() -> impl IntoIterator<Item = ChipSize> {
        vec![Self::Kb512, Self::Kb1024, Self::Kb2048]
    }

    /// Yield a name for this chip size.
    pub fn friendly_name(self) -> &'static str {
        match self {
            Self::Kb512 => "512kb",
            Self::Kb1024 => "1024kb",
            Self::Kb2048 => "2048kb",
        }
    }
}

impl str::FromStr for ChipSize {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "512" | "512kb" | "kb512" => Ok(ChipSize::Kb512),
            "1024" | "1024kb" | "kb1024" => Ok(ChipSize::Kb1024),
            "2048" | "2048kb" | "kb2048" => Ok(ChipSize::Kb2048),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(ChipSize, "valid chip size");

/// Enumeration of the bootstrap menu variants a cartridge can be built
/// around.
#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq)]
pub enum MenuVariant {
    /// Legacy three-slot menu. The menu binary bakes in the whole of bank 0
    /// and expects exactly one game at the start of each remaining bank.
    Static3,

    /// Flexible multi-ROM menu. Games may share banks; the menu only claims
    /// a prefix of bank 0 plus an erase/scratch half of bank 1.
    DynamicMulti,
}

impl MenuVariant {
    /// Iterate all valid menu variants.
    pub fn iter() -> impl IntoIterator<Item = MenuVariant> {
        vec![Self::Static3, Self::DynamicMulti]
    }

    /// Yield a name for this menu variant.
    pub fn friendly_name(self) -> &'static str {
        match self {
            Self::Static3 => "static 3-slot menu",
            Self::DynamicMulti => "dynamic multi-rom menu",
        }
    }
}

impl str::FromStr for MenuVariant {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "static" | "static3" | "3slot" => Ok(MenuVariant::Static3),
            "dynamic" | "dynamicmulti" | "multi" => Ok(MenuVariant::DynamicMulti),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(MenuVariant, "valid menu variant");

/// Layout constraints for a single bank, before any content is assigned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BankSpec {
    index: usize,
    capacity: u64,
    reserved: u64,
    max_roms: Option<usize>,
}

impl BankSpec {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn capacity(self) -> u64 {
        self.capacity
    }

    /// Bytes at the tail of this bank that game content must never touch.
    pub fn reserved(self) -> u64 {
        self.reserved
    }

    /// Cap on the number of ROMs this bank may hold, if the menu variant
    /// imposes one.
    pub fn max_roms(self) -> Option<usize> {
        self.max_roms
    }

    /// Bytes available to game content in an empty bank.
    pub fn free(self) -> u64 {
        self.capacity - self.reserved
    }
}

/// The planned division of a flash chip into banks.
///
/// A profile is produced once per build by [`plan`] and consumed by the
/// allocator and the assembler; it never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChipProfile {
    chip: ChipSize,
    variant: MenuVariant,
    bank_size: u64,
    banks: [BankSpec; BANK_COUNT],
}

impl ChipProfile {
    pub fn chip(&self) -> ChipSize {
        self.chip
    }

    pub fn variant(&self) -> MenuVariant {
        self.variant
    }

    pub fn bank_size(&self) -> u64 {
        self.bank_size
    }

    pub fn total_size(&self) -> u64 {
        self.chip.total_bytes()
    }

    pub fn banks(&self) -> &[BankSpec] {
        &self.banks
    }

    /// The largest ROM any bank could ever hold under this plan.
    ///
    /// Anything bigger can be rejected up front: a ROM is never split
    /// across banks.
    pub fn max_rom_size(&self) -> u64 {
        self.banks
            .iter()
            .filter(|bank| bank.max_roms != Some(0))
            .map(|bank| bank.free())
            .max()
            .unwrap_or(0)
    }
}

/// Derive the bank layout for a chip size, menu variant, and bootstrap blob
/// length.
///
/// All arithmetic is integer-exact: a capacity that does not divide evenly
/// into banks is rejected rather than truncated, since flash addressing has
/// no notion of a fractional byte.
pub fn plan(chip: ChipSize, variant: MenuVariant, bootstrap_size: u64) -> Result<ChipProfile> {
    let total = chip.total_bytes();

    if total % BANK_COUNT as u64 != 0 {
        return Err(Error::UnevenBankSplit { total });
    }

    let bank_size = total / BANK_COUNT as u64;

    if bootstrap_size > bank_size {
        return Err(Error::BootstrapTooLarge {
            size: bootstrap_size,
            bank_size,
        });
    }

    let banks = match variant {
        // The menu blob owns all of bank 0; banks 1-3 each start exactly one
        // game, which is how the menu locates them at runtime.
        MenuVariant::Static3 => [
            BankSpec {
                index: 0,
                capacity: bank_size,
                reserved: bank_size,
                max_roms: Some(0),
            },
            BankSpec {
                index: 1,
                capacity: bank_size,
                reserved: 0,
                max_roms: Some(1),
            },
            BankSpec {
                index: 2,
                capacity: bank_size,
                reserved: 0,
                max_roms: Some(1),
            },
            BankSpec {
                index: 3,
                capacity: bank_size,
                reserved: 0,
                max_roms: Some(1),
            },
        ],
        MenuVariant::DynamicMulti => {
            if bank_size % 2 != 0 {
                return Err(Error::UnevenBankSplit { total });
            }

            [
                BankSpec {
                    index: 0,
                    capacity: bank_size,
                    reserved: bootstrap_size,
                    max_roms: None,
                },
                // Half of bank 1 is the menu's temporary-flash scratch area.
                BankSpec {
                    index: 1,
                    capacity: bank_size,
                    reserved: bank_size / 2,
                    max_roms: None,
                },
                BankSpec {
                    index: 2,
                    capacity: bank_size,
                    reserved: 0,
                    max_roms: None,
                },
                BankSpec {
                    index: 3,
                    capacity: bank_size,
                    reserved: 0,
                    max_roms: None,
                },
            ]
        }
    };

    Ok(ChipProfile {
        chip,
        variant,
        bank_size,
        banks,
    })
}

/// Error type for capacity planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Requested capacity is not one of the supported chip sizes.
    #[error("{0}kb is not a supported chip size")]
    InvalidChipSize(u64),

    /// The bootstrap menu binary does not fit within a single bank.
    #[error("bootstrap binary is {size} bytes but a bank only holds {bank_size}")]
    BootstrapTooLarge { size: u64, bank_size: u64 },

    /// Chip capacity does not divide evenly into banks.
    #[error("{total} bytes does not split evenly across banks")]
    UnevenBankSplit { total: u64 },
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidInput, format!("{}", err))
    }
}

pub type Result<T> = result::Result<T, Error>;

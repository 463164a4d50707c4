//! First-fit allocation of game ROMs across flash banks.
//!
//! Allocation is a single forward pass: each candidate, in caller order, is
//! placed into the lowest-numbered bank with room for it, or rejected with a
//! structured outcome. There is no backtracking and no attempt at optimal
//! packing; a later, smaller ROM may claim space an earlier, larger rejected
//! ROM could not use, and that behavior is deliberate.

use crate::plan::{BankSpec, ChipProfile};
use std::path::{Path, PathBuf};
use std::{fs, io};

#[cfg(test)]
mod tests;

/// A candidate game ROM, identified by path and on-disk byte length.
///
/// The length is recorded once, when the candidate is first seen; the
/// assembler re-checks it against the file before copying any bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RomFile {
    path: PathBuf,
    size: u64,
}

impl RomFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        RomFile { path, size }
    }

    /// Stat a ROM file on disk, recording its current byte length.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let size = fs::metadata(&path)?.len();

        Ok(RomFile { path, size })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Yield the file name for menus and reports.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A bank and the ROMs assigned to it so far.
#[derive(Clone, Debug)]
pub struct Bank {
    spec: BankSpec,
    roms: Vec<RomFile>,
    used: u64,
}

impl Bank {
    fn new(spec: BankSpec) -> Self {
        Bank {
            spec,
            roms: Vec::new(),
            used: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.spec.index()
    }

    pub fn capacity(&self) -> u64 {
        self.spec.capacity()
    }

    pub fn reserved(&self) -> u64 {
        self.spec.reserved()
    }

    /// Bytes still available to game content.
    pub fn free(&self) -> u64 {
        self.spec.free() - self.used
    }

    /// ROMs assigned to this bank, in assignment order.
    pub fn roms(&self) -> &[RomFile] {
        &self.roms
    }

    fn accepts(&self, rom: &RomFile) -> bool {
        if let Some(max) = self.spec.max_roms() {
            if self.roms.len() >= max {
                return false;
            }
        }

        rom.size() <= self.free()
    }

    fn assign(&mut self, rom: RomFile) {
        self.used += rom.size();
        self.roms.push(rom);
    }
}

/// The finalized assignment of accepted ROMs to banks, in bank order.
#[derive(Clone, Debug)]
pub struct Placement {
    banks: Vec<Bank>,
}

impl Placement {
    fn new(profile: &ChipProfile) -> Self {
        Placement {
            banks: profile.banks().iter().map(|spec| Bank::new(*spec)).collect(),
        }
    }

    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }
}

/// Per-candidate allocation outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The candidate was assigned to the bank with the given index.
    Accepted(usize),

    /// The candidate exceeds the largest capacity any bank could ever offer
    /// and can never be placed, regardless of what else is selected.
    RomTooLarge,

    /// The candidate would fit an empty bank, but every bank that could hold
    /// it is already too full.
    AllocationExhausted,
}

impl Outcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

/// The result of one allocation pass.
///
/// Outcomes are parallel to the candidate list handed to [`allocate`], so a
/// driver can re-offer exactly the rejected candidates.
#[derive(Clone, Debug)]
pub struct Allocation {
    placement: Placement,
    outcomes: Vec<Outcome>,
}

impl Allocation {
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Whether every candidate was accepted.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.is_accepted())
    }

    /// Indices of rejected candidates, in candidate order.
    pub fn rejected(&self) -> impl Iterator<Item = usize> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, outcome)| !outcome.is_accepted())
            .map(|(index, _)| index)
    }
}

/// Assign each candidate to the first bank with room for it.
///
/// Candidates are processed strictly in the order given and banks are
/// scanned in ascending index order. A rejected candidate leaves every
/// bank's remaining capacity untouched.
pub fn allocate(profile: &ChipProfile, candidates: &[RomFile]) -> Allocation {
    let mut placement = Placement::new(profile);
    let max_rom = profile.max_rom_size();
    let mut outcomes = Vec::with_capacity(candidates.len());

    for rom in candidates {
        if rom.size() > max_rom {
            outcomes.push(Outcome::RomTooLarge);
            continue;
        }

        match placement.banks.iter_mut().find(|bank| bank.accepts(rom)) {
            Some(bank) => {
                outcomes.push(Outcome::Accepted(bank.index()));
                bank.assign(rom.clone());
            }
            None => outcomes.push(Outcome::AllocationExhausted),
        }
    }

    Allocation {
        placement,
        outcomes,
    }
}

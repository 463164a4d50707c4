//! Interactive ROM picker.
//!
//! A thin driver over the pure allocator: selections are gathered from
//! numbered menus, allocated in one pass, and only the rejected picks are
//! dropped and re-offered. Bank bookkeeping lives entirely in the allocator;
//! the menu never mutates capacity state of its own.

use crate::alloc::{self, Outcome, RomFile};
use crate::cli::common::resolve_build_config;
use crate::plan::{self, ChipSize, MenuVariant};
use crate::project::Build;
use crate::{image, input};
use std::path::Path;
use std::{fs, io};

/// Run the interactive menu loop and assemble the confirmed composition.
pub fn pick(target: &Build, base: &Path) -> io::Result<()> {
    let chip = match target.chip() {
        Some(chip) => chip,
        None => prompt_chip()?,
    };
    let variant = match target.variant() {
        Some(variant) => variant,
        None => prompt_variant()?,
    };

    let mut sized = target.clone();
    sized.set_chip(chip);
    sized.set_variant(variant);

    let (chip, variant, bootstrap_path) = resolve_build_config(&sized)?;
    let bootstrap = fs::read(bootstrap_path.to_path(base))?;
    let profile = plan::plan(chip, variant, bootstrap.len() as u64)?;

    let out_path = sized.output().to_path(base);
    let available = candidates_in(base, &out_path)?;

    if available.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "No .gb files found next to the project; place some ROMs there first.",
        ));
    }

    let mut selection: Vec<RomFile> = Vec::new();

    loop {
        input::clear_screen();
        println!(
            "{} v{} -- {} chip, {}",
            crate_name!(),
            crate_version!(),
            chip.friendly_name(),
            variant.friendly_name()
        );
        println!();

        offer_roms(&available, &mut selection)?;

        let allocation = alloc::allocate(&profile, &selection);

        println!();
        println!("Composition:");

        let mut kept = Vec::new();

        for (rom, outcome) in selection.iter().zip(allocation.outcomes()) {
            match outcome {
                Outcome::Accepted(bank) => {
                    println!("  bank {}: {} ({}kb)", bank, rom.name(), rom.size() / 1024);
                    kept.push(rom.clone());
                }
                Outcome::RomTooLarge => println!(
                    "  {} is larger than any bank can hold and thus not compatible. Please reselect.",
                    rom.name()
                ),
                Outcome::AllocationExhausted => println!(
                    "  No bank has enough space left for {}. Please reselect.",
                    rom.name()
                ),
            }
        }

        selection = kept;

        println!();

        if input::confirm("Composition ok? (y/n)")? {
            let allocation = alloc::allocate(&profile, &selection);
            let len =
                image::build_image(&profile, allocation.placement(), &bootstrap, &out_path)?;

            println!("{} created ({} bytes)", out_path.display(), len);

            return Ok(());
        }
    }
}

/// Discover ROMs next to the project, skipping a stale output image.
fn candidates_in(base: &Path, out_path: &Path) -> io::Result<Vec<RomFile>> {
    let mut candidates = Vec::new();

    for path in input::discover_roms(base)? {
        if path.file_name() == out_path.file_name() {
            continue;
        }

        candidates.push(RomFile::from_path(&path)?);
    }

    Ok(candidates)
}

/// Offer every not-yet-selected ROM, appending picks to `selection` until
/// the user enters 0 or nothing is left to offer.
fn offer_roms(available: &[RomFile], selection: &mut Vec<RomFile>) -> io::Result<()> {
    loop {
        let remaining: Vec<&RomFile> = available
            .iter()
            .filter(|rom| !selection.iter().any(|s| s.path() == rom.path()))
            .collect();

        if remaining.is_empty() {
            return Ok(());
        }

        println!("Available roms:");

        for (i, rom) in remaining.iter().enumerate() {
            println!("{} : {} ({}kb)", i + 1, rom.name(), rom.size() / 1024);
        }

        let choice =
            input::prompt_selection("Select a rom to add. Enter 0 to stop.", remaining.len())?;

        if choice == 0 {
            return Ok(());
        }

        selection.push(remaining[choice - 1].clone());
    }
}

fn prompt_chip() -> io::Result<ChipSize> {
    let choices: Vec<ChipSize> = ChipSize::iter().into_iter().collect();

    println!("Available chip sizes:");

    for (i, chip) in choices.iter().enumerate() {
        println!("{} : {}", i + 1, chip.friendly_name());
    }

    loop {
        let choice = input::prompt_selection("Select a chip size.", choices.len())?;

        if choice > 0 {
            return Ok(choices[choice - 1]);
        }
    }
}

fn prompt_variant() -> io::Result<MenuVariant> {
    let choices: Vec<MenuVariant> = MenuVariant::iter().into_iter().collect();

    println!("Available menu variants:");

    for (i, variant) in choices.iter().enumerate() {
        println!("{} : {}", i + 1, variant.friendly_name());
    }

    loop {
        let choice = input::prompt_selection("Select a menu variant.", choices.len())?;

        if choice > 0 {
            return Ok(choices[choice - 1]);
        }
    }
}

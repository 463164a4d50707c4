//! CLI command: layout

use crate::cli::common::{collect_candidates, report_outcomes, resolve_build_config};
use crate::plan::MenuVariant;
use crate::project::Build;
use crate::{alloc, plan};
use std::path::Path;
use std::{fs, io};

/// Print the bank map a build would produce, without writing an image.
///
/// Only the bootstrap's length is needed for planning, so the blob itself is
/// never read.
pub fn layout(target: &Build, base: &Path) -> io::Result<()> {
    let (chip, variant, bootstrap_path) = resolve_build_config(target)?;
    let bootstrap_size = fs::metadata(bootstrap_path.to_path(base))?.len();
    let profile = plan::plan(chip, variant, bootstrap_size)?;

    let candidates = collect_candidates(target, base)?;
    let allocation = alloc::allocate(&profile, &candidates);

    report_outcomes(&candidates, &allocation);

    println!(
        "{} chip, {}: {} banks of {} bytes",
        profile.chip().friendly_name(),
        profile.variant().friendly_name(),
        profile.banks().len(),
        profile.bank_size()
    );

    let mut offset = 0u64;

    for bank in allocation.placement().banks() {
        println!("bank {} at {:#08x}:", bank.index(), offset);

        if bank.index() == 0 {
            println!("  {:>8} bytes  {}", bootstrap_size, bootstrap_path);
        }

        for rom in bank.roms() {
            println!("  {:>8} bytes  {}", rom.size(), rom.name());
        }

        println!("  {:>8} bytes  free", bank.free());

        // The scratch region sits at the tail of the bank, after any free
        // space game content could still claim.
        if bank.index() != 0 && bank.reserved() > 0 && profile.variant() == MenuVariant::DynamicMulti
        {
            println!("  {:>8} bytes  erase/scratch region (zero)", bank.reserved());
        }

        offset += profile.bank_size();
    }

    Ok(())
}

//! CLI command: build

use crate::cli::common::{collect_candidates, report_outcomes, resolve_build_config};
use crate::project::Build;
use crate::{alloc, image, plan};
use std::path::Path;
use std::{fs, io};

/// Plan, allocate, and assemble the image described by `target`.
///
/// Rejected candidates are reported and skipped; everything accepted is
/// committed to the build's output path in a single atomic step.
pub fn build(target: &Build, base: &Path) -> io::Result<()> {
    let (chip, variant, bootstrap_path) = resolve_build_config(target)?;
    let bootstrap = fs::read(bootstrap_path.to_path(base))?;
    let profile = plan::plan(chip, variant, bootstrap.len() as u64)?;

    let candidates = collect_candidates(target, base)?;
    let allocation = alloc::allocate(&profile, &candidates);

    report_outcomes(&candidates, &allocation);

    let out_path = target.output().to_path(base);
    let len = image::build_image(&profile, allocation.placement(), &bootstrap, &out_path)?;

    println!("{} created ({} bytes)", out_path.display(), len);

    Ok(())
}

//! Assembly of the final cartridge image.
//!
//! The assembler turns a plan and a placement into the output byte
//! sequence: bootstrap blob first, then each bank's ROMs back to back, with
//! `0x00` padding to every bank boundary. Reserved scratch regions receive
//! no content but are still emitted as zero bytes, so the image is always
//! exactly the chip's capacity.

mod error;


pub use error::{Error, Result};

use crate::alloc::{Placement, RomFile};
use crate::plan::ChipProfile;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::{ffi, fs};

const PAD_CHUNK: usize = 4096;

/// Write the assembled image to `sink`, returning the bytes written.
///
/// The total is checked against `profile.total_size()` before returning;
/// any shortfall or overrun is an error, never a silently misshapen image.
pub fn assemble_into<W: Write>(
    profile: &ChipProfile,
    placement: &Placement,
    bootstrap: &[u8],
    sink: &mut W,
) -> Result<u64> {
    let bank_size = profile.bank_size();
    let mut written = 0u64;

    for bank in placement.banks() {
        let mut bank_used = 0u64;

        if bank.index() == 0 {
            if bootstrap.len() as u64 > bank_size {
                return Err(Error::BankOverflow {
                    bank: 0,
                    written: bootstrap.len() as u64,
                    capacity: bank_size,
                });
            }

            sink.write_all(bootstrap)?;
            bank_used += bootstrap.len() as u64;
        }

        for rom in bank.roms() {
            if bank_used + rom.size() > bank_size {
                return Err(Error::BankOverflow {
                    bank: bank.index(),
                    written: bank_used + rom.size(),
                    capacity: bank_size,
                });
            }

            copy_rom(rom, sink)?;
            bank_used += rom.size();
        }

        pad_zero(sink, bank_size - bank_used)?;
        written += bank_size;
    }

    if written != profile.total_size() {
        return Err(Error::ImageLength {
            expected: profile.total_size(),
            actual: written,
        });
    }

    Ok(written)
}

/// Assemble the image into a temporary sibling of `out_path` and rename it
/// into place once complete.
///
/// On any failure the temporary file is removed and nothing appears under
/// the final name; a half-written image is indistinguishable from a valid
/// one by eye, so it must never be left behind.
pub fn build_image(
    profile: &ChipProfile,
    placement: &Placement,
    bootstrap: &[u8],
    out_path: &Path,
) -> Result<u64> {
    let tmp_path = tmp_sibling(out_path);

    let committed = write_image(profile, placement, bootstrap, &tmp_path).and_then(|len| {
        fs::rename(&tmp_path, out_path)?;

        Ok(len)
    });

    if committed.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }

    committed
}

fn write_image(
    profile: &ChipProfile,
    placement: &Placement,
    bootstrap: &[u8],
    path: &Path,
) -> Result<u64> {
    let file = fs::File::create(path)?;
    let mut sink = io::BufWriter::new(file);
    let len = assemble_into(profile, placement, bootstrap, &mut sink)?;

    sink.flush()?;

    Ok(len)
}

fn tmp_sibling(out_path: &Path) -> PathBuf {
    let mut name = out_path
        .file_name()
        .map(ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");

    out_path.with_file_name(name)
}

/// Copy one ROM's bytes to the sink, holding the file open only for the
/// duration of the copy.
fn copy_rom<W: Write>(rom: &RomFile, sink: &mut W) -> Result<()> {
    let file = fs::File::open(rom.path())?;
    let actual = file.metadata()?.len();

    if actual != rom.size() {
        return Err(Error::SourceSizeMismatch {
            path: rom.path().to_path_buf(),
            expected: rom.size(),
            actual,
        });
    }

    // Never read past the recorded length, even if the file grows mid-copy.
    let copied = io::copy(&mut file.take(rom.size()), sink)?;

    if copied != rom.size() {
        return Err(Error::SourceSizeMismatch {
            path: rom.path().to_path_buf(),
            expected: rom.size(),
            actual: copied,
        });
    }

    Ok(())
}

fn pad_zero<W: Write>(sink: &mut W, count: u64) -> Result<()> {
    let zeroes = [0u8; PAD_CHUNK];
    let mut remaining = count;

    while remaining > 0 {
        let chunk = remaining.min(PAD_CHUNK as u64) as usize;
        sink.write_all(&zeroes[..chunk])?;
        remaining -= chunk as u64;
    }

    Ok(())
}

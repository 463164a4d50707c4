//! Console input helpers and ROM discovery for the interactive driver.

use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::fs;

/// List candidate ROM files (`*.gb`) in a directory, sorted by name so the
/// menu is stable between runs.
pub fn discover_roms(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut roms = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.extension() == Some(OsStr::new("gb")) && path.is_file() {
            roms.push(path);
        }
    }

    roms.sort();

    Ok(roms)
}

/// Print a prompt and read one trimmed line from stdin.
pub fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{} ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "End of input while waiting for a selection",
        ));
    }

    Ok(line.trim().to_string())
}

/// Ask for a menu selection between 0 and `max` inclusive, retrying until
/// the input parses.
pub fn prompt_selection(prompt: &str, max: usize) -> io::Result<usize> {
    loop {
        match prompt_line(prompt)?.parse::<usize>() {
            Ok(n) if n <= max => return Ok(n),
            _ => eprintln!("Wrong selection: enter any number from 0-{}", max),
        }
    }
}

/// Ask a yes/no question.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    Ok(prompt_line(prompt)?.eq_ignore_ascii_case("y"))
}

/// Clear the terminal between menu passes.
pub fn clear_screen() {
    // ANSI clear-and-home; terminals that ignore it just scroll.
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

#[macro_use]
extern crate clap;

#[macro_use]
extern crate serde_plain;

mod alloc;
mod cli;
mod image;
mod input;
mod plan;
mod project;

use std::io;

fn main() -> io::Result<()> {
    cli::main()
}

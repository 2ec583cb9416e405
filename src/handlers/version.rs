use anyhow::Result;
use colored::*;
use runcmd::{check_minimum_version, toolchain_version};

pub fn handle_check_version(major: u32, minor: u32) -> Result<()> {
    check_minimum_version(major, minor)?;
    Ok(())
}

pub fn handle_version() -> Result<()> {
    match toolchain_version() {
        Some(v) => println!("runcmd {} (rustc {})", env!("CARGO_PKG_VERSION"), v),
        None => println!("runcmd {} (rustc {})", env!("CARGO_PKG_VERSION"), "unknown".yellow()),
    }
    Ok(())
}

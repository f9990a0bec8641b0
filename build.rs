// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Build script for the IR light firmware
//!
//! Puts the RP2350 memory layout where `cortex-m-rt` can find it:
//! - Copies `memory.x` to the build output directory
//! - Adds that directory to the linker search path
//! - Rebuilds when `memory.x` changes
//!
//! The `-Tlink.x` and `-Tdefmt.x` arguments only apply to the bare-metal
//! target (see `.cargo/config.toml`), so host builds of the library and its
//! tests are unaffected.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Copies `memory.x` into `OUT_DIR` and points the linker at it.
///
/// # Errors
/// Fails the build if `OUT_DIR` is missing or `memory.x` cannot be written.
fn main() -> io::Result<()> {
    let out = PathBuf::from(
        env::var_os("OUT_DIR").ok_or_else(|| io::Error::other("OUT_DIR not set"))?,
    );

    fs::write(out.join("memory.x"), include_bytes!("memory.x"))?;

    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");
    Ok(())
}

//! Loads a ROM image from disk. No header, no checksum, no banking: the raw
//! file bytes become the ROM region verbatim.

use std::fs;
use std::path::Path;

use crate::error::LoadError;

pub fn load_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, LoadError> {
    let bytes = fs::read(path)?;
    Ok(bytes)
}

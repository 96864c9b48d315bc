//! NANDPU: a cycle-stepped emulator for a custom 8-bit processor.
//!
//! The engine (fetch-decode-execute, register file, memory map) is the core
//! of this crate; everything else here is the ambient CLI/loader shell
//! needed to run a ROM image from the command line.

pub mod args;
pub mod constants;
pub mod decoder;
pub mod engine;
pub mod error;
pub mod loader;
pub mod memory;
pub mod register;

pub use engine::Engine;

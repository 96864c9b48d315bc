use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the NANDPU CLI driver.
#[derive(Parser, Debug)]
#[command(about = "Runs a NANDPU ROM image to completion or a step cap")]
pub struct Args {
    /// Path to a flat ROM image; offset 0 maps to address 0x0000.
    pub rom: PathBuf,

    /// Stop after this many steps even if the program hasn't halted.
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Write the final RAM contents to this path after execution stops.
    #[arg(long)]
    pub dump_memory: Option<PathBuf>,
}

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use nandpu_rs::args::Args;
use nandpu_rs::loader;
use nandpu_rs::Engine;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let rom = match loader::load_rom(&args.rom) {
        Ok(rom) => rom,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = Engine::new(&rom);
    let mut steps = 0u64;

    loop {
        if let Some(max_steps) = args.max_steps {
            if steps >= max_steps {
                info!("stopping: reached --max-steps={max_steps}");
                break;
            }
        }
        if !engine.step() {
            info!("halted after {} steps", steps + 1);
            break;
        }
        steps += 1;
    }

    println!("{}", engine.registers());

    if let Some(dump_path) = &args.dump_memory {
        let ram: Vec<u8> = (0x8000..=0xFFFFu32).map(|addr| engine.memory().read(addr as u16)).collect();
        if let Err(err) = fs::write(dump_path, &ram) {
            eprintln!("error: failed to write memory dump: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use emu::{
    bus::Bus, cartridge_header::CartridgeHeader, cpu::arm7tdmi::Arm7tdmi, cpu::error::CpuError,
    internal_memory::InternalMemory,
};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(version, about = "Runs a GBA ROM on the ARM7TDMI core without a frontend")]
struct Args {
    /// Path to the ROM file
    #[arg(long)]
    rom: PathBuf,

    /// Path to a BIOS image, a zero filled one is used otherwise
    #[arg(long)]
    bios: Option<PathBuf>,

    /// Stop before executing the instruction at this address (hex)
    #[arg(long, value_parser = parse_hex)]
    halt: Option<u32>,

    /// Stop after this many steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum RunnerError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cpu stopped after {steps} steps: {source}")]
    Cpu { steps: u64, source: CpuError },
}

fn parse_hex(value: &str) -> Result<u32, std::num::ParseIntError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    u32::from_str_radix(digits, 16)
}

fn read_file(path: &Path) -> Result<Vec<u8>, RunnerError> {
    fs::read(path).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Console logging filtered by `RUST_LOG` (default `info`), plus an
/// optional file. The returned guard flushes the file on drop.
fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>, RunnerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_target(false);

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(filter).with(console).init();
        return Ok(None);
    };

    let file = fs::File::create(path).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    Ok(Some(guard))
}

fn dump_registers(cpu: &Arm7tdmi) {
    for (index, value) in cpu.registers.visible().iter().enumerate() {
        tracing::info!("R{index:<2} = 0x{value:08X}");
    }
    tracing::info!("CPSR = 0x{:08X}", u32::from(cpu.cpsr));
}

fn run(args: &Args) -> Result<u64, RunnerError> {
    let rom = read_file(&args.rom)?;
    let bios = match &args.bios {
        Some(path) => read_file(path)?,
        None => Vec::new(),
    };

    match CartridgeHeader::new(&rom) {
        Ok(header) => tracing::info!("{header}"),
        Err(e) => tracing::warn!("invalid cartridge header: {e}"),
    }

    let bus = Bus::with_memory(InternalMemory::new(bios, rom));
    let mut cpu = Arm7tdmi::new(bus);
    if let Some(address) = args.halt {
        cpu = cpu.with_halt_address(address);
    }

    let mut steps = 0;
    let result = loop {
        if args.max_steps.is_some_and(|max| steps >= max) {
            tracing::info!("step limit reached");
            break Ok(steps);
        }

        match cpu.step() {
            Ok(true) => steps += 1,
            Ok(false) => {
                tracing::info!("halt address reached");
                break Ok(steps);
            }
            Err(source) => break Err(RunnerError::Cpu { steps, source }),
        }
    };

    dump_registers(&cpu);

    result
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _guard = match init_logging(args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    tracing::info!("kumquat v{}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(steps) => {
            tracing::info!("executed {steps} steps");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn check_parse_hex() {
        assert_eq!(parse_hex("0x080000C0"), Ok(0x0800_00C0));
        assert_eq!(parse_hex("80000c0"), Ok(0x0800_00C0));
        assert!(parse_hex("0xZZ").is_err());
    }

    #[test]
    fn check_args() {
        let args = Args::parse_from([
            "kumquat",
            "--rom",
            "game.gba",
            "--halt",
            "0x08000100",
            "--max-steps",
            "10",
        ]);

        assert_eq!(args.rom, PathBuf::from("game.gba"));
        assert_eq!(args.halt, Some(0x0800_0100));
        assert_eq!(args.max_steps, Some(10));
        assert_eq!(args.bios, None);
    }
}

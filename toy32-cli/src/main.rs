//! toy32 command-line runner
//!
//! Boots a machine, loads an assembly file, prints the machine before and
//! after the run.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use toy32_disassembler::disassemble;
use toy32_runtime::dump::{dump_hex, dump_memory, dump_registers};
use toy32_runtime::{CpuState, ExecutionResult, Machine, MachineConfig, MemoryRegion};
use toy32_spec::layout::DEFAULT_SEGMENT_SIZE;
use toy32_spec::MemoryLayout;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "toy32", version, about = "Assemble and run a toy32 program")]
struct Args {
    /// Assembly source file
    #[arg(value_name = "FILE")]
    source: PathBuf,

    /// Program segment size in bytes
    #[arg(long, default_value_t = DEFAULT_SEGMENT_SIZE)]
    program_size: u32,

    /// Data segment size in bytes
    #[arg(long, default_value_t = DEFAULT_SEGMENT_SIZE)]
    data_size: u32,

    /// Stack segment size in bytes
    #[arg(long, default_value_t = DEFAULT_SEGMENT_SIZE)]
    stack_size: u32,

    /// Stop after this many instructions
    #[arg(long, value_name = "N")]
    max_cycles: Option<u64>,

    /// Also print a hex dump of every segment after the run
    #[arg(long, default_value_t = false)]
    dump: bool,

    /// Print a disassembly listing instead of running
    #[arg(long, default_value_t = false)]
    disassemble: bool,

    /// Print a JSON run report instead of the text dumps
    #[arg(long, default_value_t = false, conflicts_with = "disassemble")]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report<'a> {
    source: &'a PathBuf,
    layout: MemoryLayout,
    #[serde(flatten)]
    result: Option<&'a ExecutionResult>,
    error: Option<String>,
    registers: &'a CpuState,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_state(machine: &Machine) -> Result<()> {
    println!("{}", dump_registers(machine.state())?);
    println!("{}", dump_memory(machine.memory())?);
    Ok(())
}

fn run(args: &Args) -> Result<ExitCode> {
    let layout = MemoryLayout::new(args.program_size, args.data_size, args.stack_size)
        .context("invalid segment sizes")?;
    let config = MachineConfig {
        layout,
        max_cycles: args.max_cycles,
    };

    let mut machine = Machine::boot(config).context("failed to boot machine")?;
    machine
        .load_file(&args.source)
        .with_context(|| format!("failed to load {}", args.source.display()))?;
    debug!(source = %args.source.display(), "loaded");

    if args.disassemble {
        if let Some(program) = machine.program() {
            print!("{}", disassemble(program, &layout)?);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !args.json {
        print_state(&machine)?;
    }

    let outcome = machine.run();

    if args.json {
        let report = Report {
            source: &args.source,
            layout,
            result: outcome.as_ref().ok(),
            error: outcome.as_ref().err().map(|e| e.to_string()),
            registers: machine.state(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_state(&machine)?;
        if args.dump {
            for region in MemoryRegion::ALL {
                println!("{}:", region.name());
                print!("{}", dump_hex(machine.memory(), region)?);
            }
        }
    }

    match outcome {
        Ok(result) => {
            if !args.json {
                println!(
                    "Halted after {} cycles ({:?}), {} memory faults, {} words on the stack",
                    result.cycles, result.halt_reason, result.memory_faults, result.stack_depth
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error: {} ({} words on the stack)", e, machine.stack_depth());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

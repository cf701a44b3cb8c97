//! `intcode`: run, compose and inspect Intcode programs

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use intcode_assembler::{assemble, load_file};
use intcode_disassembler::disassemble;
use intcode_runtime::{
    max_thrust, AsciiOutput, AsciiTerminal, Machine, MachineConfig, Network, NetworkConfig,
    Topology,
};
use intcode_spec::{Program, Word};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "intcode", version, about = "Run, compose and inspect Intcode programs")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a program to completion and print its output
    Run {
        program: PathBuf,

        /// Input word; repeat for more
        #[arg(short, long = "input", allow_negative_numbers = true)]
        inputs: Vec<Word>,

        /// Print output as ASCII text
        #[arg(long)]
        ascii: bool,

        /// Log every instruction (needs -vvv)
        #[arg(long)]
        trace: bool,
    },

    /// Find the phase order with the highest amplifier signal
    Amplify {
        program: PathBuf,

        /// Wire the last amplifier back to the first (phases 5..=9)
        #[arg(long)]
        feedback: bool,
    },

    /// Run a packet network until the NAT repeats itself
    Network {
        program: PathBuf,

        /// Number of machines; packets for any higher address go to the NAT
        #[arg(long, default_value_t = 50)]
        size: usize,

        /// Give up after this many ticks
        #[arg(long)]
        tick_limit: Option<u64>,
    },

    /// Talk to an ASCII program, from a script or interactively on stdin
    Ascii {
        program: PathBuf,

        /// One command per line
        #[arg(long)]
        script: Option<PathBuf>,
    },

    /// Print an assembly listing of a program
    Disasm { program: PathBuf },

    /// Assemble source into comma-separated program text
    Assemble { source: PathBuf },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_program(path: &Path) -> Result<Program> {
    let program =
        load_file(path).with_context(|| format!("failed to load {}", path.display()))?;
    if program.is_empty() {
        bail!("{} contains no program", path.display());
    }
    Ok(program)
}

fn run(path: &Path, inputs: Vec<Word>, ascii: bool, trace: bool) -> Result<()> {
    let program = read_program(path)?;
    let mut machine = Machine::with_config(&program, MachineConfig { trace });
    machine.push_inputs(inputs);
    machine.run_until_halt()?;
    info!(steps = machine.steps(), "program halted");

    let output = machine.drain_output();
    if ascii {
        print!("{}", AsciiOutput::from_words(output));
    } else {
        for word in output {
            println!("{}", word);
        }
    }
    Ok(())
}

fn amplify(path: &Path, feedback: bool) -> Result<()> {
    let program = read_program(path)?;
    let (topology, phases) = if feedback {
        (Topology::Feedback, [5, 6, 7, 8, 9])
    } else {
        (Topology::Pipeline, [0, 1, 2, 3, 4])
    };

    let best = max_thrust(&program, &phases, topology)?;
    let order: Vec<String> = best.phases.iter().map(Word::to_string).collect();
    println!("{} (phases {})", best.signal, order.join(","));
    Ok(())
}

fn network(path: &Path, config: NetworkConfig) -> Result<()> {
    let program = read_program(path)?;
    info!(size = config.size, "starting network");
    let mut network = Network::new(&program, config)?;
    let outcome = network.run()?;
    println!("first NAT y: {}", outcome.first_nat_y);
    println!("repeated NAT y: {}", outcome.repeated_y);
    Ok(())
}

fn ascii(path: &Path, script: Option<&Path>) -> Result<()> {
    let program = read_program(path)?;
    let mut terminal = AsciiTerminal::new(&program);

    if let Some(script) = script {
        let text = fs::read_to_string(script)
            .with_context(|| format!("failed to read {}", script.display()))?;
        let lines = text.lines().map(str::trim_end).filter(|l| !l.is_empty());
        print!("{}", terminal.run_script(lines)?);
        return Ok(());
    }

    print!("{}", terminal.read()?);
    io::stdout().flush()?;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if terminal.is_halted() {
            break;
        }
        print!("{}", terminal.command(line?.trim_end())?);
        io::stdout().flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run {
            program,
            inputs,
            ascii,
            trace,
        } => run(&program, inputs, ascii, trace),
        Command::Amplify { program, feedback } => amplify(&program, feedback),
        Command::Network {
            program,
            size,
            tick_limit,
        } => network(
            &program,
            NetworkConfig {
                size,
                tick_limit,
                ..NetworkConfig::default()
            },
        ),
        Command::Ascii { program, script } => ascii(&program, script.as_deref()),
        Command::Disasm { program } => {
            print!("{}", disassemble(&read_program(&program)?));
            Ok(())
        }
        Command::Assemble { source } => {
            let text = fs::read_to_string(&source)
                .with_context(|| format!("failed to read {}", source.display()))?;
            println!("{}", assemble(&text)?);
            Ok(())
        }
    }
}

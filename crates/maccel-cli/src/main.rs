//! `maccel` — command-line interface for the maccel PE model.
//!
//! ```text
//! USAGE:
//!   maccel conformance [--verbose]    Run the PE conformance suite
//!   maccel mac --weight W --data D    One multiply-accumulate through the pipeline
//!   maccel trace [--pairs N]          Per-cycle trace of a load-and-stream sequence
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use maccel_pe::ports::{Word, MAC_LATENCY_CYCLES};
use maccel_sim::{ConformanceSuite, TestBench};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maccel", about = "Cycle-accurate MAC processing element model", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the full conformance suite against the PE model.
    Conformance {
        /// Print each check's observation, not just pass/fail.
        #[arg(long)]
        verbose: bool,
    },
    /// Push one multiply-accumulate through the two-stage pipeline.
    Mac {
        /// Value to latch into the weight register.
        #[arg(long)]
        weight: Word,
        /// Operand streamed on data_in.
        #[arg(long)]
        data: Word,
        /// Partial sum streamed on acc_in.
        #[arg(long, default_value_t = 0)]
        acc: Word,
    },
    /// Print the per-cycle trace of a canned load-and-stream sequence.
    Trace {
        /// Number of operand pairs to stream after the weight load.
        #[arg(long, default_value_t = 4)]
        pairs: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::Conformance { verbose } => cmd_conformance(verbose),
        Cmd::Mac { weight, data, acc } => {
            cmd_mac(weight, data, acc);
            Ok(())
        }
        Cmd::Trace { pairs } => {
            cmd_trace(pairs);
            Ok(())
        }
    }
}

fn cmd_conformance(verbose: bool) -> Result<()> {
    let suite = ConformanceSuite::run_all();

    println!("PE conformance suite: {} checks", suite.results().len());
    println!();
    for (name, result) in suite.results() {
        let status = if result.passed { "PASS" } else { "FAIL" };
        println!("[{status}] {name}");
        if verbose || !result.passed {
            println!("       {}", result.message);
        }
    }
    println!();
    println!("{} passed, {} failed", suite.passed(), suite.failed());

    if !suite.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_mac(weight: Word, data: Word, acc: Word) {
    let mut bench = TestBench::new();
    bench.reset(3);
    bench.load_weight(weight);
    for _ in 0..MAC_LATENCY_CYCLES {
        bench.stream(data, acc);
    }

    println!("weight    : {weight}");
    println!("data_in   : {data}");
    println!("acc_in    : {acc}");
    println!("acc_out   : {}   ({MAC_LATENCY_CYCLES} cycles after enable)", bench.acc_out());
    println!("data_out  : {}", bench.data_out());
}

fn cmd_trace(pairs: u64) {
    let mut bench = TestBench::new();
    bench.reset(3);
    bench.load_weight(3);
    for i in 0..pairs {
        // Distinct, easily eyeballed operands per cycle
        let i = Word::try_from(i).unwrap_or(Word::MAX);
        bench.stream(i + 1, 10 * i);
    }
    bench.idle();

    print!("{}", bench.trace().render());
}

// crates/lazyseq-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lazyseq_core::io_jsonl::{from_jsonl_path, write_jsonl, write_jsonl_path};
use lazyseq_core::prelude::*;
use rand::{rngs::StdRng, Rng as _, SeedableRng};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "lazyseq",
    about = "Lazy sequence pipelines over JSON Lines",
    long_about = "Lazy sequence pipelines over JSON Lines.\n\nEach subcommand reads one value per input line, applies one combinator lazily, and writes one value per output line.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate a synthetic random value stream as JSONL (for demos/benches).
    Synth {
        /// Number of values to emit
        #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        /// RNG seed for reproducible streams
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Partition the input into chunks (optionally overlapping).
    Chunk {
        /// Input JSONL path, or `-` for stdin
        input: PathBuf,

        /// Chunk size (>= 1; validated lazily, like the library)
        #[arg(long)]
        size: i64,

        /// Overlap between consecutive chunks (< size)
        #[arg(long)]
        overlap: Option<i64>,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Emit consecutive overlapping pairs.
    Pairwise {
        /// Input JSONL path, or `-` for stdin
        input: PathBuf,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Stable sort under the natural cross-kind order (eager on input).
    Sort {
        /// Input JSONL path, or `-` for stdin
        input: PathBuf,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Group values; each output line is `[key, [members...]]`.
    Group {
        /// Input JSONL path, or `-` for stdin
        input: PathBuf,

        /// Group list elements by the field at this position
        /// (scalars group by themselves when omitted)
        #[arg(long)]
        index: Option<usize>,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Count value frequencies; each output line is `[value, count]`.
    Freq {
        /// Input JSONL path, or `-` for stdin
        input: PathBuf,

        /// Collapse loosely equal values (0, "0", null, false) into one key
        #[arg(long)]
        coercive: bool,

        /// Emit fractions of the total instead of absolute counts
        #[arg(long)]
        relative: bool,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Apply a running (scan) reducer.
    Running {
        /// Input JSONL path, or `-` for stdin
        input: PathBuf,

        /// Which reducer to run
        #[arg(value_enum, long)]
        op: RunningOp,

        /// Optional seed, as a JSON value (emitted first)
        #[arg(long)]
        seed: Option<String>,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Zip several inputs in lock-step; each line is a tuple list.
    Zip {
        /// Input JSONL paths
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Chain several inputs end to end.
    Chain {
        /// Input JSONL paths
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output path (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RunningOp {
    Total,
    Product,
    Difference,
    Max,
    Min,
    Average,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Synth { count, seed, out } => synth(count, seed, out),

        Cmd::Chunk {
            input,
            size,
            overlap,
            out,
        } => {
            let seq = open_input(&input)?;
            match overlap {
                Some(o) => emit(out, seq.chunkwise_overlap(size, o)),
                None => emit(out, seq.chunkwise(size)),
            }
        }

        Cmd::Pairwise { input, out } => {
            let seq = open_input(&input)?;
            emit(out, seq.pairwise())
        }

        Cmd::Sort { input, out } => {
            let seq = open_input(&input)?;
            emit(out, seq.sorted())
        }

        Cmd::Group { input, index, out } => group(input, index, out),

        Cmd::Freq {
            input,
            coercive,
            relative,
            out,
        } => freq(input, coercive, relative, out),

        Cmd::Running {
            input,
            op,
            seed,
            out,
        } => running(input, op, seed, out),

        Cmd::Zip { inputs, out } => {
            let srcs = open_all(&inputs)?;
            emit(out, zip(srcs))
        }

        Cmd::Chain { inputs, out } => {
            let srcs = open_all(&inputs)?;
            emit(out, chain(srcs))
        }
    }
}

/// Open one JSONL input, `-` meaning stdin.
fn open_input(path: &Path) -> Result<Sequence> {
    if path.as_os_str() == "-" {
        return Ok(Sequence::from_jsonl(io::BufReader::new(io::stdin())));
    }
    from_jsonl_path(path).with_context(|| format!("open {}", path.display()))
}

fn open_all(paths: &[PathBuf]) -> Result<Vec<BoxSequence>> {
    paths
        .iter()
        .map(|p| Ok(open_input(p)?.boxed()))
        .collect()
}

/// Drain a pipeline to `out` (or stdout), one JSON value per line.
fn emit<I>(out: Option<PathBuf>, seq: I) -> Result<()>
where
    I: Iterator<Item = Pull>,
{
    match out {
        Some(path) => {
            write_jsonl_path(&path, seq).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let stdout = io::stdout();
            write_jsonl(stdout.lock(), seq).context("write stdout")?;
        }
    }
    Ok(())
}

fn synth(count: u32, seed: u64, out: Option<PathBuf>) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = (0..count).map(move |_| match rng.random_range(0..5) {
        0 => Value::Int(rng.random_range(-50i64..=50)),
        1 => Value::Float(f64::from(rng.random_range(-500i32..=500)) / 10.0),
        2 => Value::Str(format!("s{}", rng.random_range(0u32..10))),
        3 => Value::Bool(rng.random_bool(0.5)),
        _ => Value::Null,
    });
    info!(count, seed, "generating synthetic stream");
    emit(out, Sequence::from_single_pass(values))
}

fn group(input: PathBuf, index: Option<usize>, out: Option<PathBuf>) -> Result<()> {
    let seq = open_input(&input)?;
    let selector = move |v: &Value| match (index, v) {
        (Some(i), Value::List(l)) => l.get(i).cloned().unwrap_or(Value::Null),
        _ => v.clone(),
    };
    let rows = seq.group_by(selector).map(|r| {
        r.map(|g| {
            let key = Value::from(g.key.clone());
            (g.key.clone(), Value::List(vec![key, g.into_value()]))
        })
    });
    emit(out, rows)
}

fn freq(input: PathBuf, coercive: bool, relative: bool, out: Option<PathBuf>) -> Result<()> {
    let seq = open_input(&input)?;
    let strict = !coercive;
    if relative {
        let rows = seq.relative_frequencies(strict).enumerate().map(|(i, r)| {
            r.map(|(v, share)| {
                (
                    Key::Int(i as i64),
                    Value::List(vec![v, Value::Float(share)]),
                )
            })
        });
        emit(out, rows)
    } else {
        let rows = seq.frequencies(strict).enumerate().map(|(i, r)| {
            r.map(|(v, n)| {
                (
                    Key::Int(i as i64),
                    Value::List(vec![v, Value::Int(n as i64)]),
                )
            })
        });
        emit(out, rows)
    }
}

fn running(input: PathBuf, op: RunningOp, seed: Option<String>, out: Option<PathBuf>) -> Result<()> {
    let seed = match seed {
        None => None,
        Some(text) => {
            let v: Value = serde_json::from_str(&text)
                .with_context(|| format!("--seed is not valid JSON: {text}"))?;
            Some(v)
        }
    };
    let seq = open_input(&input)?;
    match op {
        RunningOp::Total => emit(out, seq.running_total(seed)),
        RunningOp::Product => emit(out, seq.running_product(seed)),
        RunningOp::Difference => emit(out, seq.running_difference(seed)),
        RunningOp::Max => emit(out, seq.running_max(seed)),
        RunningOp::Min => emit(out, seq.running_min(seed)),
        RunningOp::Average => emit(out, seq.running_average(seed)),
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

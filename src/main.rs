use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use iterkit::{
    BinaryFn, ClampConfig, DeepFlattenConfig, MinMaxOptions, Source, UnaryFn, Value,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "iterkit", about = "Run lazy iterator transformations over literal values")]
struct Cli {
    /// Stop after this many output items.
    #[arg(long, global = true)]
    limit: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Op {
    Add,
    Mul,
}

impl Op {
    fn binary(self) -> BinaryFn {
        match self {
            Op::Add => BinaryFn::add(),
            Op::Mul => BinaryFn::mul(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Running totals.
    Accumulate {
        /// Iterable literal, e.g. `[1, 2, 3]`.
        iterable: String,
        /// Combining operator.
        #[arg(long, value_enum, default_value_t = Op::Add)]
        op: Op,
        /// Seed of the running total.
        #[arg(long)]
        initial: Option<String>,
    },
    /// Repeated application of `x op operand`, starting at `initial`.
    Applyfunc {
        /// Starting value.
        initial: String,
        /// Operator applied each step.
        #[arg(long, value_enum, default_value_t = Op::Mul)]
        op: Op,
        /// Right operand of every step.
        #[arg(long, default_value = "2")]
        operand: String,
    },
    /// Filter or clip items to a range.
    Clamp {
        /// Iterable literal.
        iterable: String,
        /// Lower bound.
        #[arg(long)]
        low: Option<String>,
        /// Upper bound.
        #[arg(long)]
        high: Option<String>,
        /// Also drop items equal to a bound.
        #[arg(long)]
        inclusive: bool,
        /// Replace out-of-range items by the nearest bound instead of dropping them.
        #[arg(long)]
        clip: bool,
    },
    /// Flatten nested iterables.
    Deepflatten {
        /// Iterable literal.
        iterable: String,
        /// Maximum depth to descend.
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Items seen before.
    Duplicates {
        /// Iterable literal.
        iterable: String,
    },
    /// Fill value between items.
    Intersperse {
        /// Iterable literal.
        iterable: String,
        /// Fill value literal.
        fill: String,
    },
    /// Repeat every item.
    Replicate {
        /// Iterable literal.
        iterable: String,
        /// Repeat count (> 1).
        times: usize,
    },
    /// Sliding windows.
    Successive {
        /// Iterable literal.
        iterable: String,
        /// Window width.
        #[arg(long, default_value_t = 2)]
        times: usize,
    },
    /// First occurrences only.
    UniqueEverseen {
        /// Iterable literal.
        iterable: String,
    },
    /// Minimum and maximum.
    Minmax {
        /// Iterable literal, or two or more scalar literals.
        #[arg(required = true)]
        args: Vec<String>,
        /// Result for an empty iterable.
        #[arg(long)]
        default: Option<String>,
    },
    /// Check that neighbouring items are ordered.
    AllMonotone {
        /// Iterable literal.
        iterable: String,
        /// Require a decreasing order.
        #[arg(long)]
        decreasing: bool,
        /// Disallow equal neighbours.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let limit = cli.limit;

    match cli.command {
        Commands::Accumulate {
            iterable,
            op,
            initial,
        } => {
            let initial = initial.as_deref().map(parse_value).transpose()?;
            let it = iterkit::accumulate(&parse_value(&iterable)?, Some(op.binary()), initial)
                .context("failed to build accumulate")?;
            emit(it, limit)?
        }
        Commands::Applyfunc {
            initial,
            op,
            operand,
        } => {
            let Some(limit) = limit else {
                bail!("applyfunc never ends on its own; pass --limit");
            };
            let operand = parse_value(&operand)?;
            let step = op.binary();
            let func = UnaryFn::named("step", move |x| step.call(x, &operand));
            emit(iterkit::applyfunc(func, parse_value(&initial)?), Some(limit))?
        }
        Commands::Clamp {
            iterable,
            low,
            high,
            inclusive,
            clip,
        } => {
            let mut config = ClampConfig::default()
                .with_inclusive(inclusive)
                .with_remove(!clip);
            if let Some(low) = low {
                config = config.with_low(parse_value(&low)?);
            }
            if let Some(high) = high {
                config = config.with_high(parse_value(&high)?);
            }
            let it = iterkit::clamp(&parse_value(&iterable)?, config)
                .context("failed to build clamp")?;
            emit(it, limit)?
        }
        Commands::Deepflatten { iterable, depth } => {
            let mut config = DeepFlattenConfig::default();
            if let Some(depth) = depth {
                config = config.with_max_depth(depth);
            }
            let it = iterkit::deepflatten(&parse_value(&iterable)?, config)
                .context("failed to build deepflatten")?;
            emit(it, limit)?
        }
        Commands::Duplicates { iterable } => {
            let it = iterkit::duplicates(&parse_value(&iterable)?, None)
                .context("failed to build duplicates")?;
            emit(it, limit)?
        }
        Commands::Intersperse { iterable, fill } => {
            let it = iterkit::intersperse(&parse_value(&iterable)?, parse_value(&fill)?)
                .context("failed to build intersperse")?;
            emit(it, limit)?
        }
        Commands::Replicate { iterable, times } => {
            let it = iterkit::replicate(&parse_value(&iterable)?, times)
                .context("failed to build replicate")?;
            emit(it, limit)?
        }
        Commands::Successive { iterable, times } => {
            let it = iterkit::successive(&parse_value(&iterable)?, times)
                .context("failed to build successive")?;
            emit(it, limit)?
        }
        Commands::UniqueEverseen { iterable } => {
            let it = iterkit::unique_everseen(&parse_value(&iterable)?, None)
                .context("failed to build unique_everseen")?;
            emit(it, limit)?
        }
        Commands::Minmax { args, default } => {
            let args = args
                .iter()
                .map(|arg| parse_value(arg))
                .collect::<Result<Vec<_>>>()?;
            let mut options = MinMaxOptions::default();
            if let Some(default) = default {
                options = options.with_default(parse_value(&default)?);
            }
            let (lo, hi) = iterkit::minmax(&args, options).context("minmax failed")?;
            println!("{}", Value::tuple([lo, hi]));
        }
        Commands::AllMonotone {
            iterable,
            decreasing,
            strict,
        } => {
            let ordered = iterkit::all_monotone(&parse_value(&iterable)?, decreasing, strict)
                .context("all_monotone failed")?;
            println!("{}", Value::Bool(ordered));
        }
    }

    Ok(())
}

fn parse_value(literal: &str) -> Result<Value> {
    literal
        .parse()
        .with_context(|| format!("failed to parse literal `{literal}`"))
}

fn emit(mut it: impl Source, limit: Option<usize>) -> Result<()> {
    let mut produced = 0usize;
    while limit.map_or(true, |limit| produced < limit) {
        let Some(item) = it
            .advance()
            .with_context(|| format!("{} failed after {produced} items", it.type_name()))?
        else {
            break;
        };
        println!("{item}");
        produced += 1;
    }
    Ok(())
}

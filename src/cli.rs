use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use num_bigint::BigInt;
use seed_digits::solver::constants::{
    DEFAULT_FACTORIAL_LIMIT, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_POWER_LIMIT,
    DEFAULT_SEARCH_DEPTH, DEFAULT_VALUE_MAX, DEFAULT_VALUE_MIN,
};
use seed_digits::utils::{validate_depth, validate_seed, validate_target};
use seed_digits::{ExpressionSolver, GenerationTrace, Node, SolverConfig, evaluate_evaluable};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Seed Digits - Reach a target integer using only one repeated digit
#[derive(Parser, Debug)]
#[command(name = "seed-digits")]
#[command(
    about = "Find an expression built from a single repeated digit that evaluates to a target integer"
)]
#[command(version)]
pub struct CliArgs {
    /// Positive integer to reach
    pub target: u64,

    /// Seed digit (1-9); every seed is tried when omitted
    pub seed: Option<u8>,

    /// Maximum number of seed digits in a solution
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    pub depth: usize,

    /// Print the size and value range of every generation
    #[arg(short, long)]
    pub trace: bool,

    /// Also print the evaluable form of each solution
    #[arg(short, long)]
    pub evaluable: bool,

    /// Re-evaluate each solution and check it against the target
    #[arg(long)]
    pub verify: bool,

    /// Smaller intermediate values are discarded
    #[arg(long, default_value_t = DEFAULT_VALUE_MIN)]
    pub value_min: f64,

    /// Larger intermediate values are discarded
    #[arg(long, default_value_t = DEFAULT_VALUE_MAX)]
    pub value_max: f64,

    /// Largest exponent tried in a power
    #[arg(long, default_value_t = DEFAULT_POWER_LIMIT)]
    pub power_limit: u64,

    /// Largest operand tried in a factorial
    #[arg(long, default_value_t = DEFAULT_FACTORIAL_LIMIT)]
    pub factorial_limit: u64,

    /// Generation size above which crossing runs in parallel
    #[arg(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    pub parallel_threshold: usize,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub target: u64,
    pub seeds: Vec<u8>,
    pub depth: usize,
    pub trace: bool,
    pub evaluable: bool,
    pub verify: bool,
    pub solver: SolverConfig,
    pub log_level: LogLevel,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self> {
        validate_target(args.target).context("Invalid target")?;
        validate_depth(args.depth).context("Invalid search depth")?;

        let seeds = match args.seed {
            Some(seed) => {
                validate_seed(seed).context("Invalid seed")?;
                vec![seed]
            }
            None => (1..=9).collect(),
        };

        ensure!(args.value_min > 0.0, "--value-min must be positive");
        ensure!(
            args.value_max > args.value_min,
            "--value-max must be greater than --value-min"
        );

        Ok(Self {
            target: args.target,
            seeds,
            depth: args.depth,
            trace: args.trace,
            evaluable: args.evaluable,
            verify: args.verify,
            solver: SolverConfig {
                value_min: args.value_min,
                value_max: args.value_max,
                power_limit: args.power_limit,
                factorial_limit: args.factorial_limit,
                parallel_threshold: args.parallel_threshold,
            },
            log_level: args.log_level,
        })
    }
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    CliConfig::try_from(CliArgs::parse())
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

// Every integer up to 2^53 is exactly representable as an f64
const F64_EXACT_INTEGER_LIMIT: u64 = 1 << 53;

/// Check that the evaluable form of `expr` rounds to `target`
///
/// Above 2^53 an f64 cannot tell neighbouring integers apart, so the float
/// evaluation only has to be well-formed and the node's exact value decides.
fn verify(expr: &Node, target: u64) -> Result<bool> {
    let value = evaluate_evaluable(&expr.evaluable())
        .with_context(|| format!("Failed to evaluate {}", expr.evaluable()))?;

    let matched = if target <= F64_EXACT_INTEGER_LIMIT {
        value.round() == target as f64
    } else {
        debug!(
            "Target {} is beyond f64 precision, comparing exact value {}",
            target,
            expr.value()
        );
        expr.recompute().equals_target(&BigInt::from(target))
    };

    if matched {
        info!("Verified {} = {}", expr.evaluable(), value);
    } else {
        warn!(
            "Verification failed: {} evaluates to {}, expected {}",
            expr.evaluable(),
            value,
            target
        );
    }
    Ok(matched)
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    let solver = ExpressionSolver::new(config.solver.clone());
    debug!("Solver limits: {:?}", solver.config());
    let mut print_trace = |record: &GenerationTrace| println!("{}", record);

    for &seed in &config.seeds {
        info!(
            "Searching for {} using seed {} with depth {}",
            config.target, seed, config.depth
        );

        let trace: Option<&mut dyn FnMut(&GenerationTrace)> = if config.trace {
            Some(&mut print_trace)
        } else {
            None
        };

        let result = solver
            .solve(config.target, seed, config.depth, trace)
            .with_context(|| format!("Search with seed {} failed", seed))?;

        match result {
            Some(expr) => {
                println!("{} = {}", config.target, expr);
                if config.evaluable {
                    println!("{} = {}", config.target, expr.evaluable());
                }
                if config.verify && !verify(&expr, config.target)? {
                    println!("Verification failed.");
                }
            }
            None => {
                warn!("No matching expression found for seed {}", seed);
                println!("{} = Not Found", config.target);
            }
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_digits::BinaryOp;

    fn parse(args: &[&str]) -> Result<CliConfig> {
        let args = CliArgs::try_parse_from(args)?;
        CliConfig::try_from(args)
    }

    #[test]
    fn test_single_seed() {
        let config = parse(&["seed-digits", "2016", "4"]);
        assert!(config.is_ok());
        if let Ok(config) = config {
            assert_eq!(config.target, 2016);
            assert_eq!(config.seeds, vec![4]);
            assert_eq!(config.depth, DEFAULT_SEARCH_DEPTH);
            assert_eq!(config.solver, SolverConfig::default());
        }
    }

    #[test]
    fn test_all_seeds_when_omitted() {
        let config = parse(&["seed-digits", "2016"]);
        assert!(config.is_ok());
        if let Ok(config) = config {
            assert_eq!(config.seeds, (1..=9).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn test_limits_flow_into_solver_config() {
        let config = parse(&[
            "seed-digits",
            "100",
            "7",
            "--depth",
            "6",
            "--value-max",
            "1e6",
            "--power-limit",
            "10",
            "--factorial-limit",
            "8",
            "--parallel-threshold",
            "500",
            "--trace",
        ]);
        assert!(config.is_ok());
        if let Ok(config) = config {
            assert_eq!(config.depth, 6);
            assert!(config.trace);
            assert_eq!(config.solver.value_max, 1e6);
            assert_eq!(config.solver.power_limit, 10);
            assert_eq!(config.solver.factorial_limit, 8);
            assert_eq!(config.solver.parallel_threshold, 500);
        }
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(parse(&["seed-digits", "0", "3"]).is_err());
        assert!(parse(&["seed-digits", "10", "0"]).is_err());
        assert!(parse(&["seed-digits", "10", "12"]).is_err());
        assert!(parse(&["seed-digits", "10", "3", "--depth", "0"]).is_err());
        assert!(parse(&["seed-digits", "10", "3", "--value-min", "0"]).is_err());
        assert!(parse(&["seed-digits", "-5"]).is_err());
    }

    #[test]
    fn test_verify() {
        let three = Node::literal(3, 1);
        let expr = Node::factorial(&three);
        assert!(matches!(verify(&expr, 6), Ok(true)));
        assert!(matches!(verify(&expr, 7), Ok(false)));
    }

    #[test]
    fn test_verify_beyond_f64_precision() {
        // 3 ^ 34 = 16677181699666569 is odd and sits above 2^53
        let exponent = Node::binary(BinaryOp::Add, &Node::literal(3, 2), &Node::literal(1, 1));
        let expr = Node::binary(BinaryOp::Pow, &Node::literal(3, 1), &exponent);
        let target = 16_677_181_699_666_569;
        assert!(target > F64_EXACT_INTEGER_LIMIT);
        assert!(matches!(verify(&expr, target), Ok(true)));
        assert!(matches!(verify(&expr, target + 1), Ok(false)));
        assert!(matches!(verify(&expr, target - 1), Ok(false)));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Error.to_log_level_filter(),
            log::LevelFilter::Error
        );
        assert_eq!(LogLevel::Warn.to_log_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_log_level_filter(), log::LevelFilter::Info);
        assert_eq!(
            LogLevel::Debug.to_log_level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(
            LogLevel::Trace.to_log_level_filter(),
            log::LevelFilter::Trace
        );
    }
}

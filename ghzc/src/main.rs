use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ghz::{
    CircuitGenerator, DistributionScorer, GhzConfig, Metrics, QubitCount, SampleDistribution,
};
use ghz_sim::{Backend, Circuit, StatevectorBackend};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate GHZ benchmark circuits and score measured distributions against the ideal state
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the OpenQASM text of a GHZ preparation circuit.
    Generate {
        #[command(flatten)]
        circuit: CircuitArgs,
        /// Append one measurement per qubit.
        #[arg(short, long)]
        measure: bool,
        /// Write the circuit here instead of stdout.
        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },
    /// Score a measured distribution (JSON) against the ideal GHZ distribution.
    Score {
        #[arg(short, long)]
        size: usize,
        /// Distribution as `[["000", 0.5], ...]`, `{"000": 0.5}` or `{"counts": {...}}`.
        #[arg(short, long)]
        input_file: PathBuf,
        /// JSON object of metrics the report is merged into.
        #[arg(short, long)]
        base_metrics: Option<PathBuf>,
    },
    /// Generate, execute on the built-in statevector backend, then score.
    Run {
        #[command(flatten)]
        circuit: CircuitArgs,
        /// Sample this many shots instead of reading exact probabilities.
        #[arg(long)]
        shots: Option<u32>,
        /// Seed for shot sampling.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct CircuitArgs {
    /// Number of qubits in the GHZ register.
    #[arg(short, long)]
    size: Option<usize>,
    /// OpenQASM dialect version (2 or 3).
    #[arg(short, long)]
    dialect: Option<u32>,
    /// JSON or YAML file with `size`, `measure` and `dialect`; flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CircuitArgs {
    fn resolve(&self, measure: bool) -> Result<GhzConfig> {
        let mut config = match &self.config {
            Some(path) => GhzConfig::from_path(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => GhzConfig::new(
                self.size
                    .context("either --size or --config must be given")?,
            ),
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(dialect) = self.dialect {
            config.dialect = dialect;
        }
        config.measure |= measure;
        Ok(config)
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_metrics(metrics: Metrics) -> Result<()> {
    let json_output = serde_json::to_string_pretty(&serde_json::Value::Object(metrics))?;
    println!("{}", json_output);
    Ok(())
}

fn generate(circuit: &CircuitArgs, measure: bool, output_file: Option<&Path>) -> Result<()> {
    let (size, generator) = circuit.resolve(measure)?.generator()?;
    let text = generator.generate(size)?;

    if let Some(output_path) = output_file {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(text.as_str().as_bytes())?;
        info!(path = %output_path.display(), qubits = size.get(), "wrote circuit");
    } else {
        io::stdout().write_all(text.as_str().as_bytes())?;
    }
    Ok(())
}

fn score(size: usize, input_file: &Path, base_metrics: Option<&Path>) -> Result<()> {
    print_metrics(score_metrics(size, input_file, base_metrics)?)
}

fn score_metrics(size: usize, input_file: &Path, base_metrics: Option<&Path>) -> Result<Metrics> {
    let observed = SampleDistribution::from_json(&read_json(input_file)?)
        .with_context(|| format!("Unusable distribution in {}", input_file.display()))?;
    let report = DistributionScorer::new(QubitCount::new(size)?).score(&observed)?;

    let base = match base_metrics {
        Some(path) => match read_json(path)? {
            serde_json::Value::Object(map) => map,
            other => anyhow::bail!("base metrics in {} must be a JSON object, got {other}", path.display()),
        },
        None => Metrics::new(),
    };
    Ok(report.metrics(base))
}

fn run(circuit: &CircuitArgs, shots: Option<u32>, seed: Option<u64>) -> Result<()> {
    let config = circuit.resolve(true)?;
    let (size, dialect) = config.validate()?;
    let text = CircuitGenerator::new(dialect, true).generate(size)?;

    let parsed = Circuit::from_qasm(text.as_str())?;
    let backend = seed.map_or_else(StatevectorBackend::new, StatevectorBackend::with_seed);
    let observed = match shots {
        Some(shots) => backend.sample(&parsed, shots)?,
        None => backend.probabilities(&parsed)?,
    };

    let report = DistributionScorer::new(size).score(&observed)?;
    let mut base = Metrics::new();
    base.insert("size".to_string(), size.get().into());
    base.insert("dialect".to_string(), u32::from(dialect).into());
    if let Some(shots) = shots {
        base.insert("shots".to_string(), shots.into());
    }
    print_metrics(report.metrics(base))
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            circuit,
            measure,
            output_file,
        } => generate(&circuit, measure, output_file.as_deref()),
        Command::Score {
            size,
            input_file,
            base_metrics,
        } => score(size, &input_file, base_metrics.as_deref()),
        Command::Run {
            circuit,
            shots,
            seed,
        } => run(&circuit, shots, seed),
    }
}

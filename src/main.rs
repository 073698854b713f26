use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metashift::config::CONFIG_FILE_NAME;
use metashift::pipeline;
use metashift::utils::shift_input::prompt_shift;
use metashift::verify::compare_files;
use metashift::{MatchResult, PipelineConfig, ShiftKey};

#[derive(Parser)]
#[command(
    name = "metashift",
    version,
    about = "Partition shift cipher: encrypt, decrypt and verify text with per-character metadata"
)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    /// Emit logs as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Path to a JSON pipeline config
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ShiftArgs {
    /// First shift parameter (prompted for if absent)
    #[arg(long, env = "METASHIFT_SHIFT1", allow_hyphen_values = true)]
    shift1: Option<i64>,
    /// Second shift parameter (prompted for if absent)
    #[arg(long, env = "METASHIFT_SHIFT2", allow_hyphen_values = true)]
    shift2: Option<i64>,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt the raw file, decrypt it back and verify the round trip
    Run {
        /// Directory holding the artifacts (overrides the config)
        #[arg(long)]
        dir: Option<PathBuf>,
        #[command(flatten)]
        shifts: ShiftArgs,
    },
    /// Encrypt a file, writing ciphertext and metadata
    Encrypt {
        /// Plaintext input
        #[arg(long)]
        input: PathBuf,
        /// Ciphertext output
        #[arg(long)]
        output: PathBuf,
        /// Metadata output
        #[arg(long)]
        meta: PathBuf,
        #[command(flatten)]
        shifts: ShiftArgs,
    },
    /// Decrypt a ciphertext file using its metadata
    Decrypt {
        /// Ciphertext input
        #[arg(long)]
        input: PathBuf,
        /// Metadata input
        #[arg(long)]
        meta: PathBuf,
        /// Plaintext output
        #[arg(long)]
        output: PathBuf,
        #[command(flatten)]
        shifts: ShiftArgs,
    },
    /// Compare two text files
    Verify {
        /// First file
        a: PathBuf,
        /// Second file
        b: PathBuf,
    },
    /// Write a default config file
    InitConfig {
        /// Destination (default: ./metashift.json)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn init_tracing(cli: &Cli) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn resolve_key(shifts: &ShiftArgs) -> anyhow::Result<ShiftKey> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let shift1 = match shifts.shift1 {
        Some(v) => v,
        None => prompt_shift(&mut input, &mut output, "shift1")?,
    };
    let shift2 = match shifts.shift2 {
        Some(v) => v,
        None => prompt_shift(&mut input, &mut output, "shift2")?,
    };
    Ok(ShiftKey::new(shift1, shift2))
}

fn load_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

fn report_match(result: MatchResult, a: &str, b: &str) -> ExitCode {
    match result {
        MatchResult::Equal => {
            println!("[SUCCESS] Decryption verified: {} matches {}", b, a);
            ExitCode::SUCCESS
        }
        MatchResult::DifferAt(index) => {
            println!("[WARNING] Files differ! First difference at index: {}", index);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Command::Run { dir, shifts } => {
            let mut config = load_config(cli)?;
            if let Some(dir) = dir {
                config.work_dir = dir.clone();
            }
            println!("=== MetaShift: Encrypt -> Decrypt -> Verify ===");
            let key = resolve_key(shifts)?;
            let report = pipeline::run(&config, key).context("pipeline failed")?;

            println!("[OK] Encrypted  -> {}", report.paths.encrypted.display());
            println!("[OK] Metadata   -> {}", report.paths.metadata.display());
            println!("[OK] Decrypted  -> {}", report.paths.decrypted.display());
            Ok(report_match(
                report.verification,
                &config.raw_file,
                &config.decrypted_file,
            ))
        }
        Command::Encrypt {
            input,
            output,
            meta,
            shifts,
        } => {
            let key = resolve_key(shifts)?;
            pipeline::encrypt_file(input, output, meta, key).context("encryption failed")?;
            println!("[OK] Encrypted  -> {}", output.display());
            println!("[OK] Metadata   -> {}", meta.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Decrypt {
            input,
            meta,
            output,
            shifts,
        } => {
            let key = resolve_key(shifts)?;
            pipeline::decrypt_file(input, meta, output, key).context("decryption failed")?;
            println!("[OK] Decrypted  -> {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { a, b } => {
            let result = compare_files(a, b)?;
            Ok(report_match(
                result,
                &a.display().to_string(),
                &b.display().to_string(),
            ))
        }
        Command::InitConfig { path, force } => {
            let path = path
                .clone()
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            PipelineConfig::default().save(&path)?;
            println!("[OK] Config     -> {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match execute(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

//! `bindable-gen`: run the generator over exported compilation models.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use walkdir::WalkDir;

use bindable_compiler::{
    generate_with, load_compilation, CancellationToken, GeneratorOptions, GeneratorOutput,
    OutputCache,
};

const MODEL_SUFFIX: &str = ".bindable.json";
const LOG_ENV: &str = "BINDABLE_LOG";

/// Bindable property generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Skip the static analyzers
    #[arg(long, global = true)]
    no_analyzers: bool,

    /// Do not decorate generated members with [GeneratedCode]
    #[arg(long, global = true)]
    no_generated_code_attribute: bool,

    /// Exit with a failure status when an error diagnostic is reported
    #[arg(long, global = true)]
    deny_errors: bool,

    /// Debug logging (overridden by BINDABLE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate sources into a directory
    #[command(visible_alias = "g")]
    Generate {
        /// Model file or directory of `*.bindable.json` files
        #[arg(value_hint = clap::ValueHint::AnyPath)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        out: PathBuf,
    },

    /// Report diagnostics without writing anything
    #[command(visible_alias = "c")]
    Check {
        #[arg(value_hint = clap::ValueHint::AnyPath)]
        input: PathBuf,
    },
}

fn init_logging(verbose: bool) -> Result<()> {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .context("failed to install log subscriber")
}

/// Model files under `input`, sorted for stable output.
fn collect_models(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("input `{}` does not exist", input.display());
    }
    let mut models = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk `{}`", input.display()))?;
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(MODEL_SUFFIX)
        {
            models.push(entry.into_path());
        }
    }
    debug!(count = models.len(), dir = %input.display(), "found models");
    Ok(models)
}

fn run_model(path: &Path, cli: &Cli) -> Result<GeneratorOutput> {
    let compilation = load_compilation(path)?;
    let mut options: GeneratorOptions = compilation.options.clone();
    if cli.no_analyzers {
        options.run_analyzers = false;
    }
    if cli.no_generated_code_attribute {
        options.generated_code_attribute = false;
    }
    let output = generate_with(&compilation, &options, &CancellationToken::new())
        .with_context(|| format!("failed to generate from `{}`", path.display()))?;
    for diagnostic in &output.diagnostics {
        eprintln!("{}", diagnostic);
    }
    Ok(output)
}

fn run(cli: &Cli) -> Result<bool> {
    let input = match &cli.command {
        Commands::Generate { input, .. } | Commands::Check { input } => input,
    };
    let mut cache = match &cli.command {
        Commands::Generate { out, .. } => Some(
            OutputCache::open(out)
                .with_context(|| format!("failed to open output directory `{}`", out.display()))?,
        ),
        Commands::Check { .. } => None,
    };

    let mut has_errors = false;
    let mut written = 0usize;
    let mut unchanged = 0usize;
    for model in collect_models(input)? {
        let output = run_model(&model, cli)?;
        has_errors |= output.has_errors();
        if let Some(cache) = cache.as_mut() {
            for unit in &output.sources {
                if cache.write(unit)? {
                    written += 1;
                } else {
                    unchanged += 1;
                }
            }
        }
    }
    if let Some(cache) = cache.as_mut() {
        let removed = cache.flush()?;
        info!(written, unchanged, removed, "output up to date");
    }
    Ok(has_errors)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("error: {:#}", e);
        return ExitCode::FAILURE;
    }
    match run(&cli) {
        Ok(has_errors) if has_errors && cli.deny_errors => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

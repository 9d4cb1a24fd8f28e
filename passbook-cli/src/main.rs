use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand, ValueEnum};
use passbook_core::{AccountKind, StatementConfig};
use passbook_export::{BatchRunner, BatchSummary};
use passbook_ingest::{AnySource, DescriptionNormalizer, StatementParser};
use std::path::{Path, PathBuf};

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "passbook", version, about = "Convert bank statements into categorized CSV/JSON")]
struct Cli {
    /// Config file (default: ~/.passbook/config.toml, built-in defaults if absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct BatchArgs {
    /// Folder of statement files (.pdf, or .txt with form-feed page breaks)
    #[arg(long, default_value = "statements")]
    input: PathBuf,

    /// Output root; each variant writes into its own subfolder
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Keep per-document exports instead of deleting them after the merge
    #[arg(long)]
    keep_work: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process the folder as checking statements, then as savings statements
    Run(BatchArgs),

    /// Process the folder as checking statements
    Checking(BatchArgs),

    /// Process the folder as savings statements
    Savings(BatchArgs),

    /// Show how a raw description is cleaned and categorized
    Classify {
        description: String,

        #[arg(long, value_enum, default_value_t = Variant::Checking)]
        variant: Variant,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the built-in defaults to ~/.passbook/config.toml
    Init,
    /// Print the effective configuration
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Variant {
    Checking,
    Savings,
}

impl From<Variant> for AccountKind {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Checking => AccountKind::Checking,
            Variant::Savings => AccountKind::Savings,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => {
            let cfg = config::load_config(cli.config.as_deref())?;
            for kind in [AccountKind::Checking, AccountKind::Savings] {
                run_batch(&cfg, kind, &args)?;
            }
        }

        Command::Checking(args) => {
            let cfg = config::load_config(cli.config.as_deref())?;
            run_batch(&cfg, AccountKind::Checking, &args)?;
        }

        Command::Savings(args) => {
            let cfg = config::load_config(cli.config.as_deref())?;
            run_batch(&cfg, AccountKind::Savings, &args)?;
        }

        Command::Classify {
            description,
            variant,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let profile = cfg.profile(variant.into());
            let normalizer = DescriptionNormalizer::new(&profile.noise)?;
            let detail = normalizer.normalize(&description);
            println!("detail:   {}", detail);
            println!("category: {}", cfg.categorize(profile, &detail));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", config::render_config(&cfg)?);
            }
        },
    }

    Ok(())
}

fn run_batch(cfg: &StatementConfig, kind: AccountKind, args: &BatchArgs) -> Result<()> {
    if !args.input.is_dir() {
        bail!(
            "input folder not found: {} (pass --input <dir>)",
            args.input.display()
        );
    }

    let year = chrono::Local::now().year();
    let parser = StatementParser::new(cfg, kind, year)?;
    let source = AnySource::default();

    let summary = BatchRunner::new(&parser, &source)
        .keep_work(args.keep_work)
        .run(&args.input, &args.out)
        .with_context(|| format!("{} batch over {}", kind, args.input.display()))?;

    print_summary(&summary, &args.input);
    Ok(())
}

fn print_summary(summary: &BatchSummary, input: &Path) {
    println!(
        "[{}] {} documents from {} ({} skipped)",
        summary.kind,
        summary.processed.len(),
        input.display(),
        summary.skipped.len()
    );
    for doc in &summary.processed {
        println!("  {} transactions  {}", doc.records, doc.path.display());
    }
    for doc in &summary.skipped {
        println!("  skipped  {}: {}", doc.path.display(), doc.reason);
    }
    println!(
        "  merged {} transactions into {} and {}",
        summary.merged_records,
        summary.merged_json.display(),
        summary.merged_csv.display()
    );
    if let Some(cleanup) = &summary.cleanup {
        for failure in &cleanup.failures {
            println!("  failed to delete {}: {}", failure.path.display(), failure.reason);
        }
    }
    println!();
}

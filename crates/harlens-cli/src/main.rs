use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use harlens_cli::OutputFormat;
use harlens_cli::commands;
use harlens_cli::commands::analyze::{AnalyzeOptions, ThresholdArgs};
use harlens_summary::SummarizerConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "harlens")]
#[command(author, version)]
#[command(
    about = "A CLI tool for diagnosing performance and reliability problems in HTTP Archive (HAR) files",
    long_about = "harlens flattens every request in a HAR capture and runs a battery of \
                  diagnostic rules against it: slow TTFB, large payloads, error responses, \
                  redirects, and slow connect or DNS phases."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the diagnostic rules and print a report of flagged requests
    Analyze {
        /// Path to the HAR file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show suggestions, context, and next steps for each finding
        #[arg(long)]
        details: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Append a natural-language summary of the findings
        #[arg(long)]
        summarize: bool,

        /// API key for the summarizer
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Model used by the summarizer (e.g. gpt-3.5-turbo, gpt-4)
        #[arg(long, env = "HARLENS_MODEL", default_value = harlens_summary::config::DEFAULT_MODEL)]
        model: String,
    },

    /// Display timing, status, and domain statistics
    Stats {
        /// Path to the HAR file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of requests and domains to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// List requests matching status, MIME, or TTFB criteria
    Filter {
        /// Path to the HAR file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Status codes, categories, or ranges (e.g. 2xx,404,500-599)
        #[arg(long)]
        status: Option<String>,

        /// Top-level MIME groups (e.g. image,text,application)
        #[arg(long)]
        mime: Option<String>,

        /// Only show requests with slow TTFB (>500ms)
        #[arg(long)]
        slow_ttfb: bool,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS: bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash: harlens completion --shell bash >> ~/.bashrc\n  \
                            zsh:  harlens completion --shell zsh > ~/.zfunc/_harlens")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            file,
            details,
            thresholds,
            summarize,
            api_key,
            model,
        } => {
            let summary = summarize
                .then(|| SummarizerConfig::new(api_key.unwrap_or_default(), model));
            let options = AnalyzeOptions {
                details,
                thresholds: thresholds.into_thresholds(),
                summary,
            };
            commands::analyze::execute(&file, options, cli.format)
        }
        Commands::Stats { file, top } => commands::stats::execute(&file, top, cli.format),
        Commands::Filter {
            file,
            status,
            mime,
            slow_ttfb,
        } => commands::filter::execute(&file, status, mime, slow_ttfb, cli.format),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(
            "harlens=debug,harlens_cli=debug,harlens_core=debug,harlens_rules=debug,harlens_summary=debug",
        )
    } else {
        EnvFilter::new("harlens=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use snapdiff::areas::monitor::Monitor;
use snapdiff::artifacts::diff::{DiffFilter, DiffOptions};
use snapdiff::artifacts::resources::session::CaptureOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "snapdiff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Detect changes in the scripts and stylesheets a page loads",
    long_about = "This tool fingerprints captured scripts and stylesheets with a \
    locality-sensitive fuzzy digest and diffs two captures of the same page. \
    Resources without a stable URL are matched by digest similarity, so a \
    regenerated inline bundle shows up as modified rather than removed and added.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value_t = snapdiff::artifacts::resources::DEFAULT_MAX_RAW_SIZE,
        help = "Content up to this many bytes is kept verbatim instead of hashed"
    )]
    max_raw_size: u64,
    #[arg(
        long,
        global = true,
        default_value_t = snapdiff::artifacts::digest::APPROXIMATE_MATCH_THRESHOLD,
        help = "Distances strictly below this value count as an approximate match"
    )]
    threshold: u32,
    #[arg(
        long,
        global = true,
        help = "Leave the content length out of digest distances"
    )]
    ignore_length: bool,
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = LogLevel::Warn,
        help = "Log level written to stderr"
    )]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "digest",
        about = "Print the fingerprint of each file",
        long_about = "This command fingerprints each file the way a capture would: \
        small files are kept raw, larger ones get a fuzzy digest, and files that \
        cannot be fuzzy hashed fall back to SHA-1."
    )]
    Digest {
        #[arg(long, help = "Prefix fuzzy digests with the format tag")]
        tagged: bool,
        #[arg(index = 1, required = true, help = "The files to fingerprint")]
        files: Vec<PathBuf>,
    },
    #[command(
        name = "compare",
        about = "Print the distance between two digests or files",
        long_about = "This command prints the distance between two fuzzy digests. \
        Each operand is either a digest string or the path of a file to fingerprint."
    )]
    Compare {
        #[arg(index = 1)]
        a: String,
        #[arg(index = 2)]
        b: String,
    },
    #[command(
        name = "diff",
        about = "Diff two capture directories",
        long_about = "This command captures two directories of scripts and stylesheets \
        and reports which resources were added, removed or modified."
    )]
    Diff {
        #[arg(index = 1, help = "The previous capture directory")]
        previous: PathBuf,
        #[arg(index = 2, help = "The current capture directory")]
        current: PathBuf,
        #[arg(long, help = "Print the annotated snapshot as JSON")]
        json: bool,
        #[arg(
            long = "diff-filter",
            help = "Only show resources with the given statuses (A, D, M, U)"
        )]
        diff_filter: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

fn init_logging(log_level: LogLevel) {
    let log_level = Level::from(log_level);

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let capture_options = CaptureOptions::new(cli.max_raw_size);
    let diff_options = DiffOptions {
        threshold: cli.threshold,
        include_length: !cli.ignore_length,
        ..DiffOptions::default()
    };
    let monitor = Monitor::new(Box::new(std::io::stdout()), capture_options, diff_options);

    match &cli.command {
        Commands::Digest { tagged, files } => monitor.digest(files, *tagged)?,
        Commands::Compare { a, b } => monitor.compare(a, b)?,
        Commands::Diff {
            previous,
            current,
            json,
            diff_filter,
        } => {
            let filter = match diff_filter {
                Some(filter) => DiffFilter::try_parse(filter)
                    .ok_or_else(|| anyhow::anyhow!("Invalid diff filter: {filter}"))?,
                None => DiffFilter::default(),
            };

            monitor.diff(previous, current, filter, *json)?
        }
    }

    Ok(())
}

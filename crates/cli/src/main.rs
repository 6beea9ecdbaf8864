use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use lexis_core::{
    ArticlePipeline, BatchConfig, BatchRunner, FetchConfig, HttpArticleFetcher, Lexicon, LexiconSources, Summary,
    TableFormat, analyze_article, extract_article, fetch_file, fetch_stdin, read_input, write_output,
};
use owo_colors::OwoColorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{print_banner, print_info, print_step, print_success, print_summary, print_timing, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Score web articles for sentiment and readability
#[derive(Parser, Debug)]
#[command(name = "lexis")]
#[command(author = "Lexis Contributors")]
#[command(version)]
#[command(about = "Sentiment and readability metrics for web articles", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every URL of an input table and write one metrics row per input row
    Batch(BatchArgs),
    /// Analyze a single local text (or HTML) file and print its metrics as JSON
    Text(TextArgs),
    /// Generate a shell completion script
    Completions {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Input CSV with URL_ID and URL columns
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "Output.csv", value_name = "FILE")]
    output: PathBuf,

    /// Output format (csv, json); guessed from the output extension when omitted
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<TableFormat>,

    /// Dictionary directory with MasterDictionary/ and StopWords/
    #[arg(short, long, value_name = "DIR")]
    dictionary: Option<PathBuf>,

    /// Pause after each request, in milliseconds
    #[arg(long, default_value = "500", value_name = "MS")]
    delay_ms: u64,

    /// Maximum number of articles fetched at once
    #[arg(short = 'j', long, default_value = "1", value_name = "NUM")]
    concurrency: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Save the extracted text of each article as <URL_ID>.txt in this directory
    #[arg(long, value_name = "DIR")]
    artifacts: Option<PathBuf>,

    /// Write intermediate results every NUM completed articles
    #[arg(long, value_name = "NUM")]
    checkpoint_every: Option<usize>,

    /// Directory for intermediate results (default: next to the output file)
    #[arg(long, value_name = "DIR")]
    checkpoint_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TextArgs {
    /// Text file to analyze, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Treat the input as HTML and analyze its extracted article text
    #[arg(long)]
    html: bool,

    /// Dictionary directory with MasterDictionary/ and StopWords/
    #[arg(short, long, value_name = "DIR")]
    dictionary: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose { "lexis=debug,lexis_core=debug,warn" } else { "lexis=info,lexis_core=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_lexicon(dictionary: Option<&Path>) -> anyhow::Result<Lexicon> {
    let dir = match dictionary {
        Some(dir) => dir.to_path_buf(),
        None => LexiconSources::default_dir()
            .context("No dictionary directory given and no config directory available; pass --dictionary")?,
    };

    debug!(dir = %dir.display(), "loading dictionaries");
    let sources = LexiconSources::from_dir(&dir)
        .with_context(|| format!("Failed to locate dictionaries in {}", dir.display()))?;
    Lexicon::build(&sources).context("Failed to load dictionaries")
}

async fn run_batch(args: BatchArgs, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        print_step(1, 4, "Loading dictionaries");
    }
    let lexicon = load_lexicon(args.dictionary.as_deref())?;

    if verbose {
        let (positive, negative, stop) = lexicon.sizes();
        eprintln!(
            "  {} {} positive, {} negative, {} stopwords\n",
            "Terms:".dimmed(),
            positive.to_string().bright_white(),
            negative.to_string().bright_white(),
            stop.to_string().bright_white()
        );
        print_step(2, 4, &format!("Reading input {}", args.input.display().bright_white()));
    }

    let records =
        read_input(&args.input).with_context(|| format!("Failed to read input table: {}", args.input.display()))?;
    if records.is_empty() {
        print_warning("Input table has no usable rows");
    }

    if verbose {
        print_step(3, 4, &format!("Analyzing {} articles", records.len()));
    }

    let fetch_config = FetchConfig {
        timeout: args.timeout,
        user_agent: args.user_agent.unwrap_or_else(|| FetchConfig::default().user_agent),
    };
    let fetcher = HttpArticleFetcher::new(fetch_config).context("Failed to build HTTP client")?;

    let mut pipeline = ArticlePipeline::new(Arc::new(fetcher), Arc::new(lexicon));
    if let Some(dir) = args.artifacts {
        pipeline = pipeline.with_artifact_dir(dir);
    }

    let mut batch_config = BatchConfig::builder()
        .delay(Duration::from_millis(args.delay_ms))
        .concurrency(args.concurrency);
    if let Some(every) = args.checkpoint_every {
        let dir = args.checkpoint_dir.unwrap_or_else(|| {
            args.output
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        });
        batch_config = batch_config.checkpoint(dir, every);
    }

    let batch_config = batch_config.build();
    info!(
        articles = records.len(),
        concurrency = batch_config.concurrency,
        delay_ms = args.delay_ms,
        "starting batch run"
    );

    let started = Instant::now();
    let rows = BatchRunner::new(pipeline, batch_config).run_all(&records).await;
    let elapsed = started.elapsed();

    if verbose {
        print_step(4, 4, "Writing output");
    }

    let format = args.format.unwrap_or_else(|| TableFormat::from_path(&args.output));
    write_output(&rows, &args.output, format)
        .with_context(|| format!("Failed to write to file: {}", args.output.display()))?;
    info!(path = %args.output.display(), rows = rows.len(), "results written");
    print_success(&format!("Output written to {}", args.output.display().bright_white()));

    print_summary(&Summary::from_rows(&rows));
    print_timing("Total", elapsed, rows.len());

    Ok(())
}

fn run_text(args: &TextArgs, verbose: bool) -> anyhow::Result<()> {
    let lexicon = load_lexicon(args.dictionary.as_deref())?;

    let raw = if args.input == "-" {
        fetch_stdin().context("Failed to read from stdin")?
    } else {
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    let text = if args.html {
        let article = extract_article(&raw).context("Failed to extract article text")?;
        if verbose && !article.title.is_empty() {
            eprintln!("  {} {}\n", "Title:".dimmed(), article.title.bright_white());
        }
        article.content
    } else {
        raw
    };

    let record = analyze_article(&text, &lexicon);
    println!("{}", serde_json::to_string_pretty(&record).context("Failed to serialize metrics")?);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "lexis", &mut io::stdout());
        return Ok(());
    }

    init_tracing(cli.verbose);

    if cli.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    match cli.command {
        Command::Batch(args) => run_batch(args, cli.verbose).await,
        Command::Text(args) => run_text(&args, cli.verbose),
        Command::Completions { .. } => Ok(()),
    }
}

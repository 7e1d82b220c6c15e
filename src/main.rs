use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use funcgraph::config::{
    load_ignore_patterns, AnalysisConfig, DEFAULT_IGNORE_FILE, DEFAULT_INCLUDE_DIR, DEFAULT_OUTPUT,
};
use funcgraph::core::CodebaseAnalyzer;
use funcgraph::formatters::{IdMode, JsonCompactFormatter, TaFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "funcgraph",
    version = "0.1.0",
    author = "funcgraph developers",
    about = "Function call and class containment graphs for C/C++ codebases"
)]
struct Cli {
    /// Root directory to analyze (prompted for when omitted)
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// File of path patterns to leave out of the analysis
    #[arg(long, value_name = "FILE", default_value = DEFAULT_IGNORE_FILE)]
    ignore_file: PathBuf,

    /// User include directory, may be repeated
    #[arg(short = 'I', long = "include", value_name = "DIR", default_value = DEFAULT_INCLUDE_DIR)]
    include_dirs: Vec<PathBuf>,

    /// Include directory whose headers count as system headers, may be repeated
    #[arg(long = "system-include", value_name = "DIR")]
    system_include_dirs: Vec<PathBuf>,

    /// Replace every identifier with its SHA-256 digest
    #[arg(long)]
    anonymize: bool,

    /// Output format
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Ta)]
    format: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Ta,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let Cli {
        input,
        output,
        ignore_file,
        include_dirs,
        system_include_dirs,
        anonymize,
        format,
        verbose: _,
    } = cli;

    let start_time = Instant::now();
    println!("Function Call Graph Generator");

    let input = match input {
        Some(input) => input,
        None => prompt_for_root()?,
    };

    let ignore_patterns = load_ignore_patterns(&ignore_file)
        .with_context(|| format!("Failed to read ignore list {}", ignore_file.display()))?;
    let config = AnalysisConfig::new()
        .with_include_dirs(include_dirs)
        .with_system_include_dirs(system_include_dirs)
        .with_ignore_patterns(ignore_patterns);

    let analyzer = CodebaseAnalyzer::with_config(&config)?;
    let files = analyzer.scan(&input)?;
    if files.is_empty() {
        println!("Found 0 C/C++ files. Now exiting.");
        return Ok(ExitCode::FAILURE);
    }
    println!("Found {} C/C++ files.", files.len());

    let report = analyzer.analyze_files(&files);
    if report.has_compilation_errors() {
        println!("Warning: Compilation errors were detected.");
    }

    let mode = IdMode::from_flag(anonymize);
    match format {
        OutputFormat::Ta => TaFormatter::new()
            .with_mode(mode)
            .format_to_file(&report.graph, &output)?,
        OutputFormat::Json => JsonCompactFormatter::new()
            .with_mode(mode)
            .format_to_file(&report.graph, &output)?,
    }

    println!(
        "Wrote {} classes, {} functions, {} contains edges and {} call edges to {}",
        report.graph.classes().len(),
        report.graph.functions().len(),
        report.graph.contains_edges().len(),
        report.graph.call_edges().len(),
        output.display()
    );
    println!("Total execution time: {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(ExitCode::SUCCESS)
}

/// Asks for the root directory until a non-empty line is entered.
fn prompt_for_root() -> Result<PathBuf> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter the root directory to analyze: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            anyhow::bail!("No input directory given");
        };
        let line = line?;
        let root = line.trim();
        if !root.is_empty() {
            return Ok(PathBuf::from(root));
        }
    }
}

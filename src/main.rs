use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use phonebook::pipeline::{DEFAULT_INPUT, default_output_for};
use phonebook::{PipelineConfig, analyze, run_pipeline};

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(author, version, about = "Clean up a contact list CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recast, merge and write the cleaned phonebook (default)
    Process(ProcessArgs),

    /// Report what processing would do without writing anything
    Analyze {
        /// Input CSV file (no header)
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Field delimiter
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Args)]
struct ProcessArgs {
    /// Input CSV file (no header)
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output CSV file [default: phonebook.csv next to the input]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter for both input and output
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Write a JSON summary of the run
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: None,
            delimiter: b',',
            report: None,
            verbose: false,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Commands::Process(ProcessArgs::default())) {
        Commands::Process(args) => {
            setup_logging(args.verbose);
            process_phonebook(args)
        }
        Commands::Analyze {
            input,
            delimiter,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_phonebook(input, delimiter)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn parse_delimiter(value: &str) -> std::result::Result<u8, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(format!("delimiter must be a single ASCII character, got {value:?}")),
    }
}

fn process_phonebook(args: ProcessArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| default_output_for(&args.input));
    let config = PipelineConfig {
        input: args.input,
        output,
        delimiter: args.delimiter,
        report: args.report,
    };

    let summary = run_pipeline(&config)
        .with_context(|| format!("Failed to process phonebook {:?}", config.input))?;

    info!(
        "Complete: {} rows in, {} contacts out ({} duplicates merged)",
        summary.raw_rows, summary.merged_contacts, summary.duplicates_merged
    );
    Ok(())
}

fn analyze_phonebook(input: PathBuf, delimiter: u8) -> Result<()> {
    let analysis = analyze(&input, delimiter)
        .with_context(|| format!("Failed to analyze phonebook {:?}", input))?;
    let summary = &analysis.summary;

    println!("Phonebook Analysis");
    println!("==================");
    println!("Raw rows: {}", summary.raw_rows);
    println!("Unique contacts: {}", summary.merged_contacts);
    println!("Duplicate rows merged: {}", summary.duplicates_merged);
    println!("Fields updated by merge: {}", summary.fields_updated);
    println!();

    println!("Phones");
    println!("------");
    println!("Canonicalized: {}", summary.phones_canonicalized);
    println!("Left as is: {}", summary.phones_passed_through);
    println!();

    println!("Contacts");
    println!("--------");
    for contact in &analysis.contacts {
        let phone = if contact.remainder.phone.is_empty() {
            "-"
        } else {
            contact.remainder.phone.as_str()
        };
        println!("{} {}: {}", contact.key.first, contact.key.last, phone);
    }

    Ok(())
}

//! tansiq - Arabic thesis formatter

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Datelike;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tansiq::analyze::{Analyzer, GeminiAnalyzer, GeminiConfig, StructuredJsonAnalyzer};
use tansiq::pipeline::{Pipeline, ProcessingStatus, default_output_name};
use tansiq::util::decode_text;
use tansiq::{Assembler, Error, ThesisProfile, UnresolvedPolicy, inspect};

#[derive(Parser)]
#[command(name = "tansiq")]
#[command(version, about = "Format Arabic research text as a Word thesis document", long_about = None)]
#[command(after_help = "EXAMPLES:
    tansiq chapter.txt                     Analyze and format, write بحث_منسق_<date>.docx
    tansiq chapter.json --structured -o out.docx
                                           Format an already-analyzed document
    tansiq -i out.docx                     Show formatting of a produced document

ENVIRONMENT:
    GEMINI_API_KEY (or API_KEY), GEMINI_MODEL, GEMINI_ENDPOINT, RUST_LOG")]
struct Cli {
    /// Input file: raw text, structured JSON with --structured, or DOCX with --info
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output DOCX file (default: بحث_منسق_<YYYY-MM-DD>.docx)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Show the formatting of a DOCX file instead of producing one
    #[arg(short, long, conflicts_with_all = ["output", "structured", "strict", "profile"])]
    info: bool,

    /// Treat the input as structured JSON and skip text analysis
    #[arg(long)]
    structured: bool,

    /// Fail on footnote markers that name no footnote instead of dropping them
    #[arg(long)]
    strict: bool,

    /// Thesis profile (TOML) overriding the default conventions
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Suppress progress messages
    #[arg(short, long)]
    quiet: bool,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "tansiq=debug" } else { "tansiq=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = if cli.info {
        show_info(&cli.input)
    } else {
        format(&cli).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn show_info(path: &Path) -> Result<(), Error> {
    let summary = inspect::read_docx(path).map_err(|e| with_path(e, path))?;
    println!("File:       {}", path.display());
    print!("{summary}");
    Ok(())
}

async fn format(cli: &Cli) -> Result<(), Error> {
    let mut profile = match &cli.profile {
        Some(path) => ThesisProfile::from_toml_file(path).map_err(|e| with_path(e, path))?,
        None => ThesisProfile::default(),
    };
    if cli.strict {
        profile = profile.with_unresolved_markers(UnresolvedPolicy::Reject);
    }
    let assembler = Assembler::new(profile)?;

    let bytes = tokio::fs::read(&cli.input)
        .await
        .map_err(|e| with_path(e, &cli.input))?;
    let raw = decode_text(&bytes, None);

    let analyzer: Box<dyn Analyzer> = if cli.structured {
        Box::new(StructuredJsonAnalyzer)
    } else {
        Box::new(GeminiAnalyzer::new(GeminiConfig::from_env())?)
    };
    let pipeline = Pipeline::new(analyzer, assembler);

    let quiet = cli.quiet;
    let docx = pipeline
        .run(&raw, |status| {
            if !quiet {
                report(status);
            }
        })
        .await?;

    let output = cli.output.clone().unwrap_or_else(|| {
        let today = chrono::Local::now().date_naive();
        PathBuf::from(default_output_name(today.year(), today.month(), today.day()))
    });
    tokio::fs::write(&output, &docx)
        .await
        .map_err(|e| with_path(e, &output))?;

    if !quiet {
        eprintln!("{}", output.display());
    }
    Ok(())
}

/// Name the file in an I/O error so the message says what to fix.
fn with_path(err: impl Into<Error>, path: &Path) -> Error {
    match err.into() {
        Error::Io(e) => Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        )),
        other => other,
    }
}

fn report(status: ProcessingStatus) {
    let message = match status {
        ProcessingStatus::Analyzing => "جاري تحليل النص وتوزيع الحواشي...",
        ProcessingStatus::Generating => "جاري إنشاء ملف الوورد...",
        ProcessingStatus::Success => "تم التنسيق بنجاح.",
        ProcessingStatus::Idle | ProcessingStatus::Error => return,
    };
    eprintln!("{message}");
}

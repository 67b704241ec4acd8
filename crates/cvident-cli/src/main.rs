use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use cvident_core::{Config, ProgressEvent};
use cvident_ner::{EntityLabel, HeuristicNer, NerBackend};
use cvident_reporting::ExportFormat;

mod output;

use output::ColorMode;

/// Candidate Identity Extractor - resolve names and emails from resume documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve every supported document (.pdf, .docx, .doc) in a folder
    Scan {
        /// Folder containing the documents
        folder: PathBuf,

        /// Worker-pool width (default 8; env: CVIDENT_WORKERS)
        #[arg(long)]
        workers: Option<usize>,

        /// Write results to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write results to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Resolve a single document, printing every intermediate step
    Check {
        /// Path to the document
        file_path: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            folder,
            workers,
            json,
            csv,
            no_color,
        } => scan(folder, workers, json, csv, no_color).await,
        Command::Check {
            file_path,
            no_color,
        } => check(file_path, no_color).await,
    }
}

async fn scan(
    folder: PathBuf,
    workers: Option<usize>,
    json: Option<PathBuf>,
    csv: Option<PathBuf>,
    no_color: bool,
) -> anyhow::Result<()> {
    // Resolve configuration: CLI flags > env vars > defaults
    let num_workers = workers
        .or_else(|| {
            std::env::var("CVIDENT_WORKERS")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .unwrap_or_else(|| Config::default().num_workers)
        .max(1);
    let color = ColorMode(!no_color);

    if !folder.is_dir() {
        anyhow::bail!("Not a folder: {}", folder.display());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&folder)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && cvident_extract::is_supported(p))
        .collect();
    paths.sort();

    if paths.is_empty() {
        println!(
            "No supported documents (.pdf, .docx, .doc) in {}",
            folder.display()
        );
        return Ok(());
    }
    println!(
        "Resolving {} documents with {} workers...",
        paths.len(),
        num_workers
    );

    // The NER model is loaded once here and shared read-only by every worker.
    let ner: Arc<dyn NerBackend> = Arc::new(HeuristicNer::new());

    // Extraction phase: blocking file I/O, bounded by the same width as the
    // resolution pool. A document that fails extraction is logged and
    // skipped; it never aborts the batch.
    let semaphore = Arc::new(tokio::sync::Semaphore::new(num_workers));
    let mut extraction_tasks = tokio::task::JoinSet::new();
    for path in paths {
        let semaphore = semaphore.clone();
        extraction_tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            tokio::task::spawn_blocking(move || {
                let extracted = cvident_extract::extract_file(&path);
                (path, extracted)
            })
            .await
            .ok()
        });
    }

    let mut documents = Vec::new();
    while let Some(joined) = extraction_tasks.join_next().await {
        let Ok(Some((path, extracted))) = joined else {
            continue;
        };
        match extracted {
            Ok(doc) => documents.push(doc),
            Err(err) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                tracing::warn!(file = %filename, error = %err, "extraction failed");
                output::print_extraction_failure(&filename, &err.to_string(), color);
            }
        }
    }

    // Resolution phase through the engine's worker pool.
    let bar = ProgressBar::new(documents.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let progress_bar = bar.clone();
    let progress = move |event: ProgressEvent| match event {
        ProgressEvent::Resolving { filename, .. } => {
            progress_bar.set_message(filename);
        }
        ProgressEvent::Resolved { .. } => {
            progress_bar.inc(1);
        }
        ProgressEvent::Failed {
            filename, message, ..
        } => {
            progress_bar.println(format!("failed: {} ({})", filename, message));
            progress_bar.inc(1);
        }
    };

    let mut results =
        cvident_core::resolve_all(documents, ner, Config { num_workers }, progress).await;
    bar.finish_and_clear();

    // The engine guarantees no result order; sort for display only.
    results.sort_by(|a, b| a.filename.cmp(&b.filename));

    let mut stdout = std::io::stdout();
    output::print_results_table(&mut stdout, &results, color)?;

    if let Some(path) = json {
        cvident_reporting::export_results(&results, ExportFormat::Json, &path)?;
        println!("Wrote JSON to {}", path.display());
    }
    if let Some(path) = csv {
        cvident_reporting::export_results(&results, ExportFormat::Csv, &path)?;
        println!("Wrote CSV to {}", path.display());
    }

    Ok(())
}

/// Single-document flow with a step-by-step trace of the engine's inputs.
async fn check(file_path: PathBuf, no_color: bool) -> anyhow::Result<()> {
    use owo_colors::OwoColorize;

    let color = ColorMode(!no_color);
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let doc = {
        let path = file_path.clone();
        tokio::task::spawn_blocking(move || cvident_extract::extract_file(&path)).await??
    };

    let ner = HeuristicNer::new();
    let persons: Vec<String> = ner
        .annotate(&doc.raw_text)?
        .into_iter()
        .filter(|e| e.label == EntityLabel::Person)
        .map(|e| e.text)
        .collect();

    let heading = |label: &str| {
        if color.enabled() {
            println!("{}", label.bold().cyan());
        } else {
            println!("{}", label);
        }
    };

    heading(&format!("Document: {}", doc.id));
    println!("  first two words: {:?}", doc.first_two_words);
    println!("  extracted {} characters", doc.raw_text.chars().count());
    println!();

    heading("NER (PERSON spans)");
    if persons.is_empty() {
        println!("  none");
    }
    for name in &persons {
        println!("  - {}", name);
    }
    println!();

    heading("Email locator");
    let located = cvident_core::locate_email(&doc.raw_text);
    let (correlated_name, correlated_ratio, email) = match &located {
        Some(candidate) if !candidate.context_lines.is_empty() => {
            println!("  address: {}", candidate.address);
            println!(
                "  context window: {} lines around line {}",
                candidate.context_lines.len(),
                candidate.anchor_line_index,
            );
            let window = candidate.context_lines.join("\n");
            let snippets = [
                doc.first_two_words.as_str(),
                window.as_str(),
                candidate.anchor_line(),
            ];
            let tokens = cvident_core::context_tokens(&snippets);
            let (name, ratio) = cvident_core::correlate(&tokens, &candidate.address);
            println!();
            heading("Correlator");
            println!("  {} tokens in context", tokens.len());
            println!("  best match: {:?} (ratio {:.3})", name, ratio);
            (name, ratio, candidate.address.clone())
        }
        Some(candidate) => {
            println!("  address: {} (no context line)", candidate.address);
            (String::new(), 0.0, candidate.address.clone())
        }
        None => {
            println!("  no email found; correlation skipped");
            (String::new(), 0.0, String::new())
        }
    };
    println!();

    let selected = cvident_core::resolve(
        &doc.first_two_words,
        &persons,
        &correlated_name,
        correlated_ratio,
        &email,
    );

    heading("Resolution");
    let display_name = if selected.is_empty() { "-" } else { &selected };
    let display_email = if email.is_empty() { "-" } else { &email };
    if color.enabled() {
        println!("  selected name: {}", display_name.green());
        println!("  email:         {}", display_email.green());
    } else {
        println!("  selected name: {}", display_name);
        println!("  email:         {}", display_email);
    }

    Ok(())
}

//! pagerag command-line front end
//!
//! Run with: cargo run --bin pagerag -- <command>

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagerag::config::PageRagConfig;
use pagerag::ingestion::PdfExtractor;
use pagerag::providers::create_llm_provider;
use pagerag::storage;
use pagerag::ChatEngine;

#[derive(Parser)]
#[command(name = "pagerag", about = "Chat with PDF documents, with page citations")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract text and images from a PDF into a document folder
    Extract {
        /// Path to the PDF file
        pdf: PathBuf,
    },
    /// Ask a question about an extracted document
    Ask {
        /// Path to extracted_data.json
        document: PathBuf,
        /// The question
        question: String,
    },
    /// Produce a structured summary of an extracted document
    Summarize {
        /// Path to extracted_data.json
        document: PathBuf,
    },
    /// Generate multiple-choice questions over a page range
    Quiz {
        /// Path to extracted_data.json
        document: PathBuf,
        /// First page of the range (1-based)
        #[arg(long, default_value_t = 1)]
        start_page: u32,
        /// Number of pages to cover
        #[arg(long, default_value_t = 5)]
        pages: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagerag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PageRagConfig::load(path)?,
        None => PageRagConfig::default(),
    };
    config.validate()?;

    match cli.command {
        Command::Extract { pdf } => {
            let output = storage::extract_to_folder(&PdfExtractor::new(), &pdf, &config.extraction)?;
            println!("Extracted to {}", output.folder.display());
            println!("Document JSON: {}", output.document_path.display());
            let with_text = output
                .document
                .sections
                .iter()
                .filter(|s| !s.text.is_empty())
                .count();
            println!(
                "{} sections ({} with text)",
                output.document.sections.len(),
                with_text
            );
        }
        Command::Ask { document, question } => {
            let doc = storage::load_document(&document)?;
            let engine = build_engine(&config)?;
            let answer = engine.ask(&doc, &question).await?;

            println!("{}\n", answer.text);
            if answer.pages.is_empty() {
                println!("(no page citations found in the answer)");
            } else {
                let pages: Vec<String> = answer.pages.iter().map(u32::to_string).collect();
                println!("Cited pages: {}", pages.join(", "));
            }
        }
        Command::Summarize { document } => {
            let doc = storage::load_document(&document)?;
            let engine = build_engine(&config)?;
            let summary = engine.summarize(&doc).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Quiz {
            document,
            start_page,
            pages,
        } => {
            let doc = storage::load_document(&document)?;
            let engine = build_engine(&config)?;
            let questions = engine.quiz(&doc, start_page, pages).await?;

            for (i, q) in questions.iter().enumerate() {
                println!("{}. {}", i + 1, q.question);
                for option in &q.options {
                    println!("   - {}", option);
                }
                println!("   Answer: {}\n", q.answer);
            }
        }
    }

    Ok(())
}

fn build_engine(config: &PageRagConfig) -> anyhow::Result<ChatEngine> {
    let llm = create_llm_provider(&config.llm)?;
    Ok(ChatEngine::new(config, llm)?)
}

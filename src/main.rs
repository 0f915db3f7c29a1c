//! sectionist: section numbering, outlines and outline ingestion for markdown documents.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use sectionist::edit_plan::EditPlan;
use sectionist::error::{Error, Result};
use sectionist::formats::markdown::MarkdownFormat;
use sectionist::validate::{entries_from_document, SequenceEntry, SequenceValidator};
use sectionist::{config, input, render};
use sectionist::{EditorHost, OutlineExtractor, OutlineIngestionPipeline, OutlinePayload};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sectionist")]
#[command(about = "Hierarchical section numbering and outlines for documents", long_about = None)]
struct Args {
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG applies otherwise
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the outline tree of each document
    Outline {
        /// Files or directories to read
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Print the outline forest as JSON
        #[arg(long)]
        json: bool,

        /// File extensions to match
        #[arg(long, short = 'e', value_name = "EXT")]
        ext: Vec<String>,

        /// Leave word counts out of the tree
        #[arg(long)]
        no_word_count: bool,
    },
    /// Print every heading with its recomputed number
    Number {
        /// Document to number
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Normalise an outline payload and show it or insert it into a document
    Ingest {
        /// Payload file, or - for stdin
        #[arg(value_name = "PAYLOAD")]
        payload: PathBuf,

        /// Print the canonical description as JSON
        #[arg(long, conflicts_with_all = ["preview", "into"])]
        display: bool,

        /// Print the outline as numbered markdown
        #[arg(long, conflicts_with = "into")]
        preview: bool,

        /// Continue numbering after this number in the preview
        #[arg(long, value_name = "NUMBER", requires = "preview")]
        after: Option<String>,

        /// Markdown file to insert the outline into
        #[arg(long, value_name = "FILE")]
        into: Option<PathBuf>,

        /// Line to insert before, counted from 0; appends when omitted
        #[arg(long, value_name = "N", requires = "into")]
        line: Option<usize>,
    },
    /// Check typed heading numbers in a markdown file or a JSON list of entries
    Validate {
        /// Markdown document, or .json file of {level, number, text} entries
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    let mut cfg = config::Config::load();
    let format = MarkdownFormat;

    match command {
        Command::Outline {
            paths,
            json,
            ext,
            no_word_count,
        } => {
            // Override config with command line args
            if !ext.is_empty() {
                cfg.file_extensions = ext;
            }
            if no_word_count {
                cfg.show_word_count = false;
            }

            let documents = input::find_documents(paths, &cfg.file_extensions)?;
            if documents.is_empty() {
                eprintln!("No matching files found");
                return Ok(ExitCode::SUCCESS);
            }

            let extractor = OutlineExtractor::new();
            let mut outlines = Vec::new();
            for path in &documents {
                let document = input::load_document(path, &format)?;
                outlines.push((path, extractor.extract(&document)?));
            }

            if json {
                let value: Vec<_> = outlines
                    .iter()
                    .map(|(path, forest)| {
                        serde_json::json!({ "path": path.display().to_string(), "outline": forest })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                for (path, forest) in &outlines {
                    println!("{}", path.display());
                    print!("{}", render::render_tree(forest, cfg.tree_style()));
                    println!("{}\n", render::summary(forest));
                }
            }
        }
        Command::Number { path } => {
            let host = EditorHost::new(input::load_document(&path, &format)?);
            for entry in &host.numbers().entries {
                let indent = "  ".repeat(usize::from(entry.heading.level.saturating_sub(1)));
                println!("{indent}{} {}", entry.number, entry.heading.clean_text);
            }
        }
        Command::Ingest {
            payload,
            display,
            preview,
            after,
            into,
            line,
        } => {
            let pipeline = OutlineIngestionPipeline::new();
            let description = pipeline.normalize(OutlinePayload::RawText(read_payload(&payload)?))?;

            if display {
                println!("{}", serde_json::to_string_pretty(&description)?);
            } else if preview {
                print!("{}", render::preview(&description, after.as_deref())?);
            } else {
                let blocks = pipeline.materialize(&description);
                let markdown = render::to_markdown(&blocks);
                match into {
                    Some(file) => {
                        let mut plan = EditPlan::new();
                        plan.insert_before_line(
                            file.to_string_lossy(),
                            line.unwrap_or(usize::MAX),
                            markdown,
                            "outline",
                        );
                        plan.apply()?;
                        eprintln!("Inserted {} blocks into {}", blocks.len(), file.display());
                    }
                    None => print!("{markdown}"),
                }
            }
        }
        Command::Validate { path } => {
            let entries = if path.extension().is_some_and(|ext| ext == "json") {
                let contents = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
                serde_json::from_str::<Vec<SequenceEntry>>(&contents)?
            } else {
                entries_from_document(&input::load_document(&path, &format)?)
            };

            let report = SequenceValidator::new().validate(&entries)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_valid {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_payload(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Error::io(path, e))?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }
}

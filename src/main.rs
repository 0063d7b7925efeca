// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record};

use myasub::errors::AppError;
use myasub::service::{BatchTranslator, GlossaryTerm, OllamaProvider, TranslationContext};
use myasub::store::{ProjectRecord, ProjectRepository};
use myasub::{align, reference, sampler, srt};

/// Simple stderr logger.
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let prefix = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARN",
                Level::Info => "INFO",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };
            eprintln!("[{}] {}", prefix, record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = Box::new(StderrLogger { level });
    if log::set_boxed_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

#[derive(Parser)]
#[command(
    name = "myasub",
    about = "English to Myanmar subtitle translation assistant",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Align two SRT tracks and write a merged, translated SRT
    Align {
        /// Original (English) SRT file
        original: PathBuf,
        /// Translated (Myanmar) SRT file
        translated: PathBuf,
        /// Output path; defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract style examples from an aligned reference pair
    Examples {
        /// Original (English) SRT file
        original: PathBuf,
        /// Translated (Myanmar) SRT file
        translated: PathBuf,
        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Translate an SRT file via an Ollama model
    Translate {
        /// Input SRT file (English)
        input: PathBuf,
        /// Output path; defaults to `<input stem>.my.srt`
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Reference pair: original side
        #[arg(long, requires = "ref_translated")]
        ref_original: Option<PathBuf>,
        /// Reference pair: translated side
        #[arg(long, requires = "ref_original")]
        ref_translated: Option<PathBuf>,
        /// Glossary JSON file: [{"source": "...", "target": "..."}]
        #[arg(long)]
        glossary: Option<PathBuf>,
        /// Ollama endpoint
        #[arg(long, default_value = "http://localhost:11434")]
        endpoint: String,
        /// Ollama model name
        #[arg(long, default_value = "qwen2.5")]
        model: String,
        /// Sampling temperature passed to the model
        #[arg(long)]
        temperature: Option<f32>,
        /// Save the result as a project in the local store
        #[arg(long)]
        save: bool,
    },
    /// Manage stored projects
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },
}

#[derive(Subcommand)]
enum ProjectsAction {
    /// List stored projects, newest first
    List,
    /// Delete a stored project by id
    Delete {
        /// Project id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Command::Align {
            original,
            translated,
            output,
        } => run_align(&original, &translated, output.as_deref()),
        Command::Examples {
            original,
            translated,
            json,
        } => run_examples(&original, &translated, json),
        Command::Translate {
            input,
            output,
            ref_original,
            ref_translated,
            glossary,
            endpoint,
            model,
            temperature,
            save,
        } => {
            run_translate(TranslateArgs {
                input,
                output,
                ref_original,
                ref_translated,
                glossary,
                endpoint,
                model,
                temperature,
                save,
            })
            .await
        }
        Command::Projects { action } => run_projects(action).await,
    };

    result.map_err(AppError::from)
}

fn read_srt(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn run_align(original: &Path, translated: &Path, output: Option<&Path>) -> Result<()> {
    let original_content = read_srt(original)?;
    let translated_content = read_srt(translated)?;

    let original_cues = srt::parse(&original_content);
    let aligned = align::align(&original_content, &translated_content);
    info!(
        "Aligned {} of {} cues from {}",
        aligned.len(),
        original_cues.len(),
        original.display()
    );
    if aligned.len() < original_cues.len() {
        warn!(
            "{} cues had no counterpart and were dropped",
            original_cues.len() - aligned.len()
        );
    }

    let blocks: Vec<srt::SubtitleBlock> = aligned
        .into_iter()
        .map(|pair| srt::SubtitleBlock {
            seq_num: pair.seq_num,
            start: pair.start,
            end: pair.end,
            source: pair.source,
            target: Some(pair.target),
            from_reference: false,
        })
        .collect();
    let rendered = srt::serialize_blocks(&blocks);

    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}

fn run_examples(original: &Path, translated: &Path, json: bool) -> Result<()> {
    let examples =
        reference::extract_style_examples(&read_srt(original)?, &read_srt(translated)?);
    info!("Extracted {} style examples", examples.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&examples)?);
    } else {
        for example in &examples {
            println!("EN: {}\nMY: {}\n", example.original, example.translated);
        }
    }
    Ok(())
}

struct TranslateArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    ref_original: Option<PathBuf>,
    ref_translated: Option<PathBuf>,
    glossary: Option<PathBuf>,
    endpoint: String,
    model: String,
    temperature: Option<f32>,
    save: bool,
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let content = read_srt(&args.input)?;
    let mut blocks = srt::parse_blocks(&content);
    if blocks.is_empty() {
        return Err(anyhow!("No subtitle cues found in {}", args.input.display()));
    }
    info!("Parsed {} cues from {}", blocks.len(), args.input.display());

    let mut context = TranslationContext::default();

    if let (Some(ref_original), Some(ref_translated)) =
        (&args.ref_original, &args.ref_translated)
    {
        let ref_original_content = read_srt(ref_original)?;
        let ref_translated_content = read_srt(ref_translated)?;
        let exact_map =
            reference::build_exact_map(&ref_original_content, &ref_translated_content);
        let consistency =
            reference::extract_style_examples(&ref_original_content, &ref_translated_content);
        info!(
            "Reference pair: {} exact matches, {} style examples",
            exact_map.len(),
            consistency.len()
        );
        context.reference_map = Some(exact_map);
        context.consistency_examples = consistency;
    }

    if let Some(glossary_path) = &args.glossary {
        let raw = fs::read_to_string(glossary_path)
            .with_context(|| format!("Failed to read {}", glossary_path.display()))?;
        let terms: Vec<GlossaryTerm> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid glossary file {}", glossary_path.display()))?;
        info!("Loaded {} glossary terms", terms.len());
        context.glossary = terms;
    }

    let repository = ProjectRepository::new_default()?;
    let history = repository.list_projects().await.unwrap_or_else(|e| {
        warn!("Could not load project history: {}", e);
        Vec::new()
    });
    context.training_examples = sampler::sample_default(&history);
    info!(
        "Sampled {} training examples from {} past projects",
        context.training_examples.len(),
        history.len()
    );

    let mut provider = OllamaProvider::new(&args.endpoint, &args.model);
    if let Some(temperature) = args.temperature {
        provider = provider.with_temperature(temperature);
    }
    let translator = BatchTranslator::new(provider);

    let bar = ProgressBar::new(blocks.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} cues {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let bar_sink = {
        let bar = bar.clone();
        move |completed: usize, _total: usize| bar.set_position(completed as u64)
    };

    translator.translate(&mut blocks, &context, &bar_sink).await?;
    bar.finish_with_message("done");

    let untranslated = blocks.iter().filter(|b| b.target.is_none()).count();
    if untranslated > 0 {
        warn!("{} cues remain untranslated", untranslated);
    }

    let output_path = args.output.clone().unwrap_or_else(|| {
        let stem = args
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        args.input.with_file_name(format!("{}.my.srt", stem))
    });
    fs::write(&output_path, srt::serialize_blocks(&blocks))
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    info!("Wrote {}", output_path.display());

    if args.save {
        let file_name = args
            .input
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown.srt".to_string());
        let project = ProjectRecord::new(&file_name, blocks, false);
        repository.save_project(&project).await?;
        info!("Saved project {}", project.id);
    }

    Ok(())
}

async fn run_projects(action: ProjectsAction) -> Result<()> {
    let repository = ProjectRepository::new_default()?;

    match action {
        ProjectsAction::List => {
            let projects = repository.list_projects().await?;
            if projects.is_empty() {
                println!("No stored projects.");
            }
            for project in projects {
                let translated = project
                    .cues
                    .iter()
                    .filter(|cue| cue.target.is_some())
                    .count();
                println!(
                    "{}  {}  {} ({}/{} translated{})",
                    project.id,
                    project.created_at,
                    project.file_name,
                    translated,
                    project.cues.len(),
                    if project.is_external_import {
                        ", imported"
                    } else {
                        ""
                    }
                );
            }
        }
        ProjectsAction::Delete { id } => {
            repository.delete_project(&id).await?;
            println!("Deleted project {}", id);
        }
    }

    Ok(())
}

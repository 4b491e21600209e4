//! ClauseCraft command line: inspect sectors, compose document skeletons,
//! manage drafts, and generate full documents via the completion API.

mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use clausecraft_ai::{CompletionClient, PromptBuilder};
use clausecraft_core::{AnswerSet, Composer, EngagementPattern, SectorRegistry};
use clausecraft_store::{Draft, LocalDraftStore};

#[derive(Parser)]
#[command(name = "clausecraft", version, about = "Sector-aware legal document drafting")]
struct Cli {
    /// Sector configuration file.
    #[arg(long, global = true, default_value = "config/sectors.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List configured sectors.
    Sectors,

    /// Show a sector's follow-up questions.
    Questions {
        sector: String,
        /// Only questions relevant to this engagement pattern
        /// (night_work, shift_rota, on_site, hybrid, remote).
        #[arg(long)]
        pattern: Option<EngagementPattern>,
    },

    /// Compose a document skeleton from answers.
    Compose {
        sector: String,
        /// Answer as id=value; a bare id means yes. Repeatable.
        #[arg(short = 'a', long = "answer")]
        answers: Vec<String>,
        /// Emit the full document record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Manage saved drafts.
    Draft {
        /// Directory drafts are stored in.
        #[arg(long, default_value = "drafts")]
        dir: PathBuf,
        #[command(subcommand)]
        command: DraftCommand,
    },

    /// Compose a skeleton, then generate the full document text.
    Generate {
        sector: String,
        #[arg(short = 'a', long = "answer")]
        answers: Vec<String>,
        /// Free-text brief describing the engagement.
        #[arg(long)]
        brief: String,
        /// Kind of document to draft.
        #[arg(long, default_value = "employment contract")]
        document_type: String,
        #[arg(long, env = "CLAUSECRAFT_API_URL", default_value = "https://api.openai.com")]
        api_url: String,
        #[arg(long, env = "CLAUSECRAFT_API_KEY", hide_env_values = true)]
        api_key: String,
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,
        /// Save the generated document as a draft with this id.
        #[arg(long)]
        save: Option<String>,
        #[arg(long, default_value = "drafts")]
        drafts_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum DraftCommand {
    /// List saved drafts.
    List,
    /// Print one draft.
    Show { id: String },
    /// Save a draft from a text file.
    Save {
        id: String,
        sector: String,
        #[arg(long)]
        title: String,
        /// File containing the document body.
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a draft.
    Delete { id: String },
}

fn load_registry(path: &Path) -> anyhow::Result<Arc<SectorRegistry>> {
    let registry = SectorRegistry::load(path)
        .with_context(|| format!("loading sector configuration from {}", path.display()))?;
    Ok(Arc::new(registry))
}

/// Parse repeated `-a id=value` flags.
///
/// `id`, `id=yes` and `id=true` are affirmative; `id=no` and `id=false`
/// negative; any other value is a choice answer.
fn parse_answers(raw: &[String]) -> anyhow::Result<AnswerSet> {
    let mut answers = AnswerSet::new();
    for item in raw {
        let (id, value) = match item.split_once('=') {
            None => (item.as_str(), "yes"),
            Some(pair) => pair,
        };
        if id.is_empty() {
            bail!("answer {item:?} has an empty question id");
        }
        match value {
            "yes" | "true" => answers.set(id, true),
            "no" | "false" => answers.set(id, false),
            other => answers.set(id, other),
        }
    }
    Ok(answers)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::debug!("clausecraft v{}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();

    match cli.command {
        Command::Sectors => {
            let registry = load_registry(&cli.config)?;
            let sectors: Vec<_> = registry.sectors().collect();
            print!("{}", render::sector_list(&sectors));
        }

        Command::Questions { sector, pattern } => {
            let registry = load_registry(&cli.config)?;
            let questions: Vec<_> = match pattern {
                Some(pattern) => registry.questions_for(&sector, pattern)?,
                None => registry.questions(&sector)?.iter().collect(),
            };
            print!("{}", render::question_list(&questions));
        }

        Command::Compose {
            sector,
            answers,
            json,
        } => {
            let registry = load_registry(&cli.config)?;
            let composer = Composer::new(registry);
            let doc = composer.compose(&sector, &parse_answers(&answers)?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", render::skeleton(&doc));
            }
        }

        Command::Draft { dir, command } => {
            let store = LocalDraftStore::open(&dir)
                .with_context(|| format!("opening draft store at {}", dir.display()))?;
            match command {
                DraftCommand::List => {
                    for draft in store.list()? {
                        println!("{}", render::draft_summary_line(&draft));
                    }
                }
                DraftCommand::Show { id } => {
                    print!("{}", render::draft_full(&store.load(&id)?));
                }
                DraftCommand::Save {
                    id,
                    sector,
                    title,
                    file,
                } => {
                    let registry = load_registry(&cli.config)?;
                    // Refuse to file a draft under a sector that does not exist.
                    registry.sector(&sector)?;
                    let body = std::fs::read_to_string(&file)
                        .with_context(|| format!("reading {}", file.display()))?;
                    store.save(&Draft::new(id, sector, title, body, AnswerSet::new()))?;
                }
                DraftCommand::Delete { id } => {
                    store.delete(&id)?;
                }
            }
        }

        Command::Generate {
            sector,
            answers,
            brief,
            document_type,
            api_url,
            api_key,
            model,
            save,
            drafts_dir,
        } => {
            let registry = load_registry(&cli.config)?;
            let composer = Composer::new(registry);
            let answers = parse_answers(&answers)?;
            let skeleton = composer.compose(&sector, &answers)?;

            let builder = PromptBuilder::new(&document_type);
            let payload = builder.build(&skeleton, &brief);
            let client = CompletionClient::new(api_url, api_key, model);
            let body = client
                .complete(builder.system_instruction(), &payload)
                .await
                .context("completion request failed")?;

            println!("{body}");

            if let Some(id) = save {
                let store = LocalDraftStore::open(&drafts_dir)
                    .with_context(|| format!("opening draft store at {}", drafts_dir.display()))?;
                let title = format!("{document_type} ({sector})");
                store.save(&Draft::new(id, sector, title, body, answers))?;
            }
        }
    }

    Ok(())
}

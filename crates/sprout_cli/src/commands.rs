//! Command handlers.

use crate::cli::{AddArgs, Cli, Command, EditArgs, GraphArgs, OutputFormat};
use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;
use sprout_core::db::open_db;
use sprout_core::{
    highlight, init_logging, GraphScene, KeywordExtractor, Note, NoteInput, NoteService,
    NoteServiceError, NoteUpdate, OwnerId, SproutConfig, SqliteNoteRepository,
};
use std::path::Path;

type Service<'conn> = NoteService<SqliteNoteRepository<'conn>, Box<dyn KeywordExtractor>>;

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = SproutConfig::from_env().context("failed to read configuration")?;
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let mut conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    let repo = SqliteNoteRepository::try_new(&mut conn).context("note store is not ready")?;
    let extractor = config
        .keyword_extractor()
        .context("failed to set up keyword extraction")?;
    let mut service =
        NoteService::new(repo, extractor).with_keyword_refresh(config.keyword_refresh);

    let owner = cli.owner;
    if config.seed_on_empty && !matches!(cli.command, Command::Seed) {
        service.seed_if_empty(owner)?;
    }

    match cli.command {
        Command::Add(args) => add(&mut service, args, owner, cli.format).await,
        Command::List => list(&service, owner, cli.format),
        Command::Show(args) => show(&service, args.id, owner, cli.format),
        Command::Edit(args) => edit(&mut service, args, owner, cli.format).await,
        Command::Rm(args) => {
            service.delete_note(args.id, owner).map_err(user_facing)?;
            println!("Pruned note {}", args.id);
            Ok(())
        }
        Command::Graph(args) => graph(&service, &config, args, owner, cli.format),
        Command::Seed => {
            let planted = service.seed_if_empty(owner)?;
            if planted.is_empty() {
                println!("Garden already has notes; nothing planted");
            } else {
                println!("Planted {} welcome notes", planted.len());
            }
            Ok(())
        }
    }
}

async fn add(
    service: &mut Service<'_>,
    args: AddArgs,
    owner: OwnerId,
    format: OutputFormat,
) -> Result<()> {
    let content = match args.file.as_deref() {
        Some(path) => read_body(path)?,
        None => args.content,
    };
    let note = service
        .create_note(NoteInput::new(args.title, content), owner)
        .await
        .map_err(user_facing)?;
    print_note(&note, format)
}

async fn edit(
    service: &mut Service<'_>,
    args: EditArgs,
    owner: OwnerId,
    format: OutputFormat,
) -> Result<()> {
    let content = match args.file.as_deref() {
        Some(path) => Some(read_body(path)?),
        None => args.content,
    };
    let update = NoteUpdate {
        title: args.title,
        content,
    };
    if update.is_empty() {
        bail!("nothing to change; pass --title, --content or --file");
    }

    let note = service
        .update_note(args.id, update, owner)
        .await
        .map_err(user_facing)?;
    print_note(&note, format)
}

fn list(service: &Service<'_>, owner: OwnerId, format: OutputFormat) -> Result<()> {
    let notes = service.list_notes(owner)?;
    match format {
        OutputFormat::Json => print_json(&notes),
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("Plant your first idea to start the garden.");
            }
            for note in &notes {
                println!("{:>5}  {}  [{}]", note.id, note.title, note.keywords.join(", "));
            }
            Ok(())
        }
    }
}

fn show(service: &Service<'_>, id: i64, owner: OwnerId, format: OutputFormat) -> Result<()> {
    match service.get_note(id, owner)? {
        Some(note) => print_note(&note, format),
        None => bail!("note not found: {id}"),
    }
}

fn graph(
    service: &Service<'_>,
    config: &SproutConfig,
    args: GraphArgs,
    owner: OwnerId,
    format: OutputFormat,
) -> Result<()> {
    let strategy = args.strategy.unwrap_or(config.graph_strategy);
    let theme = args.theme.unwrap_or(config.theme);
    let mode = args.highlight.unwrap_or(config.highlight_mode);

    let graph = service.graph(owner, strategy)?;
    let focus = highlight(&graph, args.focus, mode);
    info!(
        "event=graph_build module=cli status=ok owner_id={owner} nodes={} edges={} strategy={:?}",
        graph.nodes.len(),
        graph.edges.len(),
        strategy
    );

    let scene = GraphScene::new(&graph, theme, &focus);
    match format {
        OutputFormat::Json => print_json(&scene),
        OutputFormat::Human => {
            if scene.is_empty() {
                println!("Plant your first idea to start the garden.");
                return Ok(());
            }
            for node in &graph.nodes {
                let marker = if focus.contains_node(node.id) { "*" } else { " " };
                println!(
                    "{marker}{:>5}  {}  (weight {}, {} links)",
                    node.id,
                    node.title,
                    node.weight,
                    graph.degree(node.id)
                );
            }
            for edge in &graph.edges {
                let marker = if focus.contains_link(edge) { "*" } else { " " };
                println!("{marker}{} -- {}", edge.source, edge.target);
            }
            Ok(())
        }
    }
}

fn print_note(note: &Note, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(note),
        OutputFormat::Human => {
            println!("#{} {}", note.id, note.title);
            println!("keywords: {}", note.keywords.join(", "));
            if !note.content.is_empty() {
                println!();
                println!("{}", note.content);
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_body(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read note body from {}", path.display()))
}

/// Store failures other than a missing note get a generic message; the
/// detail goes to the log.
fn user_facing(err: NoteServiceError) -> anyhow::Error {
    match err {
        NoteServiceError::NoteNotFound(_) | NoteServiceError::Validation(_) => err.into(),
        NoteServiceError::Repo(inner) => {
            log::error!("event=store_error module=cli status=error error={inner}");
            anyhow::anyhow!("internal error while accessing notes")
        }
    }
}

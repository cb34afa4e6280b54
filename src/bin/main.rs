use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

use stepstone::config::load_layered_settings;
use stepstone::language::{LanguageRegistry, detect_language};
use stepstone::{
    Document, GoTo, Motion, NavError, NavResult, Navigator, NavigatorSettings, NodeRules, Position,
    ProviderHandle, Range, TreeProvider, TreeSitterProvider,
};

/// Statement-wise cursor navigation over Tree-sitter parse trees
#[derive(Parser)]
#[command(name = "stepstone")]
#[command(version)]
#[command(about = "Statement-wise cursor navigation over Tree-sitter parse trees")]
struct Cli {
    /// Settings file layered over the built-in defaults and the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the statement at the cursor, or the next one when the cursor is at its end
    Next {
        #[command(flatten)]
        cursor: Cursor,
    },
    /// Resolve the statement at the cursor, or the previous one when the cursor is at its start
    Prev {
        #[command(flatten)]
        cursor: Cursor,
    },
    /// Jump to a line-anchored target
    Goto {
        #[command(flatten)]
        cursor: Cursor,

        /// Where to go
        #[arg(long, value_enum)]
        to: Target,
    },
    /// Describe the cursor line: emptiness, start/end and trimmed range
    Line {
        #[command(flatten)]
        cursor: Cursor,
    },
    /// Print the effective settings as TOML
    Config,
}

#[derive(Args)]
struct Cursor {
    /// Source file to navigate
    file: PathBuf,

    /// Zero-based line
    #[arg(long, default_value_t = 0)]
    line: usize,

    /// Zero-based byte column
    #[arg(long, default_value_t = 0)]
    column: usize,

    /// Language id (detected from the file extension when omitted)
    #[arg(long)]
    language: Option<String>,

    /// Parser shared library for the language, overriding the configured one
    #[arg(long)]
    grammar: Option<PathBuf>,

    /// Count columns in UTF-16 code units instead of bytes, for input and output
    #[arg(long)]
    utf16: bool,
}

/// Column convention used on the command line
struct Columns<'d> {
    document: &'d Document,
    utf16: bool,
}

impl Columns<'_> {
    fn input(&self, line: usize, column: usize) -> NavResult<Position> {
        let position = Position::new(line, column);
        if self.utf16 {
            self.document.position_from_utf16(position)
        } else {
            Ok(position)
        }
    }

    fn position(&self, position: Position) -> NavResult<Position> {
        if self.utf16 {
            self.document.position_to_utf16(position)
        } else {
            Ok(position)
        }
    }

    fn range(&self, range: Range) -> NavResult<Range> {
        Ok(Range::new(
            self.position(range.start)?,
            self.position(range.end)?,
        ))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    NextLine,
    NextStart,
    PrevLine,
    PrevEnd,
}

impl From<Target> for GoTo {
    fn from(target: Target) -> Self {
        match target {
            Target::NextLine => GoTo::NextNonEmptyLineStart,
            Target::NextStart => GoTo::NextStart,
            Target::PrevLine => GoTo::PrevNonEmptyLineStart,
            Target::PrevEnd => GoTo::PrevEnd,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> NavResult<()> {
    let mut settings = load_layered_settings(cli.config.as_deref())?;
    let handle = ProviderHandle::new();

    let output = match cli.command {
        Commands::Config => {
            let toml = toml::to_string_pretty(&settings)
                .map_err(|e| NavError::config(e.to_string()))?;
            print!("{}", toml);
            return Ok(());
        }
        Commands::Next { cursor } => {
            let (document, rules) = open(&handle, &mut settings, &cursor).await?;
            let navigator = Navigator::new(&handle, &document, &rules)?;
            motion_output(&navigator, &columns(&document, &cursor), Motion::Next, &cursor)?
        }
        Commands::Prev { cursor } => {
            let (document, rules) = open(&handle, &mut settings, &cursor).await?;
            let navigator = Navigator::new(&handle, &document, &rules)?;
            motion_output(&navigator, &columns(&document, &cursor), Motion::Previous, &cursor)?
        }
        Commands::Goto { cursor, to } => {
            let (document, rules) = open(&handle, &mut settings, &cursor).await?;
            let navigator = Navigator::new(&handle, &document, &rules)?;
            let columns = columns(&document, &cursor);
            let from = columns.input(cursor.line, cursor.column)?;
            let target = GoTo::from(to);
            json!({
                "target": target,
                "from": columns.position(from)?,
                "position": columns.position(navigator.go_to(target, from)?)?,
            })
        }
        Commands::Line { cursor } => {
            let (document, rules) = open(&handle, &mut settings, &cursor).await?;
            let navigator = Navigator::new(&handle, &document, &rules)?;
            let columns = columns(&document, &cursor);
            let line = cursor.line;
            let nodes = navigator
                .query()
                .line_nodes(line)?
                .into_iter()
                .map(|node| {
                    Ok(json!({
                        "kind": node.kind(),
                        "range": columns.range(node.range())?,
                    }))
                })
                .collect::<NavResult<Vec<_>>>()?;
            json!({
                "line": line,
                "empty": navigator.classifier().is_line_empty(line)?,
                "start": columns.position(navigator.line_start(line)?)?,
                "end": columns.position(navigator.line_end(line)?)?,
                "text": columns.range(navigator.select_line(line)?)?,
                "nodes": nodes,
            })
        }
    };

    let rendered =
        serde_json::to_string_pretty(&output).map_err(|e| NavError::provider(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}

fn columns<'d>(document: &'d Document, cursor: &Cursor) -> Columns<'d> {
    Columns {
        document,
        utf16: cursor.utf16,
    }
}

fn motion_output(
    navigator: &Navigator<'_>,
    columns: &Columns<'_>,
    motion: Motion,
    cursor: &Cursor,
) -> NavResult<serde_json::Value> {
    let from = columns.input(cursor.line, cursor.column)?;
    let range = navigator.select(motion, from)?;
    let position = match motion {
        Motion::Next => range.end,
        Motion::Previous => range.start,
    };
    Ok(json!({
        "motion": motion,
        "from": columns.position(from)?,
        "range": columns.range(range)?,
        "position": columns.position(position)?,
    }))
}

/// Read the file, load its grammar and activate the provider
async fn open(
    handle: &ProviderHandle,
    settings: &mut NavigatorSettings,
    cursor: &Cursor,
) -> NavResult<(Document, NodeRules)> {
    let language = detect_language(&cursor.file, cursor.language.as_deref(), settings)
        .ok_or_else(|| NavError::language_not_found(cursor.file.display().to_string()))?;

    if let Some(grammar) = &cursor.grammar {
        settings.languages.entry(language.clone()).or_default().library =
            Some(grammar.to_string_lossy().into_owned());
    }

    let document = read_document(&cursor.file, &language)?;
    let rules = NodeRules::for_language(settings, &language);

    let provider = Arc::new(TreeSitterProvider::new(LanguageRegistry::new()));
    provider.ensure_language(settings, &language)?;
    handle
        .activate(|| async move { Ok(provider as Arc<dyn TreeProvider>) })
        .await?;

    log::debug!(
        target: "stepstone::cli",
        "Opened {} as {} ({} lines)",
        document.uri(),
        language,
        document.line_count()
    );
    Ok((document, rules))
}

fn read_document(path: &Path, language: &str) -> NavResult<Document> {
    let text = std::fs::read_to_string(path)?;
    let absolute = std::fs::canonicalize(path)?;
    let uri = Url::from_file_path(&absolute)
        .map_err(|()| NavError::provider(format!("not a file path: {}", absolute.display())))?;
    Ok(Document::new(uri, language, text))
}

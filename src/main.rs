//! Command line entry point for the translation store.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use clap::{
    Parser,
    Subcommand,
};
use i18n_store::codec::{
    unflatten_to_string,
    unflatten_values,
};
use i18n_store::config::ConfigManager;
use i18n_store::importer::{
    import_workspace,
    load_and_save,
    load_and_save_auto_lang,
};
use i18n_store::store::TranslationStore;
use i18n_store::types::UserScope;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "i18n-store", version, about = "Nested translation files backed by SQLite")]
struct Cli {
    /// Workspace root holding `.i18n-store.json` and the translation files
    #[arg(long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// SQLite database file, relative to the workspace (overrides `database.path`)
    #[arg(long, global = true)]
    database: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Import translation files; scans the workspace when no path is given
    Import {
        /// Translation files to import
        paths: Vec<PathBuf>,

        /// Language of the given files (defaults to the file name)
        #[arg(long)]
        lang: Option<String>,

        /// Store the rows as overrides of this user
        #[arg(long)]
        user: Option<String>,
    },

    /// Print the translations of a language as nested JSON
    Export {
        /// Language tag to export
        lang: String,

        /// Resolve user overrides of this user before global defaults
        #[arg(long)]
        user: Option<String>,

        /// Emit `<key>_tooltip` siblings
        #[arg(long)]
        tooltips: bool,

        /// Print the flat key-path map instead of the nested tree
        #[arg(long, conflicts_with = "tooltips")]
        flat: bool,
    },

    /// Print a single translation
    Get {
        /// Delimiter-joined key path (`topbar.profile`)
        key_path: String,

        /// Language tag
        lang: String,

        /// Prefer the override of this user
        #[arg(long)]
        user: Option<String>,
    },
}

/// ログ出力を初期化する
///
/// `--log-file` 指定時はファイルに書き出し、返されたガードが生きている間だけ出力される
fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = log_file else {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
        return Ok(None);
    };

    let file_name = path.file_name().context("--log-file must name a file")?;
    let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
    Ok(Some(guard))
}

/// Entry point
fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref())?;

    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(Some(cli.workspace))
        .context("Failed to load workspace settings")?;
    if let Some(database) = cli.database {
        config_manager.set_database_path(database).context("Invalid --database")?;
    }
    let settings = config_manager.get_settings().clone();
    let workspace = config_manager.workspace_root().cloned().unwrap_or_default();

    let database_path = config_manager.database_path();
    let mut store = TranslationStore::open(&database_path)?;
    tracing::debug!(database = %database_path.display(), "Opened translation store");

    let delimiter = settings.key_separator;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Import { paths, lang, user } => {
            let user = UserScope::from(user);
            if paths.is_empty() {
                let summary = import_workspace(&mut store, &workspace, &settings, &user)?;
                writeln!(
                    stdout,
                    "Imported {} file(s), {} row(s); skipped {}",
                    summary.files.len(),
                    summary.written,
                    summary.skipped.len()
                )?;
                for skipped in &summary.skipped {
                    writeln!(stdout, "  skipped: {}", skipped.display())?;
                }
            } else {
                for path in &paths {
                    let written = match &lang {
                        Some(lang) => load_and_save(&mut store, path, lang, &user, delimiter),
                        None => load_and_save_auto_lang(&mut store, path, &user, delimiter),
                    }
                    .with_context(|| format!("Failed to import {}", path.display()))?;
                    writeln!(stdout, "{}: {written} row(s)", path.display())?;
                }
            }
        }
        Command::Export { lang, user, tooltips, flat } => {
            let user = UserScope::from(user);
            let rendered = if tooltips {
                unflatten_to_string(&store.export_with_tooltips(&lang, &user)?, delimiter)?
            } else if flat {
                let sorted: BTreeMap<_, _> = store.export(&lang, &user)?.into_iter().collect();
                serde_json::to_string_pretty(&sorted)?
            } else {
                let tree = unflatten_values(&store.export(&lang, &user)?, delimiter)?;
                serde_json::to_string_pretty(&tree)?
            };
            writeln!(stdout, "{rendered}")?;
        }
        Command::Get { key_path, lang, user } => {
            let value = store.get(&UserScope::from(user), &key_path, &lang)?;
            writeln!(stdout, "{value}")?;
        }
    }

    Ok(())
}

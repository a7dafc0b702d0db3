// edprefs - inspect and change the active rich-text editor from a shell

mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use editor_prefs::{
    BuildConfiguration, EditorSettings, EditorVariant, JsonFileStore, KeyValueStore, PrefsConfig,
    PrefsError, Setting, ACTIVE_EDITOR_KEY,
};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "edprefs")]
#[command(about = "Inspect and change which rich-text editor is active")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/editor-prefs/config.toml)
    #[arg(long, global = true, env = "EDITOR_PREFS_CONFIG")]
    config: Option<PathBuf>,

    /// Preference file (overrides config.toml)
    #[arg(long, global = true, env = "EDITOR_PREFS_STORE")]
    store: Option<PathBuf>,

    /// Build configuration to run under (overrides config.toml)
    #[arg(long, global = true)]
    build: Option<BuildConfiguration>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active editor and where it comes from
    #[command(after_help = "\
Examples:
  edprefs show
  edprefs show --json")]
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Make an editor the active one
    #[command(after_help = "\
Examples:
  edprefs enable legacy
  edprefs --store ./prefs.json enable aztec")]
    Enable {
        /// Editor to activate (legacy or aztec)
        editor: EditorVariant,
    },

    /// Clear the selection so the default editor applies again
    Reset,

    /// Print the preference file path
    Path,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
        )
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PrefsConfig::load_from(path),
        None => PrefsConfig::load(),
    };
    if let Some(store) = cli.store {
        config.store_path = Some(store);
    }
    if let Some(build) = cli.build {
        config.build = Some(build);
    }

    let profile = config.build();
    log::debug!("running under {profile}");

    let result = profile.test(|| run(cli.command, &config));

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(command: Commands, config: &PrefsConfig) -> Result<(), CliError> {
    match command {
        Commands::Show { json } => cmd_show(config, json),
        Commands::Enable { editor } => cmd_enable(config, editor),
        Commands::Reset => cmd_reset(config),
        Commands::Path => {
            println!("{}", config.store_path().display());
            Ok(())
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<PrefsError> for CliError {
    fn from(e: PrefsError) -> Self {
        match e {
            PrefsError::Parse { ref path, .. } => {
                let hint = format!("fix or remove {} to start over", path.display());
                Self { code: EXIT_ERROR, message: e.to_string(), hint: Some(hint) }
            }
            PrefsError::UnknownVariant(_) | PrefsError::UnknownBuildConfiguration(_) => {
                Self::usage(e.to_string())
            }
            _ => Self { code: EXIT_ERROR, message: e.to_string(), hint: None },
        }
    }
}

fn open_store(config: &PrefsConfig) -> Result<Arc<JsonFileStore>, CliError> {
    Ok(Arc::new(JsonFileStore::open(config.store_path())?))
}

#[derive(Serialize)]
struct ShowReport {
    editor: EditorVariant,
    selection: Setting<EditorVariant>,
    explicit: bool,
    build: BuildConfiguration,
    store: PathBuf,
}

fn cmd_show(config: &PrefsConfig, json: bool) -> Result<(), CliError> {
    let store = open_store(config)?;
    let settings = EditorSettings::new(store.clone());

    let report = ShowReport {
        editor: settings.editor(),
        selection: settings.selection(),
        explicit: settings.has_explicit_selection(),
        build: BuildConfiguration::current(),
        store: store.path().to_path_buf(),
    };

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?;
        println!("{}", out);
    } else {
        let source = if report.explicit { "selected" } else { "default" };
        println!("editor:  {} ({})", report.editor, source);
        println!("build:   {}", report.build);
        println!("store:   {}", report.store.display());
    }
    Ok(())
}

fn cmd_enable(config: &PrefsConfig, editor: EditorVariant) -> Result<(), CliError> {
    let store = open_store(config)?;
    let settings = EditorSettings::new(store.clone());

    settings.enable(editor);
    // set() only logs write failures; surface them as an exit code here
    store
        .flush()
        .map_err(|e| CliError::from(e).with_hint("check permissions on the preference file"))?;

    println!("editor:  {}", settings.editor());
    Ok(())
}

fn cmd_reset(config: &PrefsConfig) -> Result<(), CliError> {
    let store = open_store(config)?;
    let settings = EditorSettings::new(store.clone());

    // Also clears values that don't name an editor
    if store.get(ACTIVE_EDITOR_KEY).is_some() {
        settings.reset();
        store.flush()?;
    }

    println!("editor:  {} (default)", settings.editor());
    Ok(())
}

//! CLI command definitions and handlers

pub(crate) mod analyze;
mod settings;

use crate::ai::LlmBackend;
use crate::config::{SettingsStore, Theme, UserConfig};
use crate::reporters::OutputFormat;
use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;

/// nutrilabel - nutrition facts for web content
///
/// 100% LOCAL by default. Text only leaves your machine with --remote.
#[derive(Parser, Debug)]
#[command(name = "nutrilabel")]
#[command(
    version,
    about = "Nutrition facts for web content: fact density, bias, emotional load, perspective diversity, complexity and source credibility",
    after_help = "\
Examples:
  nutrilabel analyze article.txt                    Score a saved article
  curl -s URL | nutrilabel analyze --url URL        Score piped text
  nutrilabel analyze page.json --format json        JSON output for scripting
  nutrilabel analyze article.txt --remote           Ask the configured LLM instead
  nutrilabel settings set factDensity 80            Store a preference
  nutrilabel config init                            Create ~/.config/nutrilabel/config.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ~/.config/nutrilabel/config.toml)
    #[arg(long, global = true, env = "NUTRILABEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Settings file (default: ~/.config/nutrilabel/settings.json)
    #[arg(long, global = true, env = "NUTRILABEL_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score pages and print their nutrition labels
    #[command(after_help = "\
Inputs:
  FILE.txt      Plain page text; the file name becomes the title
  FILE.json     {\"text\": ..., \"url\": ..., \"title\": ...}
  -             Read page text from stdin (also the default with no files)")]
    Analyze {
        /// Text or JSON page files
        files: Vec<PathBuf>,

        /// Page URL, used for source credibility
        #[arg(long)]
        url: Option<String>,

        /// Page title shown on the label
        #[arg(long)]
        title: Option<String>,

        /// Analyze with a remote LLM, falling back to local heuristics on failure
        #[arg(long)]
        remote: bool,

        /// LLM backend: gemini, openai, ollama (default from config)
        #[arg(long, requires = "remote")]
        backend: Option<LlmBackend>,

        /// Model name (default depends on backend)
        #[arg(long, requires = "remote")]
        model: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text")]
        format: OutputFormat,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// View or change stored preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Manage user configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version info
    Version,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Show preferences and the badges they earn
    Show,
    /// Set a metric preference (0-100)
    Set {
        /// Metric name, e.g. factDensity or biasLevel
        metric: String,
        /// Preference value; clamped into 0-100
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Set the UI theme
    Theme {
        /// light or dark
        theme: Theme,
    },
    /// Switch between light and dark
    ToggleTheme,
    /// Reset every metric preference to 50 (the theme is kept)
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize user config with example settings
    Init,
    /// Show current configuration
    Show,
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            files,
            url,
            title,
            remote,
            backend,
            model,
            format,
            output,
            no_color,
        } => {
            let config = load_config(&cli.config)?;
            let options = analyze::AnalyzeOptions {
                files,
                url,
                title,
                remote,
                backend,
                model,
                format,
                output,
                color: !no_color && console::colors_enabled(),
            };
            analyze::run(&config, options)
        }

        Commands::Settings { action } => {
            let store = settings_store(cli.settings)?;
            match action {
                SettingsAction::Show => settings::show(&store),
                SettingsAction::Set { metric, value } => settings::set(&store, &metric, value),
                SettingsAction::Theme { theme } => settings::theme(&store, theme),
                SettingsAction::ToggleTheme => settings::toggle_theme(&store),
                SettingsAction::Reset => settings::reset(&store),
            }
        }

        Commands::Config { action } => run_config_action(action, &cli.config, cli.settings),

        Commands::Version => {
            println!("nutrilabel {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn config_path(explicit: &Option<PathBuf>) -> Option<PathBuf> {
    explicit.clone().or_else(UserConfig::user_config_path)
}

fn load_config(explicit: &Option<PathBuf>) -> Result<UserConfig> {
    UserConfig::load_from(config_path(explicit).as_deref())
}

fn settings_store(explicit: Option<PathBuf>) -> Result<SettingsStore> {
    let path = explicit
        .or_else(SettingsStore::default_path)
        .ok_or_else(|| anyhow::anyhow!("Could not determine settings path; pass --settings"))?;
    Ok(SettingsStore::new(path))
}

fn run_config_action(
    action: ConfigAction,
    explicit: &Option<PathBuf>,
    settings: Option<PathBuf>,
) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config_at(config_path(explicit))?;
            println!("{} Config initialized at: {}", style("✓").green(), path.display());
            println!("\nEdit to add your API key:");
            println!("  {}", path.display());
            println!("\nOr set via environment:");
            println!("  export GEMINI_API_KEY=\"...\"");
            Ok(())
        }
        ConfigAction::Show => show_config(explicit, settings),
    }
}

fn show_config(explicit: &Option<PathBuf>, settings: Option<PathBuf>) -> Result<()> {
    let config = load_config(explicit)?;

    println!("Config paths:");
    if let Some(path) = config_path(explicit) {
        let status = if path.exists() { "✓" } else { "(not found)" };
        println!("  Config:   {} {}", path.display(), status);
    }
    if let Some(path) = settings.or_else(SettingsStore::default_path) {
        let status = if path.exists() { "✓" } else { "(not found)" };
        println!("  Settings: {} {}", path.display(), status);
    }
    println!();

    let ai = config.ai_config(None, None)?;
    println!("AI Backend: {}", ai.backend);
    println!("  Model:    {}", ai.model());
    println!("  Endpoint: {}", ai.endpoint());
    println!("  Timeout:  {}s", ai.timeout_secs);
    if ai.backend.requires_api_key() {
        let key_status = match config.api_key_for(ai.backend) {
            Some(key) if !key.trim().is_empty() => format!("✓ configured ({})", mask_key(key)),
            _ => "✗ not set".to_string(),
        };
        println!("  {}: {}", ai.backend.env_key(), key_status);
    }
    println!();

    let lexicon = config.lexicon();
    let mut categories: Vec<&str> = lexicon.categories().collect();
    categories.sort_unstable();
    println!("Lexicon:");
    for category in categories {
        let count = lexicon.terms(category).map_or(0, |t| t.len());
        println!("  {:<12} {} terms", category, count);
    }
    println!();

    let sources = config.source_registry();
    println!("Source credibility (first match wins):");
    for rule in sources.rules() {
        println!("  {:<20} {}", rule.pattern, rule.score);
    }
    println!("  {:<20} {}", "(anything else)", sources.fallback());
    Ok(())
}

/// Show only the last four characters of a key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.trim().chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

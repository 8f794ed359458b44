//! Analyze command - score pages and print their nutrition labels
//!
//! Inputs are plain text files, JSON `PageContent` files (`.json`), or stdin
//! (`-` or no files at all). Pages are scored in parallel. With `--remote`
//! each page goes to the configured LLM; if that fails the page falls back
//! to the local heuristics with a warning.

use crate::ai::{AiClient, LlmBackend, RemoteAnalyzer, TextGenerator};
use crate::config::UserConfig;
use crate::metrics::HeuristicAnalyzer;
use crate::models::{Analysis, AnalysisSource, PageContent};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use console::style;
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for one `analyze` run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub files: Vec<PathBuf>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub remote: bool,
    pub backend: Option<LlmBackend>,
    pub model: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub color: bool,
}

/// Run the analyze command
pub fn run(config: &UserConfig, options: AnalyzeOptions) -> Result<()> {
    let mut pages = load_pages(&options.files, &mut std::io::stdin().lock())?;
    for page in &mut pages {
        if let Some(url) = &options.url {
            page.url = url.clone();
        }
        if let Some(title) = &options.title {
            page.title = title.clone();
        }
        if !page.is_substantial() {
            warn!(
                "'{}' has only {} characters; scores on short text are unreliable",
                display_name(page),
                page.text.chars().count()
            );
        }
    }

    let heuristics = config.heuristic_analyzer();
    let remote = if options.remote {
        match remote_analyzer(config, options.backend, options.model.clone()) {
            Ok(analyzer) => Some(analyzer),
            Err(e) => {
                warn!("Remote analysis unavailable, using local heuristics: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    info!("Analyzing {} page(s)", pages.len());
    let analyses: Vec<Analysis> = pages
        .par_iter()
        .map(|page| analyze_page(page, &heuristics, remote.as_ref()))
        .collect();

    let color = options.color && options.output.is_none();
    let output = reporters::report(&analyses, options.format, color)?;

    match &options.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Report written to: {}", style(path.display()).cyan());
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn remote_analyzer(
    config: &UserConfig,
    backend: Option<LlmBackend>,
    model: Option<String>,
) -> Result<RemoteAnalyzer> {
    let ai_config = config.ai_config(backend, model)?;
    let key = config.api_key_for(ai_config.backend);
    let client = AiClient::from_config(ai_config, key)?;
    Ok(RemoteAnalyzer::new(client))
}

/// Score one page, remotely when possible.
pub fn analyze_page<G: TextGenerator>(
    page: &PageContent,
    heuristics: &HeuristicAnalyzer,
    remote: Option<&RemoteAnalyzer<G>>,
) -> Analysis {
    if let Some(remote) = remote {
        match remote.analyze(&page.text) {
            Ok(metrics) => return Analysis::new(page, remote.source(), metrics),
            Err(e) => warn!(
                "Remote analysis failed for '{}', using local heuristics: {}",
                display_name(page),
                e
            ),
        }
    }
    Analysis::new(page, AnalysisSource::Heuristic, heuristics.analyze(page))
}

fn display_name(page: &PageContent) -> &str {
    [page.title.as_str(), page.url.as_str()]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("stdin")
}

/// Load every input. No files (or `-`) reads `stdin`, at most once.
pub fn load_pages(files: &[PathBuf], stdin: &mut dyn Read) -> Result<Vec<PageContent>> {
    if files.is_empty() {
        return Ok(vec![read_stdin(stdin)?]);
    }

    let mut stdin_used = false;
    let mut pages = Vec::with_capacity(files.len());
    for file in files {
        if file.as_os_str() == "-" {
            if stdin_used {
                anyhow::bail!("stdin ('-') can only be given once");
            }
            stdin_used = true;
            pages.push(read_stdin(stdin)?);
        } else {
            pages.push(load_file(file)?);
        }
    }
    Ok(pages)
}

fn read_stdin(stdin: &mut dyn Read) -> Result<PageContent> {
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("Failed to read page text from stdin")?;
    debug!("Read {} bytes from stdin", text.len());
    Ok(PageContent::new(text, "", ""))
}

/// Read a text file, or a `PageContent` JSON object for `.json` files.
pub fn load_file(path: &Path) -> Result<PageContent> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let page: PageContent = serde_json::from_str(&content).with_context(|| {
            format!(
                "{} is not a page object (expected {{\"text\", \"url\", \"title\"}})",
                path.display()
            )
        })?;
        return Ok(page);
    }

    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(PageContent::new(content, "", title))
}

use anyhow::{Result, Context, anyhow};
use log::{info, warn, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::{AppError, InputError};
use crate::extraction::{AnalyzeSource, BrandHit, LlmExtractor, RuleExtractor};
use crate::file_utils::FileManager;
use crate::providers::CompletionProvider;
use crate::providers::openai::OpenAI;
use crate::web_fetcher::WebFetcher;

// @module: Application controller for brand extraction

/// Main application controller for brand extraction
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Rule engine built from the configuration
    extractor: RuleExtractor,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let extractor = RuleExtractor::new(config.extraction.clone());

        Ok(Self { config, extractor })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Turn paths and raw text into analysis sources.
    ///
    /// Directories are searched recursively for `.txt` and `.srt` files. Blank
    /// text is ignored. Fails with `InputError::EmptyInput` when nothing is left.
    pub fn collect_sources(&self, paths: &[PathBuf], text: Option<&str>) -> Result<Vec<AnalyzeSource>> {
        self.assemble_sources(paths, text, None)
    }

    /// Like [`Controller::collect_sources`], also fetching `url` and adding
    /// its visible page text as a plain-text source after everything else
    pub async fn collect_sources_with_url(&self, paths: &[PathBuf], text: Option<&str>, url: Option<&str>) -> Result<Vec<AnalyzeSource>> {
        let page_text = match url {
            Some(url) => Some(self.fetch_page(url).await?),
            None => None,
        };
        self.assemble_sources(paths, text, page_text.as_deref())
    }

    /// Visible text of the page at `url`
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let fetcher = WebFetcher::new(self.config.input.url_timeout_secs);
        let text = fetcher.fetch_text(url).await?;
        info!("Fetched {} characters of page text from {}", text.chars().count(), url);
        Ok(text)
    }

    fn assemble_sources(&self, paths: &[PathBuf], text: Option<&str>, page_text: Option<&str>) -> Result<Vec<AnalyzeSource>> {
        let max_bytes = self.config.input.max_file_bytes;
        let mut sources = Vec::new();

        for path in paths {
            if FileManager::dir_exists(path) {
                let files = FileManager::collect_input_files(path)?;
                if files.is_empty() {
                    warn!("No .txt or .srt files found in {:?}", path);
                }
                for file in files {
                    sources.push(FileManager::load_source(&file, max_bytes)?);
                }
            } else if path.exists() {
                sources.push(FileManager::load_source(path, max_bytes)?);
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", path));
            }
        }

        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            sources.push(AnalyzeSource::plain(text));
        }

        match page_text {
            Some(page) if !page.trim().is_empty() => sources.push(AnalyzeSource::plain(page)),
            Some(_) => warn!("Fetched page has no visible text"),
            None => {}
        }

        if sources.is_empty() {
            return Err(InputError::EmptyInput.into());
        }

        debug!("Collected {} source(s)", sources.len());
        Ok(sources)
    }

    /// Run the rule engine over `sources`
    pub fn analyze_rules(&self, sources: &[AnalyzeSource]) -> Vec<BrandHit> {
        let hits = self.extractor.extract(sources);
        info!("Found {} brand mention(s) in {} source(s)", hits.len(), sources.len());
        hits
    }

    /// Provider configured for the language-model path
    pub fn llm_provider(&self) -> Result<OpenAI, AppError> {
        let api_key = self.config.llm.get_api_key().ok_or(AppError::MissingApiKey)?;
        let llm = &self.config.llm;
        Ok(OpenAI::new(api_key, &llm.endpoint, &llm.model, llm.timeout_secs))
    }

    /// Run the language-model path over `sources` with `provider`.
    ///
    /// Sources are sent one request each; a progress bar is shown when there
    /// is more than one.
    pub async fn analyze_llm_with<P: CompletionProvider>(&self, sources: &[AnalyzeSource], provider: P) -> Result<Vec<BrandHit>> {
        let extractor = LlmExtractor::new(provider, self.config.llm.prompt.clone());

        let progress_bar = if sources.len() > 1 {
            let pb = ProgressBar::new(sources.len() as u64);
            let template_result = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sources ({percent}%) {msg} {eta}")
                .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(template_result.progress_chars("█▓▒░"));
            pb.set_message("Extracting");
            Some(pb)
        } else {
            None
        };

        let mut hits = Vec::new();
        for source in sources {
            let found = extractor.extract(std::slice::from_ref(source)).await
                .with_context(|| format!("Language-model extraction failed for {}", source.filename().unwrap_or("text input")))?;
            hits.extend(found);
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        info!("Language model reported {} brand mention(s) in {} source(s)", hits.len(), sources.len());
        Ok(hits)
    }

    /// Analyze `sources` with the rule engine or, when `use_llm` is set, the
    /// configured language-model provider
    pub async fn analyze(&self, sources: &[AnalyzeSource], use_llm: bool) -> Result<Vec<BrandHit>> {
        if use_llm {
            let provider = self.llm_provider()?;
            info!("Using language model {} at {}", provider.model(), provider.endpoint());
            self.analyze_llm_with(sources, provider).await
        } else {
            Ok(self.analyze_rules(sources))
        }
    }

    /// Serialize hits as a JSON array
    pub fn render_hits(hits: &[BrandHit], pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(hits)
        } else {
            serde_json::to_string(hits)
        };
        json.context("Failed to serialize hits to JSON")
    }

    /// Write hits to `output`, or stdout when `None`
    pub fn write_output(&self, hits: &[BrandHit], output: Option<&Path>, pretty: bool) -> Result<()> {
        let rendered = Self::render_hits(hits, pretty)?;
        match output {
            Some(path) => {
                FileManager::write_to_file(path, &rendered)?;
                info!("Wrote {} hit(s) to {:?}", hits.len(), path);
            }
            None => println!("{}", rendered),
        }
        Ok(())
    }
}

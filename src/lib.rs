/*!
 * # Brandspot - rule-based brand mention extraction
 *
 * A Rust library that finds mentions of commercial brands in plain text and
 * SRT subtitle transcripts.
 *
 * ## Features
 *
 * - Built-in alias table mapping surface forms to canonical brands
 * - Case-insensitive, word-boundary-safe alias matching
 * - Sentence units for plain text, cue units for subtitles
 * - Neighbourhood context and heuristic certainty for every hit
 * - Per-unit brand deduplication and ambiguous-token suppression
 * - Web pages as input, reduced to their visible text
 * - Optional language-model extraction through an OpenAI-compatible API
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SRT parsing into cues
 * - `extraction`: Brand extraction:
 *   - `extraction::aliases`: Alias table and suppression tokens
 *   - `extraction::segmenter`: Sentence splitting
 *   - `extraction::matcher`: Alias scanning
 *   - `extraction::context`: Context windows
 *   - `extraction::scoring`: Certainty heuristics
 *   - `extraction::core`: The rule extractor
 *   - `extraction::llm`: Language-model prompts and reply parsing
 * - `file_utils`: File system operations
 * - `web_fetcher`: URL input reduced to visible page text
 * - `app_controller`: Main application controller
 * - `providers`: Chat-completion clients:
 *   - `providers::openai`: OpenAI API client
 *   - `providers::mock`: Scripted provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod web_fetcher;
pub mod subtitle_processor;
pub mod extraction;
pub mod app_controller;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use subtitle_processor::{SrtCue, SubtitleParser};
pub use extraction::{AnalyzeSource, BrandHit, RuleConfig, RuleExtractor};
pub use errors::{AppError, InputError, ProviderError};

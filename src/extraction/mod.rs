/*!
 * Brand extraction from plain text and subtitle cues.
 *
 * The rule engine is split into these submodules:
 *
 * - `aliases`: alias → canonical brand table and suppression set
 * - `segmenter`: sentence splitting for plain text
 * - `matcher`: boundary-safe, case-insensitive alias scanning
 * - `context`: neighbourhood windows around a matched unit
 * - `scoring`: heuristic certainty
 * - `core`: the `RuleExtractor` tying the above together
 * - `model`: `AnalyzeSource` input and `BrandHit` output records
 *
 * `llm` holds the alternative path that asks a chat-completion model for the
 * same `BrandHit` records.
 */

// Re-export main types for easier usage
pub use self::aliases::{AliasAdditions, AliasEntry, AliasTable};
pub use self::context::ContextWindowConfig;
pub use self::core::{RuleConfig, RuleExtractor};
pub use self::llm::{LlmConfig, LlmExtractor};
pub use self::model::{AnalyzeSource, BrandHit};

// Submodules
pub mod aliases;
pub mod context;
pub mod core;
pub mod llm;
pub mod matcher;
pub mod model;
pub mod scoring;
pub mod segmenter;

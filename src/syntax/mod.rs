//! Syntax highlighting module
//!
//! Provides regex based lexical highlighting with:
//! - Language detection from file extensions
//! - Immutable per-language rule tables
//! - Full-text rescans folded into a last-write-wins span map
//!
//! ## Architecture
//!
//! ```text
//! Document Edit → TabController::on_content_changed
//!              → highlight(text, profile) → Vec<Span>
//!              → render: HighlightMap::styled(theme) → Vec<StyledRun>
//! ```
//!
//! `highlight` is a pure function of its inputs, so the full rescan can be
//! replaced by an incremental strategy without touching callers.

mod highlights;
mod languages;
mod profiles;

pub use highlights::{
    highlight, highlight_styled, HighlightMap, Span, StyledRun, TokenCategory,
};
pub use languages::LanguageId;
pub use profiles::{LanguageProfile, TokenRule};

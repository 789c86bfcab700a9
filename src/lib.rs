//! # Deckgen
//!
//! Slide deck layout and snapshot versioning.
//!
//! Deckgen places slide content on a fixed slide geometry and keeps a
//! numbered, timestamped history of every generated artifact.
//!
//! ## Features
//!
//! - **Layout**: content area, centered images, two-column and grid layouts,
//!   inch/EMU conversion
//! - **Versioning**: snapshot save, list, compare, rollback and backups
//! - **Bilingual text**: Japanese/English detection, font tables, text sizing
//! - **Deck definitions**: YAML decks planned into placed, styled elements
//!
//! ## Quick Start
//!
//! ```bash
//! # Plan a deck and snapshot the result
//! deckgen build deck.yaml --snapshot --note "first draft"
//!
//! # Show the history
//! deckgen versions list
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::derivable_impls)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::needless_pass_by_value)]

pub mod core;
pub mod deck;
pub mod i18n;
pub mod layout;
pub mod theme;
pub mod versions;

// Re-export commonly used types
pub use core::Config;
pub use deck::{DeckDefinition, DeckError, DeckPlan, DeckPlanner, JsonPlanRenderer};
pub use i18n::Language;
pub use layout::{LayoutEngine, LayoutError, Rect, SlideGeometry};
pub use theme::ColorScheme;
pub use versions::{Version, VersionComparison, VersionError, VersionManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "deckgen";

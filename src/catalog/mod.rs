//! Technology catalog wiring.
//!
//! This module wraps the devicon-style technology catalog (for example
//! `catalog/devicon.json`) together with the display-name override table so
//! renderers can resolve free-text technology names to icon assets. Types here
//! mirror the catalog fields; callers use `TechnologyIndex` for lookups and
//! `resolve_display_name` when they only need a label.

pub mod display;
pub mod index;
pub mod model;

pub use display::{DisplayNameOverrides, format_name_for_display, resolve_display_name};
pub use index::{MatchKind, ResolvedTechnology, TechnologyIndex};
pub use model::{IconAlias, RawTechnology, TechnologyEntry, load_raw_catalog};

/// Default relative path to the technology catalog.
pub const DEFAULT_CATALOG_PATH: &str = "catalog/devicon.json";

/// Default relative path to the display-name override table.
pub const DEFAULT_DISPLAY_NAMES_PATH: &str = "catalog/display-names.json";

/// Catalog compiled into the binary; used when no path is configured.
pub(crate) const BUNDLED_CATALOG: &str = include_str!("../../catalog/devicon.json");

/// Override table compiled into the binary.
pub(crate) const BUNDLED_DISPLAY_NAMES: &str = include_str!("../../catalog/display-names.json");

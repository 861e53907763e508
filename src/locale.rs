//! Locale roots.
//!
//! The default locale lives at the site root; each localized copy lives in a
//! single-segment subdirectory (`nl/`) holding a parallel set of pages.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::mapping::MappingEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locale {
    /// Pages at the site root, linked without a prefix.
    Default,
    /// Pages under `<root>/<dir>/`, linked with `/<dir>`.
    Localized(String),
}

impl Locale {
    /// Default locale first, then each localized directory in order.
    pub fn all(localized: &[String]) -> Vec<Locale> {
        std::iter::once(Locale::Default)
            .chain(localized.iter().cloned().map(Locale::Localized))
            .collect()
    }

    /// Directory holding this locale's pages.
    pub fn root(&self, site_root: &Path) -> PathBuf {
        match self {
            Self::Default => site_root.to_path_buf(),
            Self::Localized(dir) => site_root.join(dir),
        }
    }

    /// Absolute link prefix: `""` or `/nl`.
    pub fn prefix(&self) -> String {
        match self {
            Self::Default => String::new(),
            Self::Localized(dir) => format!("/{dir}"),
        }
    }

    /// Link written into connector pages, e.g. `/nl/blog/guide-for-sme.html`.
    pub fn href(&self, entry: &MappingEntry) -> String {
        format!("{}/{}", self.prefix(), entry.target.relative())
    }

    /// Display path relative to the site root, e.g. `nl/blog.html`.
    pub fn display_path(&self, relative: &str) -> String {
        match self {
            Self::Default => relative.to_string(),
            Self::Localized(dir) => format!("{dir}/{relative}"),
        }
    }

    /// Short tag used in move logs.
    pub fn tag(&self) -> String {
        match self {
            Self::Default => "EN".to_string(),
            Self::Localized(dir) => dir.to_ascii_uppercase(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Localized(dir) => f.write_str(dir),
        }
    }
}

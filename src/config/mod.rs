//! Run configuration: optional `sitemove.toml` plus command-line overrides.
//!
//! # Example
//!
//! ```toml
//! [site]
//! marker = "index.html"              # must exist in the root
//! locales = ["nl"]                   # localized copies under <root>/<dir>/
//! connectors = ["blog.html", "portfolio.html"]
//!
//! [move]
//! on_conflict = "overwrite"          # overwrite | skip
//!
//! # When present, replaces the built-in table.
//! [[mapping]]
//! from = "Guide for SME.html"
//! folder = "blog"
//! to = "guide-for-sme.html"
//! ```

mod error;

pub use error::{ConfigDiagnostics, ConfigError};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::cli::Cli;
use crate::locale::Locale;
use crate::mapping::{self, Folder, MappingEntry, MappingTable};
use crate::reorg::ConflictPolicy;

/// Config file looked up in the site root when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "sitemove.toml";

// ============================================================================
// root configuration
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReorgConfig {
    /// Site root (from `--root` or cwd).
    #[serde(skip)]
    pub root: PathBuf,

    /// Skip the confirmation prompt.
    #[serde(skip)]
    pub assume_yes: bool,

    /// Plan only, touch nothing.
    #[serde(skip)]
    pub dry_run: bool,

    #[serde(default)]
    pub site: SiteSection,

    #[serde(default, rename = "move")]
    pub moves: MoveSection,

    /// Replaces the built-in table when non-empty.
    #[serde(default)]
    pub mapping: Vec<MappingRow>,
}

/// `[site]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// File whose presence marks the site root.
    pub marker: String,
    /// Localized subdirectories, each a parallel copy of the site.
    pub locales: Vec<String>,
    /// Pages whose links are rewritten.
    pub connectors: Vec<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            marker: "index.html".to_string(),
            locales: vec!["nl".to_string()],
            connectors: vec!["blog.html".to_string(), "portfolio.html".to_string()],
        }
    }
}

/// `[move]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoveSection {
    pub on_conflict: ConflictPolicy,
}

/// One `[[mapping]]` row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingRow {
    pub from: String,
    pub folder: Folder,
    pub to: String,
}

impl ReorgConfig {
    /// Build the configuration for this invocation.
    ///
    /// An explicit `--config` must exist; the default `sitemove.toml` in the
    /// root is optional.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => normalize_path(root),
            None => std::env::current_dir().context("Failed to get current working directory")?,
        };

        let mut config = match &cli.config {
            Some(path) => {
                let path = if path.is_absolute() { path.clone() } else { root.join(path) };
                if !path.exists() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Self::from_path(&path)?
            }
            None => {
                let path = root.join(DEFAULT_CONFIG_NAME);
                if path.exists() { Self::from_path(&path)? } else { Self::default() }
            }
        };

        config.root = root;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&content).map_err(|e| ConfigError::Toml(path.to_path_buf(), e))
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        self.assume_yes = cli.yes;
        self.dry_run = cli.dry_run;
        if cli.no_overwrite {
            self.moves.on_conflict = ConflictPolicy::Skip;
        }
    }

    /// Collect every problem before failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.site.marker.trim().is_empty() {
            diag.error("site.marker", "must not be empty");
        }

        for (i, dir) in self.site.locales.iter().enumerate() {
            if !is_single_segment(dir) {
                diag.error_with_hint(
                    format!("site.locales[{i}]"),
                    format!("`{dir}` is not a single directory name"),
                    "use a plain subdirectory such as \"nl\"",
                );
            }
        }

        for (i, page) in self.site.connectors.iter().enumerate() {
            if !is_single_segment(page) {
                diag.error(
                    format!("site.connectors[{i}]"),
                    format!("`{page}` must be a file name in the locale root"),
                );
            }
        }

        for (i, row) in self.mapping.iter().enumerate() {
            if !is_single_segment(&row.from) {
                diag.error(
                    format!("mapping[{i}].from"),
                    format!("`{}` must be a file name in the locale root", row.from),
                );
            }
            if !mapping::is_clean_name(&row.to) {
                diag.error_with_hint(
                    format!("mapping[{i}].to"),
                    format!("`{}` is not a lowercase, hyphenated, URL-safe name", row.to),
                    "use only a-z, 0-9, '-' and '.', e.g. \"guide-for-sme.html\"",
                );
            }
        }

        diag.into_result()
    }

    /// The mapping table for this run: the configured rows, or the built-in table.
    pub fn table(&self) -> MappingTable {
        if self.mapping.is_empty() {
            return MappingTable::builtin();
        }
        self.mapping
            .iter()
            .map(|row| MappingEntry::new(row.from.clone(), row.folder, row.to.clone()))
            .collect()
    }

    /// Default locale followed by the configured localized directories.
    pub fn locales(&self) -> Vec<Locale> {
        Locale::all(&self.site.locales)
    }
}

/// A non-empty name with no path separators or dot segments.
fn is_single_segment(name: &str) -> bool {
    !name.trim().is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Absolute form of `path`, canonicalized when it exists.
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

// ============================================================================
// tests
// ============================================================================

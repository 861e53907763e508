//! The reorganization run.
//!
//! # Steps
//! 1. Check the marker file and ask for confirmation
//! 2. Create `blog/` and `projects/` in every locale root
//! 3. Rewrite links in the connector pages (before anything moves)
//! 4. Move every mapped file that exists into its folder
//! 5. Print counts and the manual follow-ups
//!
//! Per-file failures in steps 3 and 4 are logged and counted; they never abort
//! the run. Nothing is rolled back.

mod connector;
mod mover;
mod prepare;
mod summary;

pub use connector::{update_connector_page, would_update};
pub use mover::{ConflictPolicy, MoveOutcome, move_file};
pub use prepare::ensure_directories;
pub use summary::Summary;

use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ReorgConfig;
use crate::locale::Locale;
use crate::logger::banner;
use crate::mapping::{MappingEntry, MappingTable};
use crate::rewrite::LinkRewriter;
use crate::{debug, log};

#[derive(Debug, Error)]
pub enum ReorgError {
    #[error("this must be run from the website root: `{marker}` not found in `{}`", root.display())]
    NotSiteRoot { root: PathBuf, marker: String },
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The prompt was declined. Nothing was touched.
    Cancelled,
    /// Dry run: counts of what would have happened.
    Planned(Summary),
    Completed(Summary),
}

/// Run the reorganization described by `config`.
///
/// `confirm` is only called when the marker check passes, the run is not a
/// dry run, and `--yes` was not given.
pub fn run(
    config: &ReorgConfig,
    rewriter: &impl LinkRewriter,
    confirm: impl FnOnce() -> Result<bool>,
) -> Result<Outcome> {
    let root = &config.root;
    let marker = &config.site.marker;
    if !root.join(marker).exists() {
        return Err(ReorgError::NotSiteRoot {
            root: root.clone(),
            marker: marker.clone(),
        }
        .into());
    }

    let table = config.table();
    for dup in table.duplicates() {
        log!(
            "warn";
            "mapping for `{}` defined twice, using {} instead of {}",
            dup.old_name, dup.current.relative(), dup.previous.relative()
        );
    }

    if table.is_empty() {
        log!("warn"; "mapping table is empty, no files will be moved");
    }

    if config.dry_run {
        let summary = plan(config, &table, rewriter);
        summary.print_plan();
        return Ok(Outcome::Planned(summary));
    }

    if !config.assume_yes && !confirm()? {
        println!("Cancelled.");
        return Ok(Outcome::Cancelled);
    }

    let summary = execute(config, &table, rewriter)?;
    summary.print();
    Ok(Outcome::Completed(summary))
}

fn execute(
    config: &ReorgConfig,
    table: &MappingTable,
    rewriter: &impl LinkRewriter,
) -> Result<Summary> {
    let root = &config.root;
    let locales = config.locales();
    let mut summary = Summary::default();

    banner("WEBSITE REORGANIZATION");

    log!("step"; "1/3 creating directory structure");
    ensure_directories(root, &locales)?;

    log!("step"; "2/3 updating links in connector pages");
    for page in &config.site.connectors {
        for locale in &locales {
            let path = locale.root(root).join(page);
            if path.exists() && update_connector_page(&path, locale, table, rewriter) {
                log!("link"; "updated links in {}", locale.display_path(page));
                summary.pages_updated += 1;
            }
        }
    }

    log!("step"; "3/3 moving and renaming files");
    for entry in table.iter() {
        for locale in &locales {
            let (src, dst) = entry_paths(root, locale, entry);
            match move_file(&src, &dst, config.moves.on_conflict) {
                MoveOutcome::Moved => {
                    log!(
                        "move"; "({}) {} -> {}",
                        locale.tag(), entry.old_name, locale.display_path(&entry.target.relative())
                    );
                    summary.files_moved += 1;
                }
                MoveOutcome::Missing => {
                    debug!("move"; "({}) {} not present", locale.tag(), entry.old_name);
                }
                MoveOutcome::Skipped => summary.files_skipped += 1,
                MoveOutcome::Failed => summary.move_failures += 1,
            }
        }
    }

    Ok(summary)
}

/// Same walk as [`execute`] without touching the filesystem.
///
/// A destination claimed by an earlier planned move counts as existing, the
/// way it would on disk once that move has run.
fn plan(config: &ReorgConfig, table: &MappingTable, rewriter: &impl LinkRewriter) -> Summary {
    let root = &config.root;
    let locales = config.locales();
    let mut summary = Summary::default();

    for page in &config.site.connectors {
        for locale in &locales {
            let path = locale.root(root).join(page);
            if path.exists() && would_update(&path, locale, table, rewriter) {
                log!("plan"; "update links in {}", locale.display_path(page));
                summary.pages_updated += 1;
            }
        }
    }

    let mut claimed: HashSet<PathBuf> = HashSet::new();
    for entry in table.iter() {
        for locale in &locales {
            let (src, dst) = entry_paths(root, locale, entry);
            if !src.exists() {
                continue;
            }
            let source = locale.display_path(&entry.old_name);
            let target = locale.display_path(&entry.target.relative());
            let occupied = claimed.contains(&dst) || dst.exists();

            match config.moves.on_conflict {
                ConflictPolicy::Skip if occupied => {
                    log!("plan"; "skip {} ({} exists)", source, target);
                    summary.files_skipped += 1;
                }
                ConflictPolicy::Overwrite if occupied => {
                    log!("plan"; "move {} -> {} (overwrites)", source, target);
                    summary.files_moved += 1;
                }
                _ => {
                    log!("plan"; "move {} -> {}", source, target);
                    summary.files_moved += 1;
                }
            }
            claimed.insert(dst);
        }
    }

    summary
}

/// `<locale root>/<old>` and `<locale root>/<folder>/<new>`.
fn entry_paths(root: &Path, locale: &Locale, entry: &MappingEntry) -> (PathBuf, PathBuf) {
    let locale_root = locale.root(root);
    let src = locale_root.join(&entry.old_name);
    let dst = locale_root.join(entry.folder().as_str()).join(entry.new_name());
    (src, dst)
}

#[cfg(test)]
mod tests;

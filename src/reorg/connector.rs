//! Connector page link updates.
//!
//! Errors never escape this module: a page that cannot be read or written is
//! logged and reported as not updated, so the run moves on to the next page.

use std::fs;
use std::io;
use std::path::Path;

use crate::locale::Locale;
use crate::mapping::MappingTable;
use crate::rewrite::LinkRewriter;
use crate::{debug, log};

/// Rewrite the links of one connector page in place.
///
/// Returns `true` only when the content changed and was written back.
pub fn update_connector_page(
    path: &Path,
    locale: &Locale,
    table: &MappingTable,
    rewriter: &impl LinkRewriter,
) -> bool {
    let result = rewritten(path, locale, table, rewriter).and_then(|content| match content {
        Some(content) => fs::write(path, content).map(|()| true),
        None => Ok(false),
    });

    match result {
        Ok(changed) => {
            if !changed {
                debug!("link"; "no links to update in {} ({})", path.display(), locale);
            }
            changed
        }
        Err(e) => {
            log!("error"; "failed to update {}: {}", path.display(), e);
            false
        }
    }
}

/// Report whether [`update_connector_page`] would change the page, without writing.
pub fn would_update(
    path: &Path,
    locale: &Locale,
    table: &MappingTable,
    rewriter: &impl LinkRewriter,
) -> bool {
    match rewritten(path, locale, table, rewriter) {
        Ok(content) => content.is_some(),
        Err(e) => {
            log!("error"; "failed to read {}: {}", path.display(), e);
            false
        }
    }
}

/// New content of the page, or `None` when nothing would change.
fn rewritten(
    path: &Path,
    locale: &Locale,
    table: &MappingTable,
    rewriter: &impl LinkRewriter,
) -> io::Result<Option<String>> {
    let original = fs::read_to_string(path)?;
    let content = rewriter.rewrite(&original, locale, table);
    Ok((content != original).then_some(content))
}

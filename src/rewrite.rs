//! Link rewriting for connector pages.
//!
//! A [`LinkRewriter`] maps the text of a page to its rewritten text. The
//! shipped implementation, [`LiteralHrefRewriter`], does plain substring
//! replacement on `href="..."` / `href='...'` attributes, so links written
//! with other quoting or surrounding whitespace are left alone.
//!
//! | Old link                     | Default locale                    | `nl` locale                          |
//! |------------------------------|-----------------------------------|--------------------------------------|
//! | `href="Guide for SME.html"`  | `href="/blog/guide-for-sme.html"` | `href="/nl/blog/guide-for-sme.html"` |
//! | `href="Guide%20for%20SME.html"` | same                           | same                                 |
//! | `href='project1'`            | `href='/projects/project-1.html'` | `href='/nl/projects/project-1.html'` |

use crate::locale::Locale;
use crate::mapping::MappingTable;

/// Rewrites the links of one page.
pub trait LinkRewriter {
    fn rewrite(&self, content: &str, locale: &Locale, table: &MappingTable) -> String;
}

/// Literal `href` attribute substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralHrefRewriter;

impl LinkRewriter for LiteralHrefRewriter {
    fn rewrite(&self, content: &str, locale: &Locale, table: &MappingTable) -> String {
        let mut content = content.to_string();

        for entry in table.iter() {
            let new_path = locale.href(entry);

            for variant in name_variants(&entry.old_name) {
                for quote in ['"', '\''] {
                    let from = format!("href={quote}{variant}{quote}");
                    if content.contains(&from) {
                        let to = format!("href={quote}{new_path}{quote}");
                        content = content.replace(&from, &to);
                    }
                }
            }
        }

        content
    }
}

/// Spellings under which a file name can appear in a link.
///
/// The raw name and, when it differs, the name with spaces encoded as `%20`.
fn name_variants(name: &str) -> Vec<String> {
    let encoded = name.replace(' ', "%20");
    if encoded == name {
        vec![encoded]
    } else {
        vec![name.to_string(), encoded]
    }
}

//! The table of pages to relocate.
//!
//! Each [`MappingEntry`] names a flat file at a locale root, the folder it
//! belongs in, and its normalized file name. The table is key-unique on the
//! old name: inserting an existing key replaces its target but keeps the
//! key's original position ("last write wins"). Every such overwrite is kept
//! as a [`Duplicate`] so the caller can surface it as a data-entry defect.

use serde::Deserialize;
use std::fmt;

/// Target folder below a locale root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    Blog,
    Projects,
}

impl Folder {
    pub const ALL: [Folder; 2] = [Folder::Blog, Folder::Projects];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Projects => "projects",
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a page goes: `(folder, new file name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub folder: Folder,
    pub new_name: String,
}

impl Target {
    /// Path relative to a locale root, e.g. `blog/guide-for-sme.html`.
    pub fn relative(&self) -> String {
        format!("{}/{}", self.folder, self.new_name)
    }
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub old_name: String,
    pub target: Target,
}

impl MappingEntry {
    pub fn new(old_name: impl Into<String>, folder: Folder, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            target: Target {
                folder,
                new_name: new_name.into(),
            },
        }
    }

    pub fn folder(&self) -> Folder {
        self.target.folder
    }

    pub fn new_name(&self) -> &str {
        &self.target.new_name
    }
}

/// A key that was inserted twice. `previous` was discarded in favour of `current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub old_name: String,
    pub previous: Target,
    pub current: Target,
}

/// Ordered, key-unique mapping table.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
    duplicates: Vec<Duplicate>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing key keeps its slot and takes the new target.
    pub fn insert(&mut self, entry: MappingEntry) {
        match self.entries.iter_mut().find(|e| e.old_name == entry.old_name) {
            Some(existing) => {
                let previous = std::mem::replace(&mut existing.target, entry.target.clone());
                self.duplicates.push(Duplicate {
                    old_name: entry.old_name,
                    previous,
                    current: entry.target,
                });
            }
            None => self.entries.push(entry),
        }
    }

    /// Look up the target for an old file name.
    #[cfg(test)]
    pub fn get(&self, old_name: &str) -> Option<&Target> {
        self.entries
            .iter()
            .find(|e| e.old_name == old_name)
            .map(|e| &e.target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys that were overwritten while building the table, in insertion order.
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    /// The table shipped with the tool.
    pub fn builtin() -> Self {
        BUILTIN.iter().copied().collect()
    }
}

impl<'a> FromIterator<(&'a str, Folder, &'a str)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, Folder, &'a str)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (old, folder, new) in iter {
            table.insert(MappingEntry::new(old, folder, new));
        }
        table
    }
}

impl FromIterator<MappingEntry> for MappingTable {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

/// Check that a new file name is lowercase, hyphenated and URL-safe.
///
/// Accepts `[a-z0-9]` followed by `[a-z0-9.-]*`.
pub fn is_clean_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
}

use Folder::{Blog, Projects};

/// Built-in table, in processing order.
///
/// `project1` and `zapier vs custom` are extension-less aliases that only
/// ever appear as link targets in connector pages.
const BUILTIN: &[(&str, Folder, &str)] = &[
    // blog posts
    ("10 repetitive tasks.html", Blog, "10-repetitive-tasks.html"),
    ("5 Ways to Customer.html", Blog, "5-ways-to-customer.html"),
    ("5 signs.html", Blog, "5-signs.html"),
    ("Automation Intro.html", Blog, "automation-intro.html"),
    ("Automation intro.html", Blog, "automation-intro.html"),
    ("BPA Guide.html", Blog, "bpa-guide.html"),
    ("BPA vs Workflow.html", Blog, "bpa-vs-workflow.html"),
    ("E-commerce SMEs.html", Blog, "e-commerce-smes.html"),
    ("Guide for SME.html", Blog, "guide-for-sme.html"),
    ("Hidden cost.html", Blog, "hidden-cost.html"),
    ("Invoicing guide.html", Blog, "invoicing-guide.html"),
    ("Outgrown Zapier.html", Blog, "outgrown-zapier.html"),
    ("bottlenecks guide.html", Blog, "bottlenecks-guide.html"),
    ("documents drowning.html", Blog, "documents-drowning.html"),
    ("how to choose.html", Blog, "how-to-choose.html"),
    ("no-code outgrown.html", Blog, "no-code-outgrown.html"),
    ("working for you.html", Blog, "working-for-you.html"),
    ("zapier expert.html", Blog, "zapier-expert.html"),
    ("zapier vs custom.html", Blog, "zapier-vs-custom.html"),
    // projects
    ("project1.html", Projects, "project-1.html"),
    ("project1", Projects, "project-1.html"),
    ("project2.html", Projects, "project-2.html"),
    ("Project3.html", Projects, "project-3.html"),
    ("Project4.html", Projects, "project-4.html"),
    ("zapier vs custom", Blog, "zapier-vs-custom.html"),
];

//! Target directory creation.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::locale::Locale;
use crate::mapping::Folder;

/// Create `blog/` and `projects/` under every locale root.
///
/// Parents are created as needed and existing directories are left alone.
pub fn ensure_directories(root: &Path, locales: &[Locale]) -> Result<()> {
    for locale in locales {
        let locale_root = locale.root(root);
        for folder in Folder::ALL {
            let path = locale_root.join(folder.as_str());
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
        }
    }
    Ok(())
}

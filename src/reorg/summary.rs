//! Run counters and the closing report.

use owo_colors::OwoColorize;

use crate::logger::banner;

/// Manual follow-ups printed after a completed run. Advisory only.
const NEXT_STEPS: &[&str] = &[
    "Test blog.html and portfolio.html locally",
    "Verify all links work correctly",
    "Replace sitemap.xml and robots.txt:\n     mv sitemap_new.xml sitemap.xml\n     mv robots_new.txt robots.txt",
    "Update vercel.json with redirects",
    "Deploy to production",
];

/// Counts collected over one run (or one dry run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub pages_updated: usize,
    pub files_moved: usize,
    pub files_skipped: usize,
    pub move_failures: usize,
}

impl Summary {
    /// Print the closing report with the manual follow-ups.
    pub fn print(&self) {
        banner("REORGANIZATION COMPLETE!");
        self.print_counts();

        println!("\n{}", "Next steps:".green().bold());
        for (i, step) in NEXT_STEPS.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
        println!();
    }

    /// Print the counts of a dry run.
    pub fn print_plan(&self) {
        banner("DRY RUN (nothing was changed)");
        self.print_counts();
        println!();
    }

    fn print_counts(&self) {
        println!(
            "{} Updated {}",
            "✓".green(),
            plural_count(self.pages_updated, "connector page")
        );
        println!("{} Moved {}", "✓".green(), plural_count(self.files_moved, "file"));
        if self.files_skipped > 0 {
            println!(
                "{} {} skipped (destination exists)",
                "⚠".yellow(),
                plural_count(self.files_skipped, "file")
            );
        }
        if self.move_failures > 0 {
            println!(
                "{} {} failed to move, inspect the log above",
                "✗".red(),
                plural_count(self.move_failures, "file")
            );
        }
    }
}

/// `1 file`, `3 files`.
fn plural_count(count: usize, noun: &str) -> String {
    let s = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{s}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "file"), "0 files");
        assert_eq!(plural_count(1, "connector page"), "1 connector page");
        assert_eq!(plural_count(4, "connector page"), "4 connector pages");
    }
}

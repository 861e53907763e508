use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Question asked before any file is touched.
const CONFIRM_QUESTION: &str = "⚠️  This will reorganize your website. Continue? (yes/no): ";

/// Ask on stderr, read one line from stdin.
pub fn confirm_reorganize() -> Result<bool> {
    eprint!("{CONFIRM_QUESTION}");
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(is_affirmative(&input))
}

/// `yes` or `y`, ignoring case and surrounding whitespace.
pub fn is_affirmative(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

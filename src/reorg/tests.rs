use super::*;
use crate::rewrite::LiteralHrefRewriter;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BLOG_PAGE: &str = r#"<a href="Guide for SME.html">Guide</a>
<a href="Hidden%20cost.html">Hidden cost</a>
<a href="contact.html">Contact</a>
"#;

const PORTFOLIO_PAGE: &str = "<a href='project1'>One</a>\n<a href='Project3.html'>Three</a>\n";

/// Site with both locales; `nl/` lacks `Project3.html`.
fn site() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("nl")).unwrap();

    for dir in [root.to_path_buf(), root.join("nl")] {
        fs::write(dir.join("index.html"), "<h1>home</h1>").unwrap();
        fs::write(dir.join("blog.html"), BLOG_PAGE).unwrap();
        fs::write(dir.join("portfolio.html"), PORTFOLIO_PAGE).unwrap();
        fs::write(dir.join("Guide for SME.html"), "guide").unwrap();
        fs::write(dir.join("Hidden cost.html"), "cost").unwrap();
    }
    fs::write(root.join("Project3.html"), "three").unwrap();
    temp
}

fn config(root: &Path) -> ReorgConfig {
    ReorgConfig {
        root: root.to_path_buf(),
        ..ReorgConfig::default()
    }
}

/// Every file under `root` with its content.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    fn walk(dir: &Path, out: &mut BTreeMap<PathBuf, String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                out.insert(path.clone(), String::from("<dir>"));
                walk(&path, out);
            } else {
                out.insert(path.clone(), fs::read_to_string(&path).unwrap());
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, &mut out);
    out
}

fn run_yes(config: &ReorgConfig) -> Outcome {
    run(config, &LiteralHrefRewriter, || Ok(true)).unwrap()
}

#[test]
fn test_full_run_moves_and_rewrites() {
    let temp = site();
    let root = temp.path();

    let Outcome::Completed(summary) = run_yes(&config(root)) else {
        panic!("expected a completed run");
    };

    assert_eq!(summary.pages_updated, 4);
    assert_eq!(summary.files_moved, 5);
    assert_eq!(summary.move_failures, 0);

    for (old, new) in [
        ("Guide for SME.html", "blog/guide-for-sme.html"),
        ("Hidden cost.html", "blog/hidden-cost.html"),
        ("nl/Guide for SME.html", "nl/blog/guide-for-sme.html"),
        ("nl/Hidden cost.html", "nl/blog/hidden-cost.html"),
        ("Project3.html", "projects/project-3.html"),
    ] {
        assert!(!root.join(old).exists(), "{old} still present");
        assert!(root.join(new).is_file(), "{new} missing");
    }

    let blog = fs::read_to_string(root.join("blog.html")).unwrap();
    assert!(blog.contains(r#"href="/blog/guide-for-sme.html""#));
    assert!(blog.contains(r#"href="/blog/hidden-cost.html""#));
    assert!(blog.contains(r#"href="contact.html""#));

    let nl_portfolio = fs::read_to_string(root.join("nl/portfolio.html")).unwrap();
    assert!(nl_portfolio.contains("href='/nl/projects/project-1.html'"));
    assert!(nl_portfolio.contains("href='/nl/projects/project-3.html'"));
}

#[test]
fn test_absent_locale_file_creates_no_destination() {
    let temp = site();
    let root = temp.path();

    run_yes(&config(root));

    assert!(!root.join("nl/projects/project-3.html").exists());
    assert!(!root.join("projects/project-2.html").exists());
    assert!(!root.join("nl/projects/project-2.html").exists());
}

#[test]
fn test_second_run_changes_nothing() {
    let temp = site();
    let root = temp.path();

    run_yes(&config(root));
    let before = snapshot(root);

    let Outcome::Completed(summary) = run_yes(&config(root)) else {
        panic!("expected a completed run");
    };
    assert_eq!(summary, Summary::default());
    assert_eq!(snapshot(root), before);
}

#[test]
fn test_missing_marker_is_fatal_and_touches_nothing() {
    let temp = site();
    let root = temp.path();
    fs::remove_file(root.join("index.html")).unwrap();
    let before = snapshot(root);

    let err = run(&config(root), &LiteralHrefRewriter, || {
        panic!("must not prompt without a marker")
    })
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReorgError>(),
        Some(ReorgError::NotSiteRoot { .. })
    ));
    assert_eq!(snapshot(root), before);
}

#[test]
fn test_declined_prompt_touches_nothing() {
    let temp = site();
    let root = temp.path();
    let before = snapshot(root);

    let outcome = run(&config(root), &LiteralHrefRewriter, || Ok(false)).unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(snapshot(root), before);
}

#[test]
fn test_assume_yes_skips_prompt() {
    let temp = site();
    let mut config = config(temp.path());
    config.assume_yes = true;

    let outcome = run(&config, &LiteralHrefRewriter, || panic!("prompted")).unwrap();
    assert!(matches!(outcome, Outcome::Completed(_)));
}

#[test]
fn test_dry_run_plans_without_changes() {
    let temp = site();
    let root = temp.path();
    let before = snapshot(root);
    let mut config = config(root);
    config.dry_run = true;

    let outcome = run(&config, &LiteralHrefRewriter, || panic!("prompted")).unwrap();

    let Outcome::Planned(summary) = outcome else {
        panic!("expected a plan");
    };
    assert_eq!(summary.pages_updated, 4);
    assert_eq!(summary.files_moved, 5);
    assert_eq!(snapshot(root), before);
}

#[test]
fn test_skip_policy_keeps_existing_destination() {
    let temp = site();
    let root = temp.path();
    fs::create_dir_all(root.join("blog")).unwrap();
    fs::write(root.join("blog/guide-for-sme.html"), "already here").unwrap();

    let mut config = config(root);
    config.moves.on_conflict = ConflictPolicy::Skip;

    let Outcome::Completed(summary) = run_yes(&config) else {
        panic!("expected a completed run");
    };
    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.files_moved, 4);
    assert!(root.join("Guide for SME.html").exists());
    assert_eq!(
        fs::read_to_string(root.join("blog/guide-for-sme.html")).unwrap(),
        "already here"
    );
}

#[test]
fn test_custom_rewriter_is_used() {
    struct Upper;
    impl LinkRewriter for Upper {
        fn rewrite(&self, content: &str, _: &Locale, _: &MappingTable) -> String {
            content.to_uppercase()
        }
    }

    let temp = site();
    let root = temp.path();
    let mut config = config(root);
    config.assume_yes = true;

    run(&config, &Upper, || Ok(true)).unwrap();
    let blog = fs::read_to_string(root.join("blog.html")).unwrap();
    assert!(blog.contains("HREF=\"GUIDE FOR SME.HTML\""));
}

#[test]
fn test_dry_run_matches_run_when_two_names_share_a_destination() {
    let temp = site();
    let root = temp.path();
    fs::write(root.join("project1.html"), "one").unwrap();
    fs::write(root.join("project1"), "one, no extension").unwrap();

    let mut config = config(root);
    config.moves.on_conflict = ConflictPolicy::Skip;
    config.assume_yes = true;
    config.dry_run = true;

    let Outcome::Planned(planned) = run_yes(&config) else {
        panic!("expected a plan");
    };

    config.dry_run = false;
    let Outcome::Completed(done) = run_yes(&config) else {
        panic!("expected a completed run");
    };

    assert_eq!(planned, done);
    assert_eq!(done.files_skipped, 1);
    assert_eq!(done.files_moved, 6);
    assert_eq!(
        fs::read_to_string(root.join("projects/project-1.html")).unwrap(),
        "one"
    );
    assert!(root.join("project1").exists());
}

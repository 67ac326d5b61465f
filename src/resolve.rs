//! The scan/blame/tag pipeline.
//!
//! Occurrences are processed strictly one at a time, in git grep's output
//! order: blame finds the commit that introduced the marked line, the tag
//! lookup finds the earliest release containing that commit, and the file is
//! rewritten on the spot when a release exists. A commit with no containing
//! release tag is normal (the change simply has not shipped yet); that
//! occurrence is logged and left alone.
//!
//! Any git failure aborts the whole run. Edits already applied stay applied;
//! rerunning after the problem is fixed picks up the remaining markers.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use indexmap::IndexMap;

use crate::cli::UpdateArgs;
use crate::config::{Config, load_config};
use crate::editor::replace_in_line;
use crate::git::GitClient;

/// Commit id → earliest release tag containing it, in first-seen order.
///
/// A commit that introduced several marked lines is recorded once.
#[derive(Debug, Default)]
pub struct ResolutionMap {
    entries: IndexMap<String, String>,
}

impl ResolutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, commit: String, tag: String) {
        self.entries.entry(commit).or_insert(tag);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `(commit, tag)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), t.as_str()))
    }

    /// Distinct tags, lexicographically ascending.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.entries.values().map(String::as_str).collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }
}

/// What one `update` run did.
pub struct UpdateOutcome {
    pub config: Config,
    pub resolutions: ResolutionMap,
    /// Marker occurrences found by the scan.
    pub scanned: usize,
    /// Occurrences rewritten in place (always 0 in dry-run mode).
    pub edited: usize,
    /// Occurrences whose commit has no containing release tag yet.
    pub unreleased: usize,
}

/// Run the full pipeline: scan for markers, resolve each one against git
/// history, and rewrite the resolved ones in place (unless `dry_run`).
pub fn update(args: UpdateArgs) -> Result<UpdateOutcome> {
    let repo_root = match args.common.repo_root {
        Some(root) => root,
        None => env::current_dir().context("Failed to determine current directory")?,
    };

    let loaded = load_config(&repo_root)?;
    if args.common.verbose {
        if loaded.from_file {
            eprintln!("Using configuration from {}", crate::config::CONFIG_FILE_NAME);
        } else {
            eprintln!("No configuration file found, using defaults");
        }
    }
    let config = loaded.config;

    let git = GitClient::new(&repo_root, args.common.verbose);
    let occurrences = git.grep_markers(&config.marker, &config.pathspecs)?;

    let mut outcome = UpdateOutcome {
        config,
        resolutions: ResolutionMap::new(),
        scanned: occurrences.len(),
        edited: 0,
        unreleased: 0,
    };

    for occurrence in occurrences {
        println!(
            "Analyzing {}",
            format!("{}:{}", occurrence.file, occurrence.line).bold()
        );

        let commit = git.introducing_commit(&occurrence.file, occurrence.line)?;
        println!("  introduced by {}", commit.as_str().dimmed());

        let Some(tag) = git.first_containing_tag(&commit, &outcome.config.tag_pattern)? else {
            println!(
                "  {} no release tag contains this commit; leaving the marker in place.\n  \
                 Normal if the associated PR/commit is not merged and released yet; \
                 otherwise make sure release tags are fetched.",
                "note:".bold().cyan()
            );
            outcome.unreleased += 1;
            continue;
        };
        println!("  first released in {}", tag.as_str().green());

        outcome.resolutions.record(commit, tag.clone());

        if !args.dry_run {
            println!("  updating file in place");
            let target = PathBuf::from(&occurrence.file);
            let target = if target.is_absolute() {
                target
            } else {
                git.repo_root().join(target)
            };
            replace_in_line(
                &target,
                occurrence.line,
                &outcome.config.marker,
                &outcome.config.replacement_for(&tag),
            )
            .with_context(|| format!("Failed to update {}", occurrence.file))?;
            outcome.edited += 1;
        }
    }

    Ok(outcome)
}

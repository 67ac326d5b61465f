//! Wrappers around the git queries sincefix depends on.
//!
//! Every external query is an explicit method on [`GitClient`] that spawns
//! `git`, captures stdout/stderr and checks the exit status. The tool never
//! touches git internals directly; the working tree and the tag history are
//! consumed purely through this textual interface:
//!
//! - `git grep --fixed-strings --line-number <marker> -- <pathspecs>` yields
//!   `path:line:content` lines (content may itself contain colons).
//! - `git blame --porcelain -L n,n -- <path>` yields the introducing commit
//!   id as the first token of the first output line.
//! - `git tag --sort=creatordate --contains <commit> <pattern>` yields one
//!   tag per line, ascending by creation date.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use thiserror::Error;

/// Errors from a git invocation or from parsing its output.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("`git {command}` failed with {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: String,
        stderr: String,
    },

    #[error("unexpected output from `git {command}`: {detail}")]
    MalformedOutput { command: String, detail: String },

    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),

    #[error("git produced non-UTF-8 output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A single `@since TODO` hit in the tracked tree.
///
/// Line numbers are 1-based, exactly as git grep and git blame count them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerOccurrence {
    pub file: String,
    pub line: usize,
}

/// Executes git subcommands against one repository working tree.
pub struct GitClient {
    repo_root: PathBuf,
    verbose: bool,
}

impl GitClient {
    pub fn new(repo_root: &Path, verbose: bool) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            verbose,
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Find every occurrence of the literal string `marker` in tracked files
    /// matching `pathspecs`, in git grep's natural ordering (path-sorted,
    /// then line-ascending within a file).
    ///
    /// git grep exits with status 1 when nothing matches; that is an empty
    /// result here, not an error.
    pub fn grep_markers(
        &self,
        marker: &str,
        pathspecs: &[String],
    ) -> Result<Vec<MarkerOccurrence>, GitError> {
        // --fixed-strings: the marker is a literal substring everywhere else
        // in the pipeline, so it must not act as a regex here.
        let mut args: Vec<&str> = vec!["grep", "--fixed-strings", "--line-number", marker, "--"];
        args.extend(pathspecs.iter().map(String::as_str));

        let output = self.invoke(&args)?;
        if !output.status.success() {
            // Exit status 1 is git grep's "no matches found".
            if output.status.code() == Some(1) && output.stdout.is_empty() {
                return Ok(Vec::new());
            }
            return Err(self.command_failed(&args, &output));
        }

        let stdout = String::from_utf8(output.stdout)?;
        stdout
            .lines()
            .map(|line| parse_grep_line(line, marker))
            .collect()
    }

    /// The commit that introduced the given line, per `git blame --porcelain`.
    pub fn introducing_commit(&self, file: &str, line: usize) -> Result<String, GitError> {
        let range = format!("{},{}", line, line);
        let args = ["blame", "--porcelain", "-L", &range, "--", file];

        let output = self.invoke(&args)?;
        if !output.status.success() {
            return Err(self.command_failed(&args, &output));
        }

        let stdout = String::from_utf8(output.stdout)?;
        let first_line = stdout.lines().next().unwrap_or_default();
        let commit = first_line.split(' ').next().unwrap_or_default();
        if commit.is_empty() {
            return Err(GitError::MalformedOutput {
                command: "blame".to_string(),
                detail: format!("no commit id for {}:{}", file, line),
            });
        }

        Ok(commit.to_string())
    }

    /// The earliest tag matching `pattern` whose history contains `commit`,
    /// or `None` if the commit has not shipped in any matching tag.
    ///
    /// "Earliest" is creation-date order as reported by git; tags created at
    /// the same instant are returned in whatever order git's sort leaves them.
    pub fn first_containing_tag(
        &self,
        commit: &str,
        pattern: &str,
    ) -> Result<Option<String>, GitError> {
        let args = ["tag", "--sort=creatordate", "--contains", commit, pattern];

        let output = self.invoke(&args)?;
        if !output.status.success() {
            return Err(self.command_failed(&args, &output));
        }

        let stdout = String::from_utf8(output.stdout)?;
        let first_tag = stdout.lines().next().unwrap_or_default();
        if first_tag.is_empty() {
            Ok(None)
        } else {
            Ok(Some(first_tag.to_string()))
        }
    }

    fn invoke(&self, args: &[&str]) -> Result<Output, GitError> {
        if self.verbose {
            eprintln!("Running: git {}", args.join(" "));
        }
        Ok(Command::new("git")
            .current_dir(&self.repo_root)
            .args(args)
            .output()?)
    }

    fn command_failed(&self, args: &[&str], output: &Output) -> GitError {
        let code = match output.status.code() {
            Some(code) => format!("exit code {}", code),
            None => "no exit code (killed by signal)".to_string(),
        };
        GitError::CommandFailed {
            command: args.join(" "),
            code,
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        }
    }
}

/// Parse one `path:line_number:content` line of git grep output.
///
/// The content may contain colons, so the line is split at most twice.
fn parse_grep_line(line: &str, marker: &str) -> Result<MarkerOccurrence, GitError> {
    let malformed = |detail: String| GitError::MalformedOutput {
        command: format!("grep --line-number {}", marker),
        detail,
    };

    let mut parts = line.splitn(3, ':');
    let file = parts
        .next()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| malformed(format!("missing path in {:?}", line)))?;
    let lineno = parts
        .next()
        .and_then(|p| p.parse::<usize>().ok())
        .ok_or_else(|| malformed(format!("missing line number in {:?}", line)))?;

    Ok(MarkerOccurrence {
        file: file.to_string(),
        line: lineno,
    })
}

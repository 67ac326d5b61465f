//! Sincefix - resolve `@since TODO` markers against git release history
//!
//! Sincefix is a maintainer tool. Contributors who add new API document it
//! with a `@since TODO` placeholder because they cannot know which release
//! will ship it. After a release, sincefix walks the tracked tree, finds every
//! remaining placeholder, asks git which commit introduced the line and which
//! release tag first contained that commit, and rewrites the placeholder with
//! the resolved version.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing and dispatch)
//! - `config`: Configuration file loading and parsing
//! - `git`: Wrappers around the git queries (grep, blame, tag listing)
//! - `editor`: Single-line in-place file rewriting
//! - `resolve`: The scan/blame/tag pipeline and its accumulated results
//! - `report`: Final grouped summary of resolved commits

pub mod cli;
pub mod config;
pub mod editor;
pub mod git;
pub mod report;
pub mod resolve;

#[cfg(test)]
mod testutil;

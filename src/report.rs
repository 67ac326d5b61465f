//! Final grouped summary of resolved commits.
//!
//! Rendering is separate from printing so the exact output can be asserted
//! in tests without capturing stdout.

use colored::Colorize;

use crate::resolve::{ResolutionMap, UpdateOutcome};

const HEADER: &str = "List of commits introducing new API and the first release they went in:";

/// Print the grouped report. Prints nothing when no occurrence resolved.
pub fn print(outcome: &UpdateOutcome) {
    if outcome.resolutions.is_empty() {
        return;
    }

    println!();
    println!("{}", HEADER.bold());
    print!("{}", render(&outcome.resolutions, &outcome.config.repo_url));
}

/// Render one `* release` line per distinct tag (lexicographically
/// ascending), with each resolved commit linked beneath the tag that first
/// shipped it.
pub fn render(resolutions: &ResolutionMap, repo_url: &str) -> String {
    let mut out = String::new();
    for tag in resolutions.tags() {
        out.push_str(&format!("* {}/releases/tag/{}\n", repo_url, tag));
        for (commit, first_release) in resolutions.iter() {
            if first_release == tag {
                out.push_str(&format!("  - {}/commit/{}\n", repo_url, commit));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn map(pairs: &[(&str, &str)]) -> ResolutionMap {
        let mut map = ResolutionMap::new();
        for (commit, tag) in pairs {
            map.record(commit.to_string(), tag.to_string());
        }
        map
    }

    #[test]
    fn test_render_groups_commits_by_tag() {
        let resolutions = map(&[
            ("abcd123", "jenkins-2.401"),
            ("beef456", "jenkins-2.400"),
            ("cafe789", "jenkins-2.401"),
        ]);

        let rendered = render(&resolutions, "https://github.com/jenkinsci/jenkins");

        assert_eq!(
            rendered,
            "\
* https://github.com/jenkinsci/jenkins/releases/tag/jenkins-2.400
  - https://github.com/jenkinsci/jenkins/commit/beef456
* https://github.com/jenkinsci/jenkins/releases/tag/jenkins-2.401
  - https://github.com/jenkinsci/jenkins/commit/abcd123
  - https://github.com/jenkinsci/jenkins/commit/cafe789
"
        );
    }

    #[test]
    fn test_render_empty_map_is_empty() {
        let resolutions = ResolutionMap::new();
        assert_eq!(render(&resolutions, "https://example.com"), "");
    }

    #[test]
    fn test_every_commit_appears_in_exactly_one_group() {
        let resolutions = map(&[
            ("a1", "jenkins-2.400"),
            ("b2", "jenkins-2.401"),
            ("c3", "jenkins-2.400"),
        ]);

        let rendered = render(&resolutions, "https://example.com");

        for commit in ["a1", "b2", "c3"] {
            let needle = format!("/commit/{}", commit);
            assert_eq!(rendered.matches(&needle).count(), 1);
        }
    }
}

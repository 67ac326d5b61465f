//! Test fixtures: throwaway git repositories driven through the real git
//! binary, mirroring exactly the commands sincefix itself shells out to.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// A scratch git repository living in a temp directory.
///
/// Commit dates are forced to distinct, increasing timestamps so that
/// `--sort=creatordate` tag ordering is deterministic in tests.
pub struct TestRepo {
    dir: TempDir,
    ticks: std::cell::Cell<u32>,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Self {
            dir,
            ticks: std::cell::Cell::new(0),
        };
        repo.git(&["init", "--quiet"]);
        repo.git(&["config", "user.name", "Test"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name`, stage and commit it. Returns the full
    /// commit id.
    pub fn commit_file(&self, name: &str, content: &str) -> String {
        self.write_file(name, content);
        self.git(&["add", name]);
        let date = self.next_date();
        let output = Command::new("git")
            .current_dir(self.path())
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .args(["commit", "--quiet", "--no-verify", "-m", "change"])
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        self.head()
    }

    /// Write `content` to `name` without committing.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).unwrap()
    }

    /// Create a lightweight tag pointing at HEAD.
    pub fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }

    pub fn head(&self) -> String {
        let output = Command::new("git")
            .current_dir(self.path())
            .args(["rev-parse", "HEAD"])
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .current_dir(self.path())
            .args(args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn next_date(&self) -> String {
        let tick = self.ticks.get();
        self.ticks.set(tick + 1);
        // One minute apart keeps creatordate ordering unambiguous.
        format!("2024-01-01T00:{:02}:00 +0000", tick)
    }
}

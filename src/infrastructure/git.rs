use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

use crate::domain::ports::RemoteSource;

/// Lists the remotes configured in a working directory with `git remote -v`.
pub struct GitRemoteSource {
    dir: PathBuf,
}

impl GitRemoteSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl RemoteSource for GitRemoteSource {
    async fn remotes(&self) -> Result<Option<Vec<String>>> {
        let output = match Command::new("git")
            .arg("-C")
            .arg(&self.dir)
            .args(["remote", "-v"])
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("git executable not found, skipping remote discovery");
                return Ok(None);
            }
            Err(e) => return Err(e).context("Failed to run git remote -v"),
        };

        if !output.status.success() {
            debug!(
                "No git repository in {} ({})",
                self.dir.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(None);
        }

        let remotes = parse_remote_listing(&String::from_utf8_lossy(&output.stdout));
        debug!("Found {} git remote(s) in {}", remotes.len(), self.dir.display());
        Ok(Some(remotes))
    }
}

/// Extract the distinct URLs from `git remote -v` output, first seen first.
///
/// Lines look like `origin\tgit@host:org/repo.git (fetch)`.
pub fn parse_remote_listing(listing: &str) -> Vec<String> {
    let mut remotes: Vec<String> = Vec::new();
    for url in listing
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
    {
        if !remotes.iter().any(|r| r == url) {
            remotes.push(url.to_string());
        }
    }
    remotes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_and_push_lines_collapse() {
        let listing = "origin\tgit@github.com:acme/blog.git (fetch)\n\
                       origin\tgit@github.com:acme/blog.git (push)\n\
                       mirror\thttps://git.acme.test/blog.git (fetch)\n\
                       mirror\thttps://git.acme.test/blog.git (push)\n";
        assert_eq!(
            parse_remote_listing(listing),
            vec![
                "git@github.com:acme/blog.git".to_string(),
                "https://git.acme.test/blog.git".to_string(),
            ]
        );
    }

    #[test]
    fn empty_listing_has_no_remotes() {
        assert!(parse_remote_listing("").is_empty());
        assert!(parse_remote_listing("\n").is_empty());
    }

    #[tokio::test]
    async fn directory_outside_a_repository_has_no_remotes() {
        let dir = tempfile::tempdir().unwrap();
        let source = GitRemoteSource::new(dir.path());
        assert_eq!(source.remotes().await.unwrap(), None);
    }
}

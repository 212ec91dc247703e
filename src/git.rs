use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::debug;

const UNCOMMITTED: &str = "uncommitted changes";
const UNPUSHED: &str = "unpushed commits";

/// Upper bound on a single git query; a repository that takes longer reads
/// as clean for that signal rather than hanging the whole scan.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// One classified working copy. An empty reason means clean.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoRecord {
    pub path: PathBuf,
    pub reason: String,
}

impl RepoRecord {
    pub fn is_clean(&self) -> bool {
        self.reason.is_empty()
    }
}

/// Classify one working copy with exactly two read-only git queries.
///
/// A query that fails for any reason (git missing, repository corrupt,
/// permission denied, timeout) makes that signal false; it never aborts the
/// classification. The two signals are evaluated independently.
pub fn classify<P: AsRef<Path>>(repo_path: P) -> RepoRecord {
    let repo_path = repo_path.as_ref();

    let uncommitted = query_signal(repo_path, &["status", "--porcelain"]);
    let unpushed = query_signal(
        repo_path,
        &["log", "--oneline", "--branches", "--not", "--remotes"],
    );

    RepoRecord {
        path: repo_path.to_path_buf(),
        reason: combine_reasons(uncommitted, unpushed),
    }
}

/// Classify every repository, in parallel, preserving discovery order.
pub fn classify_all(repo_paths: &[PathBuf]) -> Vec<RepoRecord> {
    repo_paths.par_iter().map(classify).collect()
}

/// Stable join order: uncommitted before unpushed.
fn combine_reasons(uncommitted: bool, unpushed: bool) -> String {
    let mut reasons = Vec::new();
    if uncommitted {
        reasons.push(UNCOMMITTED);
    }
    if unpushed {
        reasons.push(UNPUSHED);
    }
    reasons.join(" and ")
}

/// A signal is true iff its query succeeds and prints anything.
fn query_signal(repo_path: &Path, args: &[&str]) -> bool {
    match run_git(repo_path, args, QUERY_TIMEOUT) {
        Ok(payload) => !payload.is_empty(),
        Err(err) => {
            debug!("git {} failed in {}: {err}", args[0], repo_path.display());
            false
        }
    }
}

/// Run a git query in `repo_path` and return its stdout, erroring on spawn
/// failure, non-zero exit, or timeout. Stdout is drained by a helper thread
/// so the timeout covers a child that produces output forever as well as one
/// that never exits.
fn run_git(repo_path: &Path, args: &[&str], timeout: Duration) -> Result<Vec<u8>> {
    let mut child = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .context("failed to spawn git")?;

    let mut stdout = child.stdout.take().context("child stdout missing")?;

    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let mut payload = Vec::new();
        let result = stdout.read_to_end(&mut payload).map(|_| payload);
        let _ = tx.send(result);
    });

    let payload = match rx.recv_timeout(timeout) {
        Ok(Ok(payload)) => payload,
        Ok(Err(err)) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(err).context("failed to read git output");
        }
        Err(_) => {
            let _ = child.kill();
            let _ = child.wait();
            bail!("git {} timed out after {timeout:?}", args[0]);
        }
    };

    let status = child.wait().context("failed to wait for git")?;
    if !status.success() {
        bail!("git {} exited with {status}", args[0]);
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_combine_reasons_truth_table() {
        assert_eq!(combine_reasons(true, false), "uncommitted changes");
        assert_eq!(combine_reasons(false, true), "unpushed commits");
        assert_eq!(
            combine_reasons(true, true),
            "uncommitted changes and unpushed commits"
        );
        assert_eq!(combine_reasons(false, false), "");
    }

    #[test]
    fn test_repo_record_is_clean() {
        let clean = RepoRecord {
            path: PathBuf::from("/r"),
            reason: String::new(),
        };
        assert!(clean.is_clean());

        let dirty = RepoRecord {
            path: PathBuf::from("/r"),
            reason: "uncommitted changes".to_string(),
        };
        assert!(!dirty.is_clean());
    }

    /// Failing queries read as "signal absent", not "repository skipped":
    /// classifying a plain directory still yields a record, a clean one.
    #[test]
    fn test_classify_non_repo_is_clean() {
        let temp_dir = TempDir::new().unwrap();
        let record = classify(temp_dir.path());

        assert_eq!(record.path, temp_dir.path());
        assert!(record.is_clean());
    }

    #[test]
    fn test_classify_all_preserves_input_order() {
        let temp_a = TempDir::new().unwrap();
        let temp_b = TempDir::new().unwrap();
        let paths = vec![temp_a.path().to_path_buf(), temp_b.path().to_path_buf()];

        let records = classify_all(&paths);
        let record_paths: Vec<_> = records.iter().map(|r| r.path.clone()).collect();
        assert_eq!(record_paths, paths);
    }
}

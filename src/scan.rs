use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A directory is a working copy iff it has a `.git` subdirectory.
pub fn is_git_repo(path: &Path) -> bool {
    path.join(".git").is_dir()
}

/// Walk `target` and return every git working copy at most `max_depth`
/// levels below it, in discovery order.
///
/// Depth 0 checks the target alone. A discovered working copy is emitted and
/// never descended into, so nested checkouts and submodules stay invisible.
/// Unreadable directories and non-directory entries are skipped; a missing
/// target simply yields nothing. Each visited directory is listed exactly
/// once, in file-name order, and only when the walk will actually descend
/// into it — nothing below the depth bound is ever read.
pub fn find_repos<P: AsRef<Path>>(target: P, max_depth: u32) -> Vec<PathBuf> {
    walk(target.as_ref(), max_depth)
}

fn walk(dir: &Path, remaining_depth: u32) -> Vec<PathBuf> {
    if is_git_repo(dir) {
        // Do not look inside a working copy.
        return vec![dir.to_path_buf()];
    }
    if remaining_depth == 0 {
        return Vec::new();
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("skipping unreadable directory {}: {err}", dir.display());
            return Vec::new();
        }
    };

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping unreadable entry in {}: {err}", dir.display());
                continue;
            }
        };
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => subdirs.push(entry.path()),
            Ok(_) => {}
            Err(err) => {
                debug!("skipping entry {}: {err}", entry.path().display());
            }
        }
    }
    subdirs.sort();

    subdirs
        .iter()
        .flat_map(|subdir| walk(subdir, remaining_depth - 1))
        .collect()
}

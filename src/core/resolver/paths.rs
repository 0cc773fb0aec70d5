use super::ResolveError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const GLOB_META: [char; 3] = ['*', '?', '['];

/// Expand `pattern` and require at least one readable match.
///
/// The literal parent directory of the pattern must be listable as well; every
/// unreadable path is reported together so the user can fix them in one pass.
pub fn check_paths(param: &str, pattern: &str) -> Result<Vec<PathBuf>, ResolveError> {
    if pattern.is_empty() {
        return Err(ResolveError::NotFound {
            param: param.to_string(),
            pattern: pattern.to_string(),
        });
    }
    let entries = glob::glob(pattern).map_err(|err| ResolveError::InvalidPattern {
        param: param.to_string(),
        pattern: pattern.to_string(),
        message: err.msg.to_string(),
    })?;

    let mut matches = Vec::new();
    let mut unreadable = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => matches.push(path),
            Err(err) => push_unique(&mut unreadable, err.path().to_path_buf()),
        }
    }

    if matches.is_empty() && unreadable.is_empty() {
        return Err(ResolveError::NotFound {
            param: param.to_string(),
            pattern: pattern.to_string(),
        });
    }

    if let Some(parent) = literal_parent(pattern) {
        if fs::read_dir(&parent).is_err() {
            push_unique(&mut unreadable, parent);
        }
    }
    for path in &matches {
        if !is_readable(path) {
            push_unique(&mut unreadable, path.clone());
        }
    }

    if !unreadable.is_empty() {
        return Err(ResolveError::Permission {
            param: param.to_string(),
            paths: unreadable,
        });
    }

    debug!(param, pattern, matched = matches.len(), "path pattern resolved");
    Ok(matches)
}

/// Parent directory of the pattern, when it contains no wildcard itself.
fn literal_parent(pattern: &str) -> Option<PathBuf> {
    let parent = Path::new(pattern).parent()?;
    let text = parent.to_string_lossy();
    if text.contains(GLOB_META) {
        return None;
    }
    if text.is_empty() {
        return Some(PathBuf::from("."));
    }
    Some(parent.to_path_buf())
}

fn is_readable(path: &Path) -> bool {
    if path.is_dir() {
        fs::read_dir(path).is_ok()
    } else {
        fs::File::open(path).is_ok()
    }
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

//! Path sanitization for files served from the public and snapshot directories.
//!
//! Request paths are untrusted. Before touching the filesystem they are
//! normalized ([`sanitize_file_path`]) and, once joined to a base directory,
//! re-checked after symlink resolution ([`validate_path_within_base`]).

use std::path::{Component, Path, PathBuf};

/// Error type for path traversal attempts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathTraversalError {
    /// Path contains null bytes.
    #[error("Path contains null bytes")]
    NullByte,
    /// Path is empty.
    #[error("Path is empty")]
    EmptyPath,
    /// Path is absolute (starts with `/` or drive letter).
    #[error("Absolute paths are not allowed")]
    AbsolutePath,
    /// Path tries to leave the base directory, with `..` or through a symlink.
    #[error("Path attempts to escape base directory")]
    EscapesBaseDirectory,
}

/// Normalizes a relative request path.
///
/// `.` components are dropped. Paths that are empty, absolute, contain `..`
/// or contain null bytes are rejected.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use arsnap::security::sanitize_file_path;
///
/// assert_eq!(sanitize_file_path("models/chair.glb").unwrap(), PathBuf::from("models/chair.glb"));
/// assert_eq!(sanitize_file_path("./index.html").unwrap(), PathBuf::from("index.html"));
/// assert!(sanitize_file_path("../etc/passwd").is_err());
/// ```
pub fn sanitize_file_path(path: &str) -> Result<PathBuf, PathTraversalError> {
    if path.contains('\0') {
        return Err(PathTraversalError::NullByte);
    }
    if path.is_empty() {
        return Err(PathTraversalError::EmptyPath);
    }

    let path = Path::new(path);
    if path.is_absolute() {
        return Err(PathTraversalError::AbsolutePath);
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => normalized.push(name),
            Component::CurDir => {},
            Component::ParentDir => return Err(PathTraversalError::EscapesBaseDirectory),
            Component::RootDir | Component::Prefix(_) => {
                return Err(PathTraversalError::AbsolutePath);
            },
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(PathTraversalError::EmptyPath);
    }

    Ok(normalized)
}

/// Validate that a path stays within a base directory after canonicalization.
///
/// For non-existent files the parent directory is canonicalized instead, so a
/// missing file still yields `Ok` and the caller reports 404 on read.
pub fn validate_path_within_base(
    base_dir: &Path,
    file_path: &Path,
) -> Result<PathBuf, PathTraversalError> {
    let full_path = base_dir.join(file_path);

    let canonical = if full_path.exists() {
        full_path
            .canonicalize()
            .map_err(|_| PathTraversalError::EscapesBaseDirectory)?
    } else {
        let parent = full_path.parent().ok_or(PathTraversalError::EmptyPath)?;
        let filename = full_path.file_name().ok_or(PathTraversalError::EmptyPath)?;

        if parent.exists() {
            let canonical_parent = parent
                .canonicalize()
                .map_err(|_| PathTraversalError::EscapesBaseDirectory)?;
            canonical_parent.join(filename)
        } else {
            // The read fails anyway
            full_path
        }
    };

    let canonical_base = base_dir
        .canonicalize()
        .map_err(|_| PathTraversalError::EscapesBaseDirectory)?;

    if !canonical.starts_with(&canonical_base) {
        return Err(PathTraversalError::EscapesBaseDirectory);
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_rejects_traversal() {
        let attack_paths = [
            "../etc/passwd",
            "../../etc/passwd",
            "models/../../etc/passwd",
            "/etc/passwd",
        ];

        for path in &attack_paths {
            assert!(
                sanitize_file_path(path).is_err(),
                "Path traversal not prevented for: {path}"
            );
        }
    }

    #[test]
    fn test_sanitize_rejects_empty_and_null() {
        assert_eq!(sanitize_file_path(""), Err(PathTraversalError::EmptyPath));
        assert_eq!(sanitize_file_path("."), Err(PathTraversalError::EmptyPath));
        assert_eq!(
            sanitize_file_path("index\0.html"),
            Err(PathTraversalError::NullByte)
        );
    }

    #[test]
    fn test_sanitize_nested_path() {
        assert_eq!(
            sanitize_file_path("models/sofa/v2.glb").unwrap(),
            PathBuf::from("models/sofa/v2.glb")
        );
    }

    #[test]
    fn test_validate_path_within_base_valid() {
        let base = tempdir().unwrap();
        fs::write(base.path().join("index.html"), "<html>").unwrap();

        let result = validate_path_within_base(base.path(), Path::new("index.html"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_path_within_base_nonexistent() {
        let base = tempdir().unwrap();

        let result = validate_path_within_base(base.path(), Path::new("missing.png"));
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_path_within_base_symlink_escape() {
        use std::os::unix::fs::symlink;

        let base = tempdir().unwrap();
        let outside = tempdir().unwrap();

        let secret = outside.path().join("secret.txt");
        fs::write(&secret, "secret data").unwrap();
        symlink(&secret, base.path().join("evil_link")).unwrap();

        let result = validate_path_within_base(base.path(), Path::new("evil_link"));
        assert_eq!(result, Err(PathTraversalError::EscapesBaseDirectory));
    }
}

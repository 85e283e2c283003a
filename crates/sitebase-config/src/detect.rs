//! Detection of directories, host name and URL local part.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use crate::{ConfigError, Origin};

/// Host name substituted for `localhost`.
const LOOPBACK: &str = "127.0.0.1";

/// Canonicalize a directory path.
///
/// If the path cannot be canonicalized (usually because it does not exist),
/// the lexically normalized path is returned with [`Origin::Fallback`].
pub(crate) fn resolve_dir(path: &Path) -> (PathBuf, Origin) {
    match path.canonicalize() {
        Ok(resolved) => (resolved, Origin::Detected),
        Err(e) => {
            let fallback = normalize_lexically(path);
            tracing::warn!(
                path = %path.display(),
                fallback = %fallback.display(),
                error = %e,
                "Could not canonicalize directory, using unresolved path"
            );
            (fallback, Origin::Fallback)
        }
    }
}

/// Remove `.` and `..` components without touching the filesystem.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Render a directory path as a string ending with a path separator.
pub(crate) fn dir_string(path: &Path) -> String {
    let mut s = path.to_string_lossy().into_owned();
    if !s.ends_with(MAIN_SEPARATOR) {
        s.push(MAIN_SEPARATOR);
    }
    s
}

/// Detect the domain from the request server name.
///
/// `localhost` becomes `127.0.0.1`. A missing or empty name yields an empty
/// domain with [`Origin::Fallback`].
pub(crate) fn detect_domain(server_name: Option<&str>) -> (String, Origin) {
    match server_name {
        Some("localhost") => (LOOPBACK.to_owned(), Origin::Detected),
        Some(name) if !name.is_empty() => (name.to_owned(), Origin::Detected),
        _ => {
            tracing::warn!("No server name available, domain is empty");
            (String::new(), Origin::Fallback)
        }
    }
}

/// Detect the URL local part at which `base_dir` is served.
///
/// Without a usable document root the site is assumed to be mounted at `/`.
/// A document root that cannot be canonicalized is matched lexically and
/// marks the result as [`Origin::Fallback`].
pub(crate) fn detect_local_part(
    base_dir: &Path,
    document_root: Option<&Path>,
) -> Result<(String, Origin), ConfigError> {
    let Some(document_root) = document_root.filter(|p| !p.as_os_str().is_empty()) else {
        tracing::warn!("No document root available, assuming site is mounted at /");
        return Ok(("/".to_owned(), Origin::Fallback));
    };

    let (document_root, root_origin) = resolve_dir(document_root);
    match local_part_from(base_dir, &document_root) {
        Ok(local_part) => Ok((local_part, root_origin)),
        Err(_) if root_origin == Origin::Fallback => {
            tracing::warn!(
                document_root = %document_root.display(),
                "Unresolvable document root does not contain base directory, assuming site is mounted at /"
            );
            Ok(("/".to_owned(), Origin::Fallback))
        }
        Err(e) => Err(e),
    }
}

/// Compute the local part of `base_dir` below `document_root`.
///
/// Both paths are expected to be canonical. The result starts with `/` and,
/// unless it is the root itself, ends with `/`.
pub(crate) fn local_part_from(base_dir: &Path, document_root: &Path) -> Result<String, ConfigError> {
    let relative =
        base_dir
            .strip_prefix(document_root)
            .map_err(|_| ConfigError::OutsideDocumentRoot {
                base_dir: base_dir.to_path_buf(),
                document_root: document_root.to_path_buf(),
            })?;

    let mut local_part = String::from("/");
    for component in relative.components() {
        local_part.push_str(&component.as_os_str().to_string_lossy());
        local_part.push('/');
    }
    Ok(local_part)
}

/// Compose the base URL from domain and local part.
pub(crate) fn compose_base_url(domain: &str, local_part: &str) -> String {
    format!("http://{domain}{local_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_domain_localhost() {
        assert_eq!(
            detect_domain(Some("localhost")),
            ("127.0.0.1".to_owned(), Origin::Detected)
        );
    }

    #[test]
    fn test_detect_domain_passthrough() {
        for host in ["example.com", "10.0.0.5", "LOCALHOST", "localhost.localdomain"] {
            assert_eq!(detect_domain(Some(host)), (host.to_owned(), Origin::Detected));
        }
    }

    #[test]
    fn test_detect_domain_missing() {
        assert_eq!(detect_domain(None), (String::new(), Origin::Fallback));
        assert_eq!(detect_domain(Some("")), (String::new(), Origin::Fallback));
    }

    #[test]
    fn test_local_part_subdirectory() {
        let lp = local_part_from(Path::new("/var/www/app"), Path::new("/var/www")).unwrap();
        assert_eq!(lp, "/app/");
    }

    #[test]
    fn test_local_part_nested() {
        let lp = local_part_from(Path::new("/var/www/a/b"), Path::new("/var/www")).unwrap();
        assert_eq!(lp, "/a/b/");
    }

    #[test]
    fn test_local_part_equal_to_document_root() {
        let lp = local_part_from(Path::new("/var/www"), Path::new("/var/www")).unwrap();
        assert_eq!(lp, "/");
    }

    #[test]
    fn test_local_part_document_root_is_filesystem_root() {
        let lp = local_part_from(Path::new("/app"), Path::new("/")).unwrap();
        assert_eq!(lp, "/app/");
    }

    #[test]
    fn test_local_part_outside_document_root() {
        let err = local_part_from(Path::new("/opt/app"), Path::new("/var/www")).unwrap_err();
        assert!(matches!(err, ConfigError::OutsideDocumentRoot { .. }));
    }

    #[test]
    fn test_local_part_sibling_with_common_prefix() {
        // `/var/www2` shares a string prefix with `/var/www` but is not below it
        let err = local_part_from(Path::new("/var/www2/app"), Path::new("/var/www")).unwrap_err();
        assert!(matches!(err, ConfigError::OutsideDocumentRoot { .. }));
    }

    #[test]
    fn test_detect_local_part_without_document_root() {
        let (lp, origin) = detect_local_part(Path::new("/var/www/app"), None).unwrap();
        assert_eq!(lp, "/");
        assert_eq!(origin, Origin::Fallback);
    }

    #[test]
    fn test_detect_local_part_empty_document_root() {
        let (lp, origin) =
            detect_local_part(Path::new("/var/www/app"), Some(Path::new(""))).unwrap();
        assert_eq!(lp, "/");
        assert_eq!(origin, Origin::Fallback);
    }

    #[test]
    fn test_detect_local_part_unresolvable_document_root() {
        let (lp, origin) = detect_local_part(
            Path::new("/var/www/app"),
            Some(Path::new("/nonexistent-sitebase-root")),
        )
        .unwrap();
        assert_eq!(lp, "/");
        assert_eq!(origin, Origin::Fallback);
    }

    #[test]
    fn test_detect_local_part_unresolvable_document_root_matched_lexically() {
        let (lp, origin) = detect_local_part(
            Path::new("/nonexistent-sitebase/www/app"),
            Some(Path::new("/nonexistent-sitebase/www/./")),
        )
        .unwrap();
        assert_eq!(lp, "/app/");
        assert_eq!(origin, Origin::Fallback);
    }

    #[test]
    fn test_detect_local_part_resolved_document_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        std::fs::create_dir(root.join("app")).unwrap();

        let (lp, origin) = detect_local_part(&root.join("app"), Some(&root)).unwrap();
        assert_eq!(lp, "/app/");
        assert_eq!(origin, Origin::Detected);
    }

    #[test]
    fn test_resolve_dir_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a");
        std::fs::create_dir(&nested).unwrap();

        let (resolved, origin) = resolve_dir(&nested.join(".."));
        assert_eq!(resolved, tmp.path().canonicalize().unwrap());
        assert_eq!(origin, Origin::Detected);
    }

    #[test]
    fn test_resolve_dir_missing_falls_back() {
        let (resolved, origin) = resolve_dir(Path::new("/nonexistent-sitebase/x/inc/../.."));
        assert_eq!(resolved, PathBuf::from("/nonexistent-sitebase"));
        assert_eq!(origin, Origin::Fallback);
    }

    #[test]
    fn test_dir_string_trailing_separator() {
        assert_eq!(dir_string(Path::new("/var/www")), "/var/www/");
        assert_eq!(dir_string(Path::new("/")), "/");
    }

    #[test]
    fn test_compose_base_url() {
        assert_eq!(compose_base_url("127.0.0.1", "/app/"), "http://127.0.0.1/app/");
        assert_eq!(compose_base_url("", "/"), "http:///");
    }
}

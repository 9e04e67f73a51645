//! Safety rules for client-supplied file paths.
//!
//! Checked before any filesystem access.

use super::error::DomainError;
use super::value::FilePath;

/// Prefixes that are never readable or writable through the file tools.
pub const PROTECTED_PREFIXES: [&str; 3] = ["/etc", "/sys", "/proc"];

/// Reject traversal (`..` anywhere in the path) and paths under a protected
/// system prefix. The prefix test is per component, so `//etc` and `/./etc`
/// count as `/etc` while `/etcetera` does not.
pub fn ensure_safe(path: &FilePath) -> Result<(), DomainError> {
    let value = path.as_str();

    if value.contains("..") {
        return Err(DomainError::PathTraversal(value.to_string()));
    }

    if PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.as_path().starts_with(prefix))
    {
        return Err(DomainError::ProtectedPath(value.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(value: &str) -> FilePath {
        FilePath::new(value).unwrap()
    }

    #[test]
    fn test_allows_plain_paths() {
        assert!(ensure_safe(&path("notes/today.md")).is_ok());
        assert!(ensure_safe(&path("/tmp/out.txt")).is_ok());
        assert!(ensure_safe(&path("./a.b.c")).is_ok());
        assert!(ensure_safe(&path("/etcetera/x")).is_ok());
        assert!(ensure_safe(&path("/tmp/etc/passwd")).is_ok());
    }

    #[test]
    fn test_rejects_traversal() {
        for value in ["../secret", "a/../../b", "..", "dir/..hidden"] {
            assert_eq!(
                ensure_safe(&path(value)),
                Err(DomainError::PathTraversal(value.to_string()))
            );
        }
    }

    #[test]
    fn test_rejects_protected_prefixes() {
        for value in [
            "/etc",
            "/etc/passwd",
            "/sys/kernel",
            "/proc/self/environ",
            "/./etc/passwd",
            "//etc/shadow",
            "/etc//hostname",
        ] {
            assert_eq!(
                ensure_safe(&path(value)),
                Err(DomainError::ProtectedPath(value.to_string()))
            );
        }
    }
}

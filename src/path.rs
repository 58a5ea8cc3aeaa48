//! Path manipulation utilities for brp-bytecompile
//!
//! Paths are handled as `/`-separated strings. Runtime configs describe paths
//! as they will appear in the installed system, and the staging root is
//! prepended by plain concatenation, so joining must never let an absolute
//! segment discard what came before it.

/// Path separator used for all runtime paths.
pub const SEPARATOR: char = '/';

/// Join `base` and `segments`, then normalize the result to an absolute path.
///
/// Unlike [`std::path::Path::join`], an absolute segment is appended as
/// further components instead of replacing the path built so far, so
/// `normalize_join("/stage", &["/usr/lib"])` is `/stage/usr/lib`.
///
/// Normalization collapses repeated separators (including a leading `//`),
/// drops `.` components and resolves `..` without climbing above `/`.
/// Relative input is treated as rooted at `/`.
pub fn normalize_join(base: &str, segments: &[&str]) -> String {
    let mut components: Vec<&str> = Vec::new();

    for part in std::iter::once(base).chain(segments.iter().copied()) {
        for component in part.split(SEPARATOR) {
            match component {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                other => components.push(other),
            }
        }
    }

    if components.is_empty() {
        return SEPARATOR.to_string();
    }

    let mut normalized = String::with_capacity(base.len());
    for component in components {
        normalized.push(SEPARATOR);
        normalized.push_str(component);
    }
    normalized
}

/// Normalize a single path.
pub fn normalize(path: &str) -> String {
    normalize_join(path, &[])
}

/// Location of `real_path` inside the staging tree rooted at `staging_root`.
pub fn staged(staging_root: &str, real_path: &str) -> String {
    normalize_join(staging_root, &[real_path])
}

/// Number of components in a path (`/` has depth 0).
pub fn depth(path: &str) -> usize {
    path.split(SEPARATOR)
        .filter(|component| !component.is_empty())
        .count()
}

/// Whether `ancestor` is `path` itself or one of its parent directories.
///
/// Both sides are normalized first, and the comparison is per component, so
/// `/usr/lib` is not an ancestor of `/usr/lib64`.
pub fn is_ancestor_or_self(ancestor: &str, path: &str) -> bool {
    let ancestor = normalize(ancestor);
    let path = normalize(path);

    if ancestor == "/" || ancestor == path {
        return true;
    }
    path.strip_prefix(&ancestor)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_join_concatenates_absolute_segments() {
        assert_eq!(normalize_join("/stage", &["/usr/lib"]), "/stage/usr/lib");
        assert_eq!(
            normalize_join("/", &["/opt/rh", "/usr", "bin", "python"]),
            "/opt/rh/usr/bin/python"
        );
    }

    #[test]
    fn test_normalize_join_collapses_double_slashes() {
        assert_eq!(normalize("//usr/bin/python2.7"), "/usr/bin/python2.7");
        assert_eq!(normalize("///usr//lib/"), "/usr/lib");
        assert_eq!(normalize_join("/stage/", &["/"]), "/stage");
    }

    #[test]
    fn test_normalize_resolves_dot_components() {
        assert_eq!(normalize("/usr/./lib/../lib64"), "/usr/lib64");
        assert_eq!(normalize("/../../etc"), "/etc");
        assert_eq!(normalize("relative/dir"), "/relative/dir");
    }

    #[test]
    fn test_normalize_root_and_empty() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize_join("", &["", "."]), "/");
    }

    #[test]
    fn test_staged() {
        assert_eq!(staged("/build/root", "/"), "/build/root");
        assert_eq!(
            staged("/build/root/", "/usr/lib/python2.7"),
            "/build/root/usr/lib/python2.7"
        );
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth("/"), 0);
        assert_eq!(depth("/usr"), 1);
        assert_eq!(depth("/usr/lib64/python3.4"), 3);
    }

    #[test]
    fn test_is_ancestor_or_self() {
        assert!(is_ancestor_or_self("/", "/anything"));
        assert!(is_ancestor_or_self("/stage", "/stage"));
        assert!(is_ancestor_or_self("/stage/", "/stage/opt/rh"));
        assert!(!is_ancestor_or_self("/usr/lib", "/usr/lib64"));
        assert!(!is_ancestor_or_self("/stage/opt", "/stage"));
        assert!(!is_ancestor_or_self("/bin/", "/stage/bin"));
    }
}

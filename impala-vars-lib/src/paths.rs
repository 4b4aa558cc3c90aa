//! Resolution of user-supplied input paths.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{FileKind, VarsError};

/// Expands a leading `~` and makes the path absolute.
///
/// `~user` forms are left untouched, and so is `~` itself when `HOME` is not
/// set. The result is lexically normalised (`.` and `..` removed) but symlinks
/// are not followed.
pub fn resolve(path: &Path) -> PathBuf {
    let expanded = expand_home(path, env::var_os("HOME").map(PathBuf::from));
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };
    normalize(&absolute)
}

/// Fails with [`VarsError::FileNotFound`] unless `path` names a regular file.
pub fn ensure_file(path: &Path, kind: FileKind) -> Result<(), VarsError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(VarsError::FileNotFound {
            kind,
            path: path.to_path_buf(),
        })
    }
}

fn expand_home(path: &Path, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };

    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => home.join(components.as_path()),
        _ => path.to_path_buf(),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn expands_bare_tilde_prefix() {
        let expanded = expand_home(Path::new("~/queries/a.sql"), Some("/home/ana".into()));
        assert_eq!(expanded, PathBuf::from("/home/ana/queries/a.sql"));
    }

    #[test]
    fn expands_lone_tilde() {
        let expanded = expand_home(Path::new("~"), Some("/home/ana".into()));
        assert_eq!(expanded, PathBuf::from("/home/ana"));
    }

    #[test]
    fn leaves_other_users_and_plain_paths_alone() {
        let home = Some(PathBuf::from("/home/ana"));
        assert_eq!(
            expand_home(Path::new("~bob/a.sql"), home.clone()),
            PathBuf::from("~bob/a.sql")
        );
        assert_eq!(
            expand_home(Path::new("dir/~/a.sql"), home),
            PathBuf::from("dir/~/a.sql")
        );
    }

    #[test]
    fn keeps_tilde_without_home() {
        assert_eq!(
            expand_home(Path::new("~/a.sql"), None),
            PathBuf::from("~/a.sql")
        );
    }

    #[test]
    fn normalizes_dot_segments() {
        assert_eq!(
            normalize(Path::new("/srv/./jobs/../queries/a.sql")),
            PathBuf::from("/srv/queries/a.sql")
        );
    }

    #[test]
    fn resolve_makes_relative_paths_absolute() {
        let resolved = resolve(Path::new("some/query.sql"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/query.sql"));
    }

    #[test]
    fn ensure_file_rejects_missing_and_directories() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("vars.conf");
        file.write_str("a=1\n").unwrap();

        assert!(ensure_file(file.path(), FileKind::Config).is_ok());

        let err = ensure_file(&temp.path().join("nope.sql"), FileKind::Query).unwrap_err();
        assert!(err.to_string().starts_with("sql file not found: "));

        let err = ensure_file(temp.path(), FileKind::Config).unwrap_err();
        assert!(matches!(
            err,
            VarsError::FileNotFound {
                kind: FileKind::Config,
                ..
            }
        ));
    }
}

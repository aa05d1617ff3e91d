//! Run-directory resolution.
//!
//! `rundir_name` is kept as a raw template at load time; substituting the
//! `<autoindex>` token is a separate operation so that loading a config has
//! no filesystem side effects. Resolution picks the smallest index, starting
//! at 0, whose resulting directory does not exist yet, so distinct runs
//! never collide on output paths.

use crate::constants::AUTOINDEX_TOKEN;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Filesystem-existence collaborator, swappable in tests.
pub trait DirProbe {
    /// Whether anything already exists at `path`.
    fn is_present(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl DirProbe for FsProbe {
    fn is_present(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// A raw `rundir_name` template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RundirTemplate {
    raw: String,
}

impl RundirTemplate {
    /// Wrap a raw template string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The template exactly as it appeared in the document.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the template carries the `<autoindex>` token.
    pub fn has_autoindex(&self) -> bool {
        self.raw.contains(AUTOINDEX_TOKEN)
    }

    /// Resolve the template under `runs_root`.
    ///
    /// Templates without the token resolve to themselves; with the token,
    /// every candidate index is tried in order until the probe reports a
    /// free path.
    pub fn resolve(&self, runs_root: &Path, probe: &impl DirProbe) -> Result<PathBuf> {
        if !self.has_autoindex() {
            return Ok(runs_root.join(&self.raw));
        }
        for index in 0..=u32::MAX {
            let candidate = runs_root.join(self.raw.replace(AUTOINDEX_TOKEN, &index.to_string()));
            if !probe.is_present(&candidate) {
                return Ok(candidate);
            }
        }
        Err(Error::RundirExhausted {
            template: self.raw.clone(),
        })
    }

    /// Resolve the template and create the directory.
    ///
    /// Another run may grab a resolved index between the existence check and
    /// the `create_dir` call; on `AlreadyExists` the next free index is
    /// tried instead of failing.
    pub fn create(&self, runs_root: &Path) -> Result<PathBuf> {
        loop {
            let path = self.resolve(runs_root, &FsProbe)?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::RundirCreate {
                    path: path.clone(),
                    source: e,
                })?;
            }
            match std::fs::create_dir(&path) {
                Ok(()) => return Ok(path),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && self.has_autoindex() => {}
                Err(e) => {
                    return Err(Error::RundirCreate {
                        path,
                        source: e,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FakeProbe {
        present: HashSet<PathBuf>,
    }

    impl FakeProbe {
        fn new<const N: usize>(present: [&str; N]) -> Self {
            Self {
                present: present.iter().map(PathBuf::from).collect(),
            }
        }
    }

    impl DirProbe for FakeProbe {
        fn is_present(&self, path: &Path) -> bool {
            self.present.contains(path)
        }
    }

    #[test]
    fn test_resolve_empty_root_yields_index_zero() {
        let template = RundirTemplate::new("image_compression/<autoindex>");
        assert_eq!(template.raw(), "image_compression/<autoindex>");
        assert!(template.has_autoindex());

        let probe = FakeProbe::new([]);
        let path = template.resolve(Path::new("runs"), &probe).unwrap();
        assert_eq!(path, PathBuf::from("runs/image_compression/0"));
    }

    #[test]
    fn test_resolve_skips_taken_indexes() {
        let template = RundirTemplate::new("image_compression/<autoindex>");
        let probe = FakeProbe::new(["runs/image_compression/0"]);
        let path = template.resolve(Path::new("runs"), &probe).unwrap();
        assert_eq!(path, PathBuf::from("runs/image_compression/1"));

        let probe = FakeProbe::new(["runs/image_compression/0", "runs/image_compression/1"]);
        let path = template.resolve(Path::new("runs"), &probe).unwrap();
        assert_eq!(path, PathBuf::from("runs/image_compression/2"));
    }

    #[test]
    fn test_resolve_without_token_is_identity() {
        let template = RundirTemplate::new("baseline_run");
        let probe = FakeProbe::new(["runs/baseline_run"]);
        let path = template.resolve(Path::new("runs"), &probe).unwrap();
        assert_eq!(path, PathBuf::from("runs/baseline_run"));
    }

    #[test]
    fn test_token_in_middle_of_name() {
        let template = RundirTemplate::new("exp_<autoindex>_adamw");
        let probe = FakeProbe::new(["runs/exp_0_adamw"]);
        let path = template.resolve(Path::new("runs"), &probe).unwrap();
        assert_eq!(path, PathBuf::from("runs/exp_1_adamw"));
    }

    #[test]
    fn test_create_allocates_successive_dirs() {
        let root = tempfile::tempdir().unwrap();
        let template = RundirTemplate::new("image_compression/<autoindex>");

        let first = template.create(root.path()).unwrap();
        let second = template.create(root.path()).unwrap();

        assert_eq!(first, root.path().join("image_compression/0"));
        assert_eq!(second, root.path().join("image_compression/1"));
        assert!(first.is_dir());
        assert!(second.is_dir());
    }

    #[test]
    fn test_create_without_token_fails_if_present() {
        let root = tempfile::tempdir().unwrap();
        let template = RundirTemplate::new("fixed_name");

        assert!(template.create(root.path()).is_ok());
        let err = template.create(root.path()).unwrap_err();
        assert!(matches!(err, Error::RundirCreate { .. }));
    }
}

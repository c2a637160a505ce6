//! Ownership operations on the managed directory.
//!
//! The reconciliation loop never touches uid/gid syscalls directly; it goes
//! through the [`OwnershipSetter`] capability so tests can inject a scripted
//! fake and run without privileges.

use std::path::{Path, PathBuf};

use chaperone_common::error::{ChaperoneError, Result};
use chaperone_common::types::UserName;
use serde::Serialize;

/// Capability for re-owning a directory tree.
pub trait OwnershipSetter {
    /// Sets the owner of `path` and everything beneath it to the target
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the target account cannot be resolved or any
    /// entry in the tree cannot be re-owned.
    fn set_owner(&self, path: &Path) -> Result<()>;
}

impl<S: OwnershipSetter> OwnershipSetter for &S {
    fn set_owner(&self, path: &Path) -> Result<()> {
        (**self).set_owner(path)
    }
}

/// Setter that applies ownership on the real filesystem.
///
/// The account name is re-resolved on every call: the account may be created
/// after container start by the same bootstrap that creates the directory.
#[derive(Debug, Clone)]
pub struct FsOwnershipSetter {
    owner: UserName,
}

impl FsOwnershipSetter {
    /// Creates a setter targeting the given account.
    #[must_use]
    pub const fn new(owner: UserName) -> Self {
        Self { owner }
    }
}

impl OwnershipSetter for FsOwnershipSetter {
    fn set_owner(&self, path: &Path) -> Result<()> {
        let (uid, gid) = resolve_user(&self.owner)?;
        chown_recursive(path, uid, gid)
    }
}

/// Resolves an account name to its uid and primary gid.
///
/// # Errors
///
/// Returns an error if the account database cannot be read or the account
/// does not exist.
#[cfg(unix)]
fn resolve_user(name: &UserName) -> Result<(u32, u32)> {
    let user = nix::unistd::User::from_name(name.as_str())
        .map_err(|e| ChaperoneError::Io {
            path: PathBuf::from("/etc/passwd"),
            source: e.into(),
        })?
        .ok_or_else(|| ChaperoneError::NotFound {
            kind: "user",
            id: name.to_string(),
        })?;
    Ok((user.uid.as_raw(), user.gid.as_raw()))
}

/// Stub for non-Unix platforms.
///
/// # Errors
///
/// Always returns an error — account lookup requires Unix.
#[cfg(not(unix))]
fn resolve_user(_name: &UserName) -> Result<(u32, u32)> {
    Err(ChaperoneError::Config {
        message: "Unix required for ownership operations".into(),
    })
}

/// Applies `uid`/`gid` to `path` and everything beneath it.
///
/// Symlinks are skipped, not followed. The walk stops at the first failure;
/// the next reconciliation tick retries from the root.
///
/// # Errors
///
/// Returns an error if any entry cannot be read or re-owned.
#[cfg(unix)]
fn chown_recursive(path: &Path, uid: u32, gid: u32) -> Result<()> {
    use nix::unistd::{Gid, Uid, chown};

    let meta = std::fs::symlink_metadata(path).map_err(|e| ChaperoneError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if meta.file_type().is_symlink() {
        return Ok(());
    }

    chown(path, Some(Uid::from_raw(uid)), Some(Gid::from_raw(gid))).map_err(|e| {
        ChaperoneError::Io {
            path: path.to_path_buf(),
            source: e.into(),
        }
    })?;

    if meta.is_dir() {
        let entries = std::fs::read_dir(path).map_err(|e| ChaperoneError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| ChaperoneError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            chown_recursive(&entry.path(), uid, gid)?;
        }
    }
    Ok(())
}

/// Stub for non-Unix platforms.
///
/// # Errors
///
/// Always returns an error — `chown` requires Unix.
#[cfg(not(unix))]
fn chown_recursive(_path: &Path, _uid: u32, _gid: u32) -> Result<()> {
    Err(ChaperoneError::Config {
        message: "Unix required for ownership operations".into(),
    })
}

/// Snapshot of the managed directory's ownership state.
#[derive(Debug, Clone, Serialize)]
pub struct OwnershipReport {
    /// Directory that was inspected.
    pub path: PathBuf,
    /// Whether the directory exists.
    pub exists: bool,
    /// Account that should own the directory.
    pub desired_owner: UserName,
    /// Resolved uid of the desired owner, if the account exists.
    pub desired_uid: Option<u32>,
    /// uid currently owning the directory root, if it exists.
    pub current_uid: Option<u32>,
    /// Number of entries in the tree not owned by the desired uid.
    pub mismatched: u64,
    /// Whether the whole tree is owned by the desired account.
    pub consistent: bool,
}

/// Inspects the ownership of `path` against the desired `owner`.
///
/// Read-only: never changes ownership. A missing directory or an
/// unresolvable account is reported as inconsistent, not as an error.
///
/// # Errors
///
/// Returns an error if an existing tree cannot be traversed.
#[cfg(unix)]
pub fn inspect(path: &Path, owner: &UserName) -> Result<OwnershipReport> {
    use std::os::unix::fs::MetadataExt;

    let desired_uid = resolve_user(owner).ok().map(|(uid, _)| uid);

    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return Ok(OwnershipReport {
            path: path.to_path_buf(),
            exists: false,
            desired_owner: owner.clone(),
            desired_uid,
            current_uid: None,
            mismatched: 0,
            consistent: false,
        });
    };

    let current_uid = Some(meta.uid());
    let mismatched = match desired_uid {
        Some(uid) => count_mismatched(path, uid)?,
        None => 0,
    };

    Ok(OwnershipReport {
        path: path.to_path_buf(),
        exists: true,
        desired_owner: owner.clone(),
        desired_uid,
        current_uid,
        mismatched,
        consistent: desired_uid.is_some() && mismatched == 0,
    })
}

/// Stub for non-Unix platforms.
///
/// # Errors
///
/// Always returns an error — ownership metadata requires Unix.
#[cfg(not(unix))]
pub fn inspect(_path: &Path, _owner: &UserName) -> Result<OwnershipReport> {
    Err(ChaperoneError::Config {
        message: "Unix required for ownership operations".into(),
    })
}

/// Counts entries beneath (and including) `path` not owned by `uid`.
///
/// Symlinks are skipped, matching what the setter applies.
#[cfg(unix)]
fn count_mismatched(path: &Path, uid: u32) -> Result<u64> {
    use std::os::unix::fs::MetadataExt;

    let meta = std::fs::symlink_metadata(path).map_err(|e| ChaperoneError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if meta.file_type().is_symlink() {
        return Ok(0);
    }

    let mut mismatched = u64::from(meta.uid() != uid);
    if meta.is_dir() {
        let entries = std::fs::read_dir(path).map_err(|e| ChaperoneError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| ChaperoneError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            mismatched += count_mismatched(&entry.path(), uid)?;
        }
    }
    Ok(mismatched)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn current_user() -> UserName {
        let user = nix::unistd::User::from_uid(nix::unistd::Uid::effective())
            .expect("user lookup")
            .expect("current uid has a passwd entry");
        UserName::new(user.name)
    }

    #[test]
    fn set_owner_succeeds_on_owned_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).expect("create dirs");
        std::fs::write(nested.join("file.txt"), b"x").expect("write file");

        let setter = FsOwnershipSetter::new(current_user());
        setter.set_owner(dir.path()).expect("set_owner");
    }

    #[test]
    fn set_owner_fails_on_missing_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("does-not-exist");

        let setter = FsOwnershipSetter::new(current_user());
        assert!(setter.set_owner(&missing).is_err());
    }

    #[test]
    fn set_owner_fails_on_unknown_user() {
        let dir = tempfile::tempdir().expect("tempdir");

        let setter = FsOwnershipSetter::new(UserName::new("no-such-user-a8f2"));
        let err = setter.set_owner(dir.path()).expect_err("unknown user");
        assert!(matches!(err, ChaperoneError::NotFound { kind: "user", .. }));
    }

    #[test]
    fn dangling_symlinks_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::os::unix::fs::symlink("/no/such/target", dir.path().join("dangling"))
            .expect("symlink");

        let setter = FsOwnershipSetter::new(current_user());
        setter.set_owner(dir.path()).expect("set_owner skips symlinks");
    }

    #[test]
    fn inspect_reports_consistent_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("file.txt"), b"x").expect("write file");

        let report = inspect(dir.path(), &current_user()).expect("inspect");
        assert!(report.exists);
        assert!(report.consistent);
        assert_eq!(report.mismatched, 0);
        assert_eq!(report.current_uid, report.desired_uid);
    }

    #[test]
    fn inspect_reports_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("gone");

        let report = inspect(&missing, &current_user()).expect("inspect");
        assert!(!report.exists);
        assert!(!report.consistent);
        assert_eq!(report.current_uid, None);
    }

    #[test]
    fn inspect_reports_unknown_user_as_inconsistent() {
        let dir = tempfile::tempdir().expect("tempdir");

        let report =
            inspect(dir.path(), &UserName::new("no-such-user-a8f2")).expect("inspect");
        assert!(report.exists);
        assert!(!report.consistent);
        assert_eq!(report.desired_uid, None);
    }
}

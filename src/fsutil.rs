//! Filesystem helpers shared by the cache and layer contributions
//!
//! Everything that commits state for later builds goes through
//! `atomic_write` so a crash mid-write never leaves a file that looks
//! complete.

use crate::error::{BuildpackError, BuildpackResult};
use flate2::read::GzDecoder;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tar::Archive;
use uuid::Uuid;

/// Copy `from` to `to`, creating parent directories as needed.
pub fn copy_file(from: &Path, to: &Path) -> BuildpackResult<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| BuildpackError::io(format!("creating directory {}", parent.display()), e))?;
    }

    fs::copy(from, to).map_err(|e| {
        BuildpackError::io(
            format!("copying {} to {}", from.display(), to.display()),
            e,
        )
    })?;
    Ok(())
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &str) -> BuildpackResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| BuildpackError::io(format!("creating directory {}", parent.display()), e))?;
    }

    fs::write(path, contents)
        .map_err(|e| BuildpackError::io(format!("writing {}", path.display()), e))
}

/// Write an executable script (mode 0755).
pub fn write_executable(path: &Path, contents: &str) -> BuildpackResult<()> {
    write_file(path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .map_err(|e| BuildpackError::io(format!("setting permissions on {}", path.display()), e))?;
    }

    Ok(())
}

/// Create a symlink at `link` pointing to `target`, replacing any existing one.
pub fn write_symlink(target: &Path, link: &Path) -> BuildpackResult<()> {
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| BuildpackError::io(format!("creating directory {}", parent.display()), e))?;
    }

    if link.symlink_metadata().is_ok() {
        fs::remove_file(link)
            .map_err(|e| BuildpackError::io(format!("removing existing link {}", link.display()), e))?;
    }

    #[cfg(unix)]
    std::os::unix::fs::symlink(target, link).map_err(|e| {
        BuildpackError::io(
            format!("linking {} to {}", link.display(), target.display()),
            e,
        )
    })?;

    #[cfg(not(unix))]
    return Err(BuildpackError::PathInvalid {
        path: link.to_path_buf(),
        reason: "symlinks are only supported on unix".to_string(),
    });

    #[cfg(unix)]
    Ok(())
}

/// Write `contents` to `path` through a uniquely named sibling, then rename
/// into place. A crash mid-write leaves only a `.part` file that no reader
/// recognizes.
pub fn atomic_write(path: &Path, contents: &[u8]) -> BuildpackResult<()> {
    let parent = path.parent().ok_or_else(|| BuildpackError::PathInvalid {
        path: path.to_path_buf(),
        reason: "no parent directory".to_string(),
    })?;
    fs::create_dir_all(parent)
        .map_err(|e| BuildpackError::io(format!("creating directory {}", parent.display()), e))?;

    let temp = parent.join(format!(
        "{}.{}.part",
        file_name(path),
        Uuid::new_v4().simple()
    ));

    if let Err(e) = fs::write(&temp, contents) {
        let _ = fs::remove_file(&temp);
        return Err(BuildpackError::io(format!("writing {}", temp.display()), e));
    }

    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(BuildpackError::io(
            format!("renaming {} to {}", temp.display(), path.display()),
            e,
        ));
    }

    Ok(())
}

/// Extract a gzipped tarball into `destination`, dropping the first
/// `strip_components` path segments of every entry.
pub fn extract_tar_gz(archive: &Path, destination: &Path, strip_components: usize) -> BuildpackResult<()> {
    let file = fs::File::open(archive)
        .map_err(|e| BuildpackError::io(format!("opening archive {}", archive.display()), e))?;
    let mut tar = Archive::new(GzDecoder::new(file));

    fs::create_dir_all(destination)
        .map_err(|e| BuildpackError::io(format!("creating directory {}", destination.display()), e))?;

    let entries = tar
        .entries()
        .map_err(|e| BuildpackError::io(format!("reading archive {}", archive.display()), e))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| BuildpackError::io(format!("reading archive {}", archive.display()), e))?;
        let path = entry
            .path()
            .map_err(|e| BuildpackError::io(format!("reading archive {}", archive.display()), e))?
            .into_owned();

        // Entries that escape the destination are never unpacked
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            continue;
        }

        let stripped: PathBuf = path.components().skip(strip_components).collect();
        if stripped.as_os_str().is_empty() {
            continue;
        }

        let target = destination.join(stripped);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BuildpackError::io(format!("creating directory {}", parent.display()), e))?;
        }

        entry
            .unpack(&target)
            .map_err(|e| BuildpackError::io(format!("unpacking {}", target.display()), e))?;
    }

    Ok(())
}

/// Final path segment as an owned string, empty if there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

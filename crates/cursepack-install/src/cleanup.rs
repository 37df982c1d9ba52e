//! Post-installation cleanup: merging the `overrides/` directory into the
//! output root and removing the bundle's descriptor artifacts.
//!
//! Everything here is best-effort. Each step reports its own failure through
//! a `Result` and [`clean_up`] logs and swallows them, so a botched merge
//! never aborts an otherwise finished installation.

use std::path::Path;
use std::{fs, io};

use cursepack_manifest::{MANIFEST_FILE, MODLIST_FILE, OVERRIDES_DIR};

/// Removes `path`, whatever it is: a file is unlinked, a directory is
/// removed recursively, a missing path is a no-op.
///
/// # Errors
///
/// Returns an error only if the path exists and cannot be removed.
pub fn remove_file_or_dir(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error),
    }
}

/// Moves each top-level entry of `<output_dir>/overrides/` to the output
/// root, then removes the emptied `overrides/` directory. A missing
/// `overrides/` directory is a no-op.
///
/// An entry whose name already exists at the root is left in place and
/// logged, instead of clobbering files the installation just produced.
///
/// # Errors
///
/// Returns an error if the directory cannot be traversed or an entry cannot
/// be moved.
pub fn merge_overrides(output_dir: &Path) -> io::Result<()> {
    let overrides_dir = output_dir.join(OVERRIDES_DIR);
    if !overrides_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(&overrides_dir)? {
        let entry = entry?;
        let target = output_dir.join(entry.file_name());
        if target.exists() {
            tracing::warn!(path = %target.display(), "Override collides with an existing entry, skipping");
            continue;
        }
        fs::rename(entry.path(), &target)?;
    }

    match fs::remove_dir(&overrides_dir) {
        Err(error) if error.kind() == io::ErrorKind::DirectoryNotEmpty => {
            tracing::warn!("Leaving the skipped overrides in place");
            Ok(())
        }
        other => other,
    }
}

/// Runs the full cleanup pass on a successfully installed pack: merge the
/// overrides, then drop `modlist.html` and `manifest.json`.
pub fn clean_up(output_dir: &Path) {
    tracing::debug!("Merging the overrides into the output root");
    if let Err(error) = merge_overrides(output_dir) {
        tracing::error!(%error, "Failed to merge the overrides directory");
    }

    for artifact in [MODLIST_FILE, MANIFEST_FILE] {
        let path = output_dir.join(artifact);
        tracing::debug!(path = %path.display(), "Removing");
        if let Err(error) = remove_file_or_dir(&path) {
            tracing::error!(%error, path = %path.display(), "Failed to remove");
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempdir::TempDir;

    use super::*;

    const TEMPDIR_PREFIX: &str = "cursepack-cleanup-test";

    #[fixture]
    fn dir() -> TempDir {
        TempDir::new(TEMPDIR_PREFIX).unwrap()
    }

    #[rstest]
    fn removing_a_missing_path_is_a_noop(dir: TempDir) {
        remove_file_or_dir(&dir.path().join("nothing-here")).unwrap();
    }

    #[rstest]
    fn removes_files_and_directories(dir: TempDir) {
        let file = dir.path().join("modlist.html");
        fs::write(&file, "<html></html>").unwrap();
        remove_file_or_dir(&file).unwrap();
        assert!(!file.exists());

        let tree = dir.path().join("overrides");
        fs::create_dir_all(tree.join("config")).unwrap();
        fs::write(tree.join("config/settings.txt"), "x=1").unwrap();
        remove_file_or_dir(&tree).unwrap();
        assert!(!tree.exists());
    }

    #[rstest]
    fn merges_overrides_into_the_root(dir: TempDir) {
        let overrides = dir.path().join(OVERRIDES_DIR);
        fs::create_dir_all(overrides.join("config")).unwrap();
        fs::write(overrides.join("config/settings.txt"), "x=1").unwrap();
        fs::write(overrides.join("options.txt"), "fov=90").unwrap();

        merge_overrides(dir.path()).unwrap();

        assert!(dir.path().join("config/settings.txt").exists());
        assert!(dir.path().join("options.txt").exists());
        assert!(!overrides.exists());
    }

    #[rstest]
    fn a_colliding_override_does_not_clobber(dir: TempDir) {
        fs::write(dir.path().join("options.txt"), "theirs").unwrap();
        let overrides = dir.path().join(OVERRIDES_DIR);
        fs::create_dir_all(&overrides).unwrap();
        fs::write(overrides.join("options.txt"), "ours").unwrap();

        merge_overrides(dir.path()).unwrap();

        let kept = fs::read_to_string(dir.path().join("options.txt")).unwrap();
        assert_eq!(kept, "theirs");
        assert!(overrides.join("options.txt").exists());
    }

    #[rstest]
    fn clean_up_on_an_empty_directory_is_quiet(dir: TempDir) {
        clean_up(dir.path());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

//! Installation pipeline for CurseForge modpack bundles.
//!
//! An installation run is strictly sequential: extract the bundle, parse its
//! manifest, download every referenced mod one at a time, and only if all of
//! them made it, merge the bundled overrides and drop the descriptor
//! artifacts. A failed download never aborts the batch; a missing or
//! unparsable manifest always does.

use std::path::{Path, PathBuf};
use std::{fs, io};

use cursepack_manifest::{Manifest, MANIFEST_FILE};
use cursepack_repository::CurseforgeRepository;

pub mod archive;
pub mod cleanup;

/// Subdirectory of the output root that receives the downloaded mods.
pub const MODS_DIR: &str = "mods";

#[derive(Debug, thiserror::Error)]
#[must_use]
pub enum Error {
    #[error("An I/O error occurred, path at fault: {path:?}")]
    Io {
        source: io::Error,
        path: PathBuf,
    },

    #[error("Failed to read the modpack bundle as a zip archive")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to load the modpack manifest")]
    Manifest(#[from] cursepack_manifest::Error),
}

/// What an installation run amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Report {
    pub pack_name: String,
    pub pack_version: String,
    /// Identifier of the modloader the pack requires, straight from the
    /// manifest. Reported to the user, never installed.
    pub loader_id: Option<String>,
    pub total: usize,
    pub downloaded: usize,
}

impl Report {
    /// Whether every mod the manifest references was downloaded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.downloaded == self.total
    }
}

/// The orchestrator: drives extraction, manifest parsing, the sequential
/// download loop and the conditional cleanup pass.
#[derive(Debug)]
#[must_use]
pub struct Installer {
    repository: CurseforgeRepository,
}

impl Installer {
    pub const fn new(repository: CurseforgeRepository) -> Self {
        Self { repository }
    }

    /// Materializes the bundle at `archive_path` into `output_dir`.
    ///
    /// Cleanup (override merge, artifact removal) only happens when every
    /// mod downloaded; on a partial failure the `manifest.json`,
    /// `modlist.html` and `overrides/` artifacts are left in place so the
    /// run can be retried or inspected.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or the
    /// manifest cannot be loaded. Extraction, per-mod and cleanup failures
    /// are logged and reflected in the returned [`Report`] instead.
    pub fn install(&self, archive_path: &Path, output_dir: &Path) -> Result<Report, Error> {
        fs::create_dir_all(output_dir).map_err(|source| Error::Io {
            source,
            path: output_dir.to_path_buf(),
        })?;

        if let Err(error) = archive::extract(archive_path, output_dir) {
            tracing::error!(%error, "Failed to extract the modpack bundle");
        }

        let manifest = Manifest::read_from(output_dir.join(MANIFEST_FILE))?;
        tracing::info!(
            name = %manifest.name,
            version = %manifest.version,
            "Loaded the manifest",
        );

        let mods_dir = output_dir.join(MODS_DIR);
        fs::create_dir_all(&mods_dir).map_err(|source| Error::Io {
            source,
            path: mods_dir.clone(),
        })?;

        let total = manifest.files.len();
        let mut downloaded = 0;
        for mod_ref in &manifest.files {
            match self
                .repository
                .download_mod(mod_ref.project_id, mod_ref.file_id, &mods_dir)
            {
                Ok(_) => downloaded += 1,
                Err(error) => tracing::error!(
                    %error,
                    project_id = mod_ref.project_id,
                    file_id = mod_ref.file_id,
                    "Failed to download a mod",
                ),
            }
        }

        if downloaded == total {
            tracing::info!(downloaded, total, "Downloaded all mods, cleaning up");
            cleanup::clean_up(output_dir);
        } else {
            tracing::warn!(downloaded, total, "Some mods were not downloaded");
        }

        let loader_id = manifest.loader_id().map(str::to_owned);
        Ok(Report {
            pack_name: manifest.name,
            pack_version: manifest.version,
            loader_id,
            total,
            downloaded,
        })
    }
}

//! Data model for the `manifest.json` descriptor found at the root of a
//! CurseForge modpack bundle.
//!
//! A bundle looks roughly like this:
//!
//! ```not-rust
//! my_modpack.zip/
//!     manifest.json
//!     modlist.html
//!     overrides/
//!         config/
//!             mymod.cfg
//!         options.txt
//! ```
//!
//! The manifest lists the pack's mods as opaque `(projectID, fileID)` pairs
//! which the remote API resolves to actual files, plus the modloader the pack
//! expects. This crate only provides the schema types and parsing; fetching
//! and installation live in the other `cursepack` crates.

use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;

/// File name of the manifest inside the bundle (and, after extraction, at the
/// root of the output directory).
pub const MANIFEST_FILE: &str = "manifest.json";

/// Static HTML mod listing shipped in most bundles. Not consumed, only
/// removed during cleanup.
pub const MODLIST_FILE: &str = "modlist.html";

/// Directory inside the bundle whose contents get merged into the output
/// root upon installation.
pub const OVERRIDES_DIR: &str = "overrides";

#[derive(Debug, thiserror::Error)]
#[must_use]
pub enum Error {
    #[error("Failed to read the manifest at {path:?}")]
    Io {
        source: io::Error,
        path: PathBuf,
    },

    #[error("The manifest is not valid JSON")]
    SerdeJson(#[from] serde_json::Error),
}

/// The parsed `manifest.json` of a modpack bundle.
///
/// Only the fields this tool consumes are modeled; everything else in the
/// descriptor is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[must_use]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub minecraft: Minecraft,
    pub files: Vec<ModRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Minecraft {
    #[serde(rename = "modLoaders", default)]
    pub mod_loaders: Vec<ModLoader>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModLoader {
    pub id: String,
    #[serde(default)]
    pub primary: bool,
}

/// A reference to one downloadable artifact on the remote API.
///
/// No uniqueness is enforced: a manifest listing the same pair twice will
/// have it fetched twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ModRef {
    #[serde(rename = "projectID")]
    pub project_id: u32,
    #[serde(rename = "fileID")]
    pub file_id: u32,
}

impl Manifest {
    /// Reads and parses a manifest from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not contain a
    /// valid manifest. Both are fatal to an installation run: nothing
    /// downstream is meaningful without the manifest.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            source,
            path: path.to_path_buf(),
        })?;
        let manifest = serde_json::from_str(&json)?;
        Ok(manifest)
    }

    /// The identifier of the modloader this pack requires, if any.
    ///
    /// Only the first `modLoaders` entry is consulted, matching how
    /// launchers treat the manifest.
    #[must_use]
    pub fn loader_id(&self) -> Option<&str> {
        self.minecraft
            .mod_loaders
            .first()
            .map(|loader| loader.id.as_str())
    }
}

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use zip::ZipArchive;

use crate::Error;

/// Extracts every entry of the zip bundle at `archive_path` into
/// `output_dir`, preserving relative paths.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened, is not a valid zip, or
/// an entry cannot be written. Extraction failure is recoverable at the
/// installation level: the caller logs it and proceeds, which surfaces as a
/// missing-manifest error downstream. No partially extracted entries are
/// rolled back.
pub fn extract(archive_path: &Path, output_dir: &Path) -> Result<(), Error> {
    let file = File::open(archive_path).map_err(|source| Error::Io {
        source,
        path: archive_path.to_path_buf(),
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    archive.extract(output_dir)?;
    tracing::debug!(
        archive = %archive_path.display(),
        output = %output_dir.display(),
        "Extracted the modpack bundle",
    );
    Ok(())
}

//! Client for the remote CurseForge file-hosting API.
//!
//! The API exposes one relevant endpoint: a `GET` on
//! `/api/v1/mods/{projectID}/files/{fileID}/download` answers with a redirect
//! chain that terminates at the actual file bytes, optionally annotated with
//! a `Content-Disposition` header carrying the canonical file name.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::redirect;
use url::Url;

#[derive(Debug, thiserror::Error)]
#[must_use]
pub enum Error {
    #[error("HTTP request to the CurseForge API failed")]
    Http(#[from] reqwest::Error),

    #[error("Could not determine a file name for {url}")]
    UnresolvedFileName { url: Url },

    #[error("Failed to write the downloaded file to {path:?}")]
    Io {
        source: io::Error,
        path: PathBuf,
    },
}

/// A struct that represents the remote [CurseForge](https://www.curseforge.com) repository.
#[derive(Debug)]
#[must_use]
pub struct CurseforgeRepository {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Default for CurseforgeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CurseforgeRepository {
    pub const USER_AGENT: &str = concat!(
        env!("CARGO_PKG_REPOSITORY"),
        '/',
        env!("CARGO_PKG_VERSION"),
        ' ',
        '(',
        env!("CARGO_PKG_AUTHORS"),
        ')',
    );

    pub const BASE_URL: &str = "https://www.curseforge.com";

    /// Total per-request timeout. The API itself imposes none, but a hung
    /// connection must not stall an installation run forever.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    const MAX_REDIRECTS: usize = 10;

    pub fn new() -> Self {
        Self::with_base_url(Self::BASE_URL)
    }

    /// Creates a repository pointed at a custom host. Intended for tests.
    #[expect(clippy::missing_panics_doc)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent(Self::USER_AGENT)
                .timeout(Self::REQUEST_TIMEOUT)
                .redirect(redirect::Policy::limited(Self::MAX_REDIRECTS))
                .build()
                .expect("Failed to build a Reqwest Client with custom user agent"),
            base_url: base_url.into(),
        }
    }

    /// Resolves a `(projectID, fileID)` pair to a concrete file and writes it
    /// into `output_dir`, overwriting any file of the same name.
    ///
    /// The file name defaults to the last path segment of the final
    /// (post-redirect) URL; a `Content-Disposition: ...; filename="..."`
    /// response header takes precedence when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, no file name can be derived, or the file cannot
    /// be written. Per-mod failures are the caller's to log and tolerate.
    pub fn download_mod(
        &self,
        project_id: u32,
        file_id: u32,
        output_dir: &Path,
    ) -> Result<PathBuf, Error> {
        let url = format!(
            "{base}/api/v1/mods/{project_id}/files/{file_id}/download",
            base = self.base_url,
        );
        let response = self.client.get(url).send()?.error_for_status()?;

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let file_name = file_name_for(response.url(), content_disposition.as_deref())
            .ok_or_else(|| Error::UnresolvedFileName {
                url: response.url().clone(),
            })?;

        tracing::info!(%file_name, project_id, file_id, "Downloading");
        let bytes = response.bytes()?;
        let path = output_dir.join(&file_name);
        fs::write(&path, &bytes).map_err(|source| Error::Io {
            source,
            path: path.clone(),
        })?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Downloaded");

        Ok(path)
    }
}

/// Derives the output file name from the final URL and an optional
/// `Content-Disposition` header value.
fn file_name_for(final_url: &Url, content_disposition: Option<&str>) -> Option<String> {
    if let Some(header) = content_disposition {
        if let Some((_, directive)) = header.rsplit_once("filename=") {
            let name = directive.trim().trim_end_matches(';').trim_matches('"');
            if !name.is_empty() {
                return Some(name.to_owned());
            }
        }
    }

    final_url
        .path_segments()
        .and_then(Iterator::last)
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use url::Url;

    use super::file_name_for;

    #[rstest]
    #[case(None, Some("archive-1.2.3.jar"))]
    #[case(Some("attachment; filename=\"CustomName.jar\""), Some("CustomName.jar"))]
    #[case(Some("attachment; filename=unquoted.jar"), Some("unquoted.jar"))]
    #[case(Some("attachment"), Some("archive-1.2.3.jar"))]
    #[case(Some("attachment; filename=\"\""), Some("archive-1.2.3.jar"))]
    fn file_name_resolution(
        #[case] content_disposition: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let url = Url::parse("https://edge.example.net/path/archive-1.2.3.jar").unwrap();
        let name = file_name_for(&url, content_disposition);
        assert_eq!(name.as_deref(), expected);
    }

    #[rstest]
    fn no_name_for_a_bare_host() {
        let url = Url::parse("https://edge.example.net/").unwrap();
        assert_eq!(file_name_for(&url, None), None);
    }
}

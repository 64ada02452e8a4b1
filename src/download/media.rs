//! Media file downloading.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use indicatif::ProgressBar;
use reqwest::Client;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::dedup::{DedupIndex, StreamingHasher};
use crate::error::{Error, Result};
use crate::fs::file_name_for_url;
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// What a successful download call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// New content written to `path`.
    Saved { path: PathBuf, bytes: u64 },
    /// A file with that name was already there; nothing was fetched.
    AlreadyPresent(PathBuf),
}

/// Fetches resolved URLs into files.
pub struct Downloader {
    client: Client,
    show_progress: bool,
}

impl Downloader {
    pub fn new(client: Client, show_progress: bool) -> Self {
        Self {
            client,
            show_progress,
        }
    }

    /// Download `url` into `dest_dir`, named after the URL's basename.
    ///
    /// Content whose running digest matches anything in `index` is
    /// discarded with [`Error::DuplicateContent`]; saved content has its
    /// digest added to `index`.
    pub async fn download(
        &self,
        url: &str,
        dest_dir: &Path,
        index: &mut DedupIndex,
        cancel: &CancellationToken,
    ) -> Result<DownloadOutcome> {
        let output_path = dest_dir.join(file_name_for_url(url)?);

        if tokio::fs::try_exists(&output_path).await? {
            return Ok(DownloadOutcome::AlreadyPresent(output_path));
        }

        tracing::debug!("GET {}", url);
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            response = self.client.get(url).send() => response?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let progress = match response.content_length() {
            Some(len) if self.show_progress && len > PROGRESS_THRESHOLD => {
                Some(create_download_bar(len))
            }
            _ => None,
        };

        let written = stream_to_file(
            response.bytes_stream(),
            &output_path,
            url,
            index,
            cancel,
            progress.as_ref(),
        )
        .await;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(DownloadOutcome::Saved {
            path: output_path,
            bytes: written?,
        })
    }
}

/// Stream `body` into a new file at `path`, checking the running digest
/// against `index` after every chunk.
///
/// The file is removed on every failure path: duplicate content, stream
/// or write errors, and cancellation. An existing file at `path` is never
/// touched. A body with no chunks is never compared and always saved.
pub async fn stream_to_file<S, E>(
    mut body: S,
    path: &Path,
    url: &str,
    index: &mut DedupIndex,
    cancel: &CancellationToken,
    progress: Option<&ProgressBar>,
) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin,
    E: Into<Error>,
{
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    let mut partial = PartialFile::new(path, file);
    let mut hasher = StreamingHasher::new();

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            next = body.next() => next,
        };
        let Some(chunk) = next else {
            break;
        };
        let chunk = chunk.map_err(Into::into)?;

        hasher.update(&chunk);
        if index.contains(&hasher.current_hex()) {
            return Err(Error::DuplicateContent(url.to_string()));
        }

        partial.file().write_all(&chunk).await?;

        if let Some(pb) = progress {
            pb.set_position(hasher.bytes());
        }
    }

    partial.file().flush().await?;
    partial.commit();
    index.insert(hasher.current_hex());

    Ok(hasher.bytes())
}

/// A file being written. Deleted on drop unless committed.
struct PartialFile {
    path: Option<PathBuf>,
    file: File,
}

impl PartialFile {
    fn new(path: &Path, file: File) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            file,
        }
    }

    fn file(&mut self) -> &mut File {
        &mut self.file
    }

    /// Keep the file.
    fn commit(mut self) {
        self.path = None;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };

        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!("Removed partial file {}", path.display()),
            Err(e) => tracing::warn!("Failed to remove partial file {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::hash_bytes;
    use futures::stream;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn body(chunks: &[&'static [u8]]) -> impl Stream<Item = std::io::Result<Bytes>> + Unpin {
        stream::iter(
            chunks
                .iter()
                .map(|c| Ok(Bytes::from_static(c)))
                .collect::<Vec<_>>(),
        )
    }

    async fn save(
        chunks: &[&'static [u8]],
        path: &Path,
        index: &mut DedupIndex,
    ) -> Result<u64> {
        stream_to_file(
            body(chunks),
            path,
            "https://i.redd.it/x.jpg",
            index,
            &CancellationToken::new(),
            None,
        )
        .await
    }

    #[tokio::test]
    async fn test_saves_and_records_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        let mut index = DedupIndex::new();

        let written = assert_ok!(save(&[b"hello ", b"world"], &path, &mut index).await);

        assert_eq!(written, 11);
        assert_eq!(std::fs::read(&path).unwrap(), b"hello world");
        assert!(index.contains(&hash_bytes(b"hello world")));
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn test_identical_content_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = DedupIndex::new();

        assert_ok!(save(&[b"same", b" bytes"], &dir.path().join("a.jpg"), &mut index).await);

        // Different chunking, same content
        let second = dir.path().join("b.jpg");
        let result = save(&[b"sa", b"me by", b"tes"], &second, &mut index).await;

        assert!(matches!(result, Err(Error::DuplicateContent(_))));
        assert!(!second.exists());
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_bodies_are_saved() {
        // Digests are only compared after a chunk arrives
        let dir = tempfile::tempdir().unwrap();
        let mut index = DedupIndex::new();

        assert_ok!(save(&[], &dir.path().join("a"), &mut index).await);
        assert_eq!(assert_ok!(save(&[], &dir.path().join("b"), &mut index).await), 0);

        assert!(dir.path().join("b").exists());
        assert!(index.contains(&hash_bytes(b"")));
    }

    #[tokio::test]
    async fn test_prefix_matching_saved_content_counts_as_duplicate() {
        // The running digest is compared at every chunk boundary, so a file
        // whose leading chunk equals a saved file is discarded.
        let dir = tempfile::tempdir().unwrap();
        let mut index = DedupIndex::new();

        assert_ok!(save(&[b"head"], &dir.path().join("short"), &mut index).await);
        let result = save(&[b"head", b"tail"], &dir.path().join("long"), &mut index).await;

        assert!(matches!(result, Err(Error::DuplicateContent(_))));
        assert!(!dir.path().join("long").exists());
    }

    #[tokio::test]
    async fn test_stream_error_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mp4");
        let mut index = DedupIndex::new();

        let chunks: Vec<std::io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ];
        let result = stream_to_file(
            stream::iter(chunks),
            &path,
            "https://i.redd.it/broken.mp4",
            &mut index,
            &CancellationToken::new(),
            None,
        )
        .await;

        assert!(matches!(result, Err(Error::Io(_))));
        assert!(!path.exists());
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slow.mp4");
        let mut index = DedupIndex::new();
        let cancel = CancellationToken::new();

        // One chunk, then a body that never ends
        let stalled = body(&[b"first"]).chain(stream::pending());
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = stream_to_file(
            stalled,
            &path,
            "https://i.redd.it/slow.mp4",
            &mut index,
            &cancel,
            None,
        )
        .await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.jpg");
        std::fs::write(&path, b"original").unwrap();
        let mut index = DedupIndex::new();

        assert_err!(save(&[b"new"], &path, &mut index).await);
        assert_eq!(std::fs::read(&path).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_download_from_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"image bytes".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/media/gone.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(Client::new(), false);
        let mut index = DedupIndex::new();
        let cancel = CancellationToken::new();

        let outcome = downloader
            .download(
                &format!("{}/media/a.jpg", server.uri()),
                dir.path(),
                &mut index,
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DownloadOutcome::Saved {
                path: dir.path().join("a.jpg"),
                bytes: 11
            }
        );

        let missing = downloader
            .download(
                &format!("{}/media/gone.jpg", server.uri()),
                dir.path(),
                &mut index,
                &cancel,
            )
            .await;
        assert!(matches!(
            missing,
            Err(Error::HttpStatus { status: 404, .. })
        ));
        assert!(!dir.path().join("gone.jpg").exists());
    }

    #[tokio::test]
    async fn test_existing_file_is_not_fetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh".to_vec()))
            .expect(0)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"old").unwrap();

        let outcome = Downloader::new(Client::new(), false)
            .download(
                &format!("{}/a.jpg", server.uri()),
                dir.path(),
                &mut DedupIndex::new(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome, DownloadOutcome::AlreadyPresent(dir.path().join("a.jpg")));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
        assert_eq!(std::fs::read(dir.path().join("a.jpg")).unwrap(), b"old");
    }
}

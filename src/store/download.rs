//! Download and verification of checksummed catalog partitions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::GalcatError;

use super::Partition;

/// Blocking byte transport used to fetch remote resources.
///
/// Retry, timeout, and cancellation policy belongs to implementations; a
/// fetch either fully succeeds or fails.
pub trait Transport {
    /// Fetch `url` into `dest`, creating or truncating the file.
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), GalcatError>;
}

/// HTTP transport backed by `ureq`.
#[cfg(feature = "remote")]
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpTransport;

#[cfg(feature = "remote")]
impl Transport for HttpTransport {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), GalcatError> {
        url::Url::parse(url).map_err(|source| GalcatError::Download {
            url: url.to_string(),
            message: format!("invalid URL: {source}"),
        })?;

        let mut response = ureq::get(url)
            .call()
            .map_err(|source| GalcatError::Download {
                url: url.to_string(),
                message: source.to_string(),
            })?;

        let mut file = fs::File::create(dest)?;
        let mut reader = response.body_mut().as_reader();
        io::copy(&mut reader, &mut file).map_err(|source| GalcatError::Download {
            url: url.to_string(),
            message: format!("failed writing '{}': {}", dest.display(), source),
        })?;
        Ok(())
    }
}

/// Fetches a fixed list of checksummed partitions into a root directory and
/// verifies each against its expected digest.
///
/// A file already present with a matching digest is left alone. A fetched
/// file whose digest does not match fails with
/// [`GalcatError::ChecksumMismatch`]; nothing is silently substituted.
pub struct CatalogDownloader<'a> {
    root: PathBuf,
    resources: Vec<Partition>,
    spot_check_exempt: Vec<String>,
    transport: &'a dyn Transport,
}

impl<'a> CatalogDownloader<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        resources: Vec<Partition>,
        transport: &'a dyn Transport,
    ) -> Self {
        CatalogDownloader {
            root: root.into(),
            resources,
            spot_check_exempt: Vec::new(),
            transport,
        }
    }

    /// Asset file names excluded from digest spot-checks (oversized assets
    /// that are fetched but never verified).
    pub fn spot_check_exempt(mut self, file_names: Vec<String>) -> Self {
        self.spot_check_exempt = file_names;
        self
    }

    /// Fetch any missing or digest-invalid resource, then verify it.
    pub fn download(&self) -> Result<(), GalcatError> {
        fs::create_dir_all(&self.root)?;

        for resource in &self.resources {
            let dest = resource.local_path(&self.root);

            if self.is_exempt(resource) {
                if !dest.is_file() {
                    self.transport.fetch(&resource.url, &dest)?;
                }
                continue;
            }

            if dest.is_file() && sha256_hex(&dest)? == resource.sha256 {
                continue;
            }

            self.transport.fetch(&resource.url, &dest)?;
            let actual = sha256_hex(&dest)?;
            if actual != resource.sha256 {
                return Err(GalcatError::ChecksumMismatch {
                    name: resource.file_name.clone(),
                    expected: resource.sha256.clone(),
                    actual,
                });
            }
        }

        Ok(())
    }

    fn is_exempt(&self, resource: &Partition) -> bool {
        self.spot_check_exempt
            .iter()
            .any(|name| name == &resource.file_name)
    }
}

/// Streaming SHA-256 digest of a file, as lowercase hex.
pub fn sha256_hex(path: &Path) -> Result<String, GalcatError> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::PartitionKind;
    use std::cell::RefCell;

    /// Transport that serves canned bytes and records every fetch.
    struct CannedTransport {
        bytes: Vec<u8>,
        fetched: RefCell<Vec<String>>,
    }

    impl CannedTransport {
        fn new(bytes: &[u8]) -> Self {
            CannedTransport {
                bytes: bytes.to_vec(),
                fetched: RefCell::new(Vec::new()),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetched.borrow().len()
        }
    }

    impl Transport for CannedTransport {
        fn fetch(&self, url: &str, dest: &Path) -> Result<(), GalcatError> {
            self.fetched.borrow_mut().push(url.to_string());
            fs::write(dest, &self.bytes)?;
            Ok(())
        }
    }

    fn digest_of(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    fn partition_expecting(bytes: &[u8]) -> Partition {
        Partition {
            kind: PartitionKind::Train,
            file_name: "train_catalog.parquet".to_string(),
            url: "https://example.net/train_catalog.parquet".to_string(),
            sha256: digest_of(bytes),
        }
    }

    #[test]
    fn fetches_missing_resource_and_verifies() {
        let temp = tempfile::tempdir().expect("tempdir");
        let transport = CannedTransport::new(b"catalog bytes");
        let partition = partition_expecting(b"catalog bytes");

        let downloader =
            CatalogDownloader::new(temp.path(), vec![partition.clone()], &transport);
        downloader.download().expect("download");

        assert_eq!(transport.fetch_count(), 1);
        assert!(partition.local_path(temp.path()).is_file());
    }

    #[test]
    fn valid_cached_resource_is_not_refetched() {
        let temp = tempfile::tempdir().expect("tempdir");
        let transport = CannedTransport::new(b"catalog bytes");
        let partition = partition_expecting(b"catalog bytes");
        fs::write(partition.local_path(temp.path()), b"catalog bytes").expect("seed cache");

        let downloader = CatalogDownloader::new(temp.path(), vec![partition], &transport);
        downloader.download().expect("download");

        assert_eq!(transport.fetch_count(), 0);
    }

    #[test]
    fn digest_mismatch_fails_loudly() {
        let temp = tempfile::tempdir().expect("tempdir");
        let transport = CannedTransport::new(b"corrupted bytes");
        let partition = partition_expecting(b"catalog bytes");

        let downloader =
            CatalogDownloader::new(temp.path(), vec![partition.clone()], &transport);
        let err = downloader.download().expect_err("should fail");

        match err {
            GalcatError::ChecksumMismatch {
                name,
                expected,
                actual,
            } => {
                assert_eq!(name, partition.file_name);
                assert_eq!(expected, partition.sha256);
                assert_eq!(actual, digest_of(b"corrupted bytes"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stale_cached_resource_is_refetched() {
        let temp = tempfile::tempdir().expect("tempdir");
        let transport = CannedTransport::new(b"catalog bytes");
        let partition = partition_expecting(b"catalog bytes");
        fs::write(partition.local_path(temp.path()), b"stale bytes").expect("seed cache");

        let downloader =
            CatalogDownloader::new(temp.path(), vec![partition.clone()], &transport);
        downloader.download().expect("download");

        assert_eq!(transport.fetch_count(), 1);
        assert_eq!(
            sha256_hex(&partition.local_path(temp.path())).expect("digest"),
            partition.sha256
        );
    }

    #[test]
    fn exempt_resource_skips_verification() {
        let temp = tempfile::tempdir().expect("tempdir");
        let transport = CannedTransport::new(b"whatever came down");
        let mut partition = partition_expecting(b"catalog bytes");
        partition.sha256 = "not even hex".to_string();

        let downloader =
            CatalogDownloader::new(temp.path(), vec![partition.clone()], &transport)
                .spot_check_exempt(vec![partition.file_name.clone()]);
        downloader.download().expect("download");

        assert_eq!(transport.fetch_count(), 1);
    }
}

//! Split resolution against the presplit catalog layout.

use std::path::{Path, PathBuf};

use log::warn;

use crate::error::GalcatError;
use crate::split::Split;

use super::download::{CatalogDownloader, Transport};
use super::{legs_partitions, Partition, StorageRoot};

/// Outcome of a resolution call: where the catalogs live and which
/// partitions the split combines, in rule order.
#[derive(Clone, Debug)]
pub struct Resolution {
    pub root: PathBuf,
    pub partitions: Vec<Partition>,
}

/// Resolves a split request to the partition files it needs, optionally
/// downloading and verifying them first.
///
/// The storage root is injected at construction; resolution itself holds no
/// state across calls beyond that configuration.
pub struct SplitResolver {
    storage_root: StorageRoot,
    transport: Option<Box<dyn Transport>>,
}

impl SplitResolver {
    pub fn new(storage_root: StorageRoot) -> Self {
        SplitResolver {
            storage_root,
            transport: None,
        }
    }

    /// Resolver for the Legacy Survey catalogs with the default
    /// probe-then-fallback root. With the `remote` feature enabled it is
    /// ready to download; otherwise inject a transport with
    /// [`SplitResolver::with_transport`].
    pub fn legs() -> Self {
        let resolver = SplitResolver::new(StorageRoot::legs_default());
        #[cfg(feature = "remote")]
        let resolver = resolver.with_transport(Box::new(super::download::HttpTransport));
        resolver
    }

    /// Use `transport` for `download=true` calls.
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the request, optionally download/verify the catalog set, and
    /// return the minimal ordered partition list for `split`.
    ///
    /// `root` is informational only: this dataset's storage location is not
    /// relocatable, so a supplied value is ignored with a warning. `train` is
    /// a legacy convention this dataset never had; any non-absent value is
    /// rejected before I/O.
    pub fn resolve(
        &self,
        root: Option<&Path>,
        split: Split,
        download: bool,
        train: Option<bool>,
    ) -> Result<Resolution, GalcatError> {
        if train.is_some() {
            return Err(GalcatError::invalid_argument(
                "this dataset has unlabelled data: request split 'train', 'test', \
                 'unlabelled' or 'train+unlabelled' rather than train=false etc",
            ));
        }

        if let Some(root) = root {
            warn!(
                "catalog storage is not relocatable - ignoring root {}",
                root.display()
            );
        }

        let storage_root = self.storage_root.resolve();
        let declared = legs_partitions();

        if download {
            let transport =
                self.transport
                    .as_deref()
                    .ok_or_else(|| GalcatError::Download {
                        url: super::CATALOG_BASE_URL.to_string(),
                        message: "no transport configured (enable the 'remote' feature \
                                  or inject one with with_transport)"
                            .to_string(),
                    })?;
            warn!("only downloading catalogs - images are too large to download");
            CatalogDownloader::new(&storage_root, declared.clone(), transport).download()?;
        }

        let partitions: Vec<Partition> = split
            .partitions()
            .iter()
            .filter_map(|kind| declared.iter().find(|partition| partition.kind == *kind))
            .cloned()
            .collect();

        Ok(Resolution {
            root: storage_root,
            partitions,
        })
    }
}

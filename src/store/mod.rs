//! Catalog storage orchestration.
//!
//! This module owns storage-specific concerns (root resolution, split
//! resolution, and download/verification). Pure table parsing stays in
//! `crate::catalog`.

pub mod download;
pub mod resolve;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::split::PartitionKind;

/// Dataset tag used in partition file names.
pub const DATASET_TAG: &str = "legs";

/// Campaign tag used in partition file names.
pub const CAMPAIGN_TAG: &str = "all_campaigns_ortho_dr8_only";

/// Directory whose presence marks a host with privileged catalog storage.
pub const PRIVILEGED_PROBE_DIR: &str = "/share/nas2";

/// Catalog root on hosts with privileged storage.
pub const PRIVILEGED_CATALOG_ROOT: &str = "/share/nas2/walml/galaxy-datasets/legs/presplit_catalogs";

/// Catalog root everywhere else (catalogs only, no images).
pub const FALLBACK_CATALOG_ROOT: &str = "/home/walml/datasets/legs/catalogs";

/// Base URL the presplit catalogs are served from (cluster-internal).
pub const CATALOG_BASE_URL: &str = "https://archive.internal/legs/presplit_catalogs";

/// Decides which on-disk root holds the catalog partitions.
///
/// Supplied to the resolver at construction time; the probe-then-fallback
/// strategy is only the default implementation, `Fixed` lets tests point at
/// any directory without the privileged path present.
#[derive(Clone, Debug)]
pub enum StorageRoot {
    /// Always use this directory.
    Fixed(PathBuf),
    /// Use `privileged` when `probe` exists, `fallback` otherwise.
    ProbeThenFallback {
        probe: PathBuf,
        privileged: PathBuf,
        fallback: PathBuf,
    },
}

impl StorageRoot {
    /// The default two-tier lookup for the Legacy Survey catalogs.
    pub fn legs_default() -> Self {
        StorageRoot::ProbeThenFallback {
            probe: PathBuf::from(PRIVILEGED_PROBE_DIR),
            privileged: PathBuf::from(PRIVILEGED_CATALOG_ROOT),
            fallback: PathBuf::from(FALLBACK_CATALOG_ROOT),
        }
    }

    /// A root pinned to `path`.
    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        StorageRoot::Fixed(path.into())
    }

    /// The effective catalog root directory.
    pub fn resolve(&self) -> PathBuf {
        match self {
            StorageRoot::Fixed(path) => path.clone(),
            StorageRoot::ProbeThenFallback {
                probe,
                privileged,
                fallback,
            } => {
                if probe.is_dir() {
                    privileged.clone()
                } else {
                    fallback.clone()
                }
            }
        }
    }
}

/// File name of one presplit partition, by convention
/// `<dataset>_<campaign-tag>_<split>_catalog.parquet`.
pub fn partition_file_name(split_tag: &str) -> String {
    format!("{DATASET_TAG}_{CAMPAIGN_TAG}_{split_tag}_catalog.parquet")
}

/// Remote location of one presplit partition.
pub fn partition_url(split_tag: &str) -> String {
    format!("{CATALOG_BASE_URL}/{}", partition_file_name(split_tag))
}

/// A named, checksummed, immutable catalog partition.
///
/// Produced externally, fetched once, never mutated locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub kind: PartitionKind,
    pub file_name: String,
    pub url: String,
    /// Expected SHA-256 digest of the partition file, lowercase hex.
    pub sha256: String,
}

impl Partition {
    fn declared(kind: PartitionKind, sha256: &str) -> Self {
        Partition {
            kind,
            file_name: partition_file_name(kind.tag()),
            url: partition_url(kind.tag()),
            sha256: sha256.to_string(),
        }
    }

    /// Where this partition lives under a storage root.
    pub fn local_path(&self, root: &Path) -> PathBuf {
        root.join(&self.file_name)
    }
}

/// All presplit partitions of the Legacy Survey catalog, with their expected
/// content digests.
pub fn legs_partitions() -> Vec<Partition> {
    vec![
        Partition::declared(
            PartitionKind::Train,
            "9b2c7e337bd114af013d02f3782473aa51c06318e54c8d1df1b2906ebae2906e",
        ),
        Partition::declared(
            PartitionKind::Test,
            "20919fe512ee8ce4d267790e519fcbf83b7d04ab2c11ddfae8cf2e519feaa2d1",
        ),
        Partition::declared(
            PartitionKind::Unlabelled,
            "fbf287990add34d2249f584325bc9dca7c0e2c1d9eec0a4af8f96b8cfc0b8e44",
        ),
    ]
}

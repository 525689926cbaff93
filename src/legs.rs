//! Prepared end-to-end entry points for the Legacy Survey catalog dataset.

use std::path::Path;

use crate::catalog::{self, CatalogTable};
use crate::dataset::CatalogDataset;
use crate::error::GalcatError;
use crate::schema;
use crate::split::Split;
use crate::store::resolve::SplitResolver;

/// Resolve and assemble `split`, returning the shuffled table plus the
/// all-campaigns label column set.
///
/// `root` is accepted for call-shape compatibility and ignored with a
/// warning; `train` is the legacy boolean convention and always rejected
/// when present.
pub fn setup(
    root: Option<&Path>,
    split: Split,
    download: bool,
    train: Option<bool>,
) -> Result<(CatalogTable, Vec<String>), GalcatError> {
    setup_with(&SplitResolver::legs(), root, split, download, train)
}

/// [`setup`] against an injected resolver.
pub fn setup_with(
    resolver: &SplitResolver,
    root: Option<&Path>,
    split: Split,
    download: bool,
    train: Option<bool>,
) -> Result<(CatalogTable, Vec<String>), GalcatError> {
    let resolution = resolver.resolve(root, split, download, train)?;
    let table = catalog::assemble(&resolution.root, &resolution.partitions, None)?;
    Ok((table, schema::all_campaigns_label_cols()))
}

/// The assembled split wrapped for iteration and indexing.
pub fn dataset(
    root: Option<&Path>,
    split: Split,
    download: bool,
    train: Option<bool>,
) -> Result<CatalogDataset, GalcatError> {
    dataset_with(&SplitResolver::legs(), root, split, download, train)
}

/// [`dataset`] against an injected resolver.
pub fn dataset_with(
    resolver: &SplitResolver,
    root: Option<&Path>,
    split: Split,
    download: bool,
    train: Option<bool>,
) -> Result<CatalogDataset, GalcatError> {
    let (table, label_cols) = setup_with(resolver, root, split, download, train)?;
    CatalogDataset::new(table, label_cols)
}

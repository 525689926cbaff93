//! Split vocabulary: which catalog partitions a caller's request combines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GalcatError;

/// A single presplit catalog segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionKind {
    Train,
    Test,
    Unlabelled,
}

impl PartitionKind {
    /// The tag used in partition file names.
    pub fn tag(&self) -> &'static str {
        match self {
            PartitionKind::Train => "train",
            PartitionKind::Test => "test",
            PartitionKind::Unlabelled => "unlabelled",
        }
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// The caller's request for which partition(s) to combine into one table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Split {
    Train,
    Test,
    /// Both halves of the labelled data (train and test together).
    Labelled,
    Unlabelled,
    /// Train plus unlabelled. Test is deliberately left out: `labelled` has
    /// always meant both labelled halves, while this variant only extends the
    /// training pool.
    TrainPlusUnlabelled,
}

impl Split {
    /// Every accepted split, in keyword order.
    pub const ALL: [Split; 5] = [
        Split::Train,
        Split::Test,
        Split::Labelled,
        Split::Unlabelled,
        Split::TrainPlusUnlabelled,
    ];

    /// The request keyword this split parses from and displays as.
    pub fn keyword(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
            Split::Labelled => "labelled",
            Split::Unlabelled => "unlabelled",
            Split::TrainPlusUnlabelled => "train+unlabelled",
        }
    }

    /// The minimal ordered partition set this split combines.
    pub fn partitions(&self) -> &'static [PartitionKind] {
        match self {
            Split::Train => &[PartitionKind::Train],
            Split::Test => &[PartitionKind::Test],
            Split::Labelled => &[PartitionKind::Train, PartitionKind::Test],
            Split::Unlabelled => &[PartitionKind::Unlabelled],
            Split::TrainPlusUnlabelled => {
                &[PartitionKind::Train, PartitionKind::Unlabelled]
            }
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.keyword())
    }
}

impl FromStr for Split {
    type Err = GalcatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Split::ALL
            .iter()
            .copied()
            .find(|split| split.keyword() == value)
            .ok_or_else(|| {
                GalcatError::invalid_argument(format!(
                    "unknown split '{}' (expected one of: train, test, labelled, unlabelled, train+unlabelled)",
                    value
                ))
            })
    }
}

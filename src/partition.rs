//! Partition key assignment.
//!
//! Each [`Category`] maps 1:1 onto a storage partition, and each partition
//! carries its own independently configured retention policy downstream.
//! The mapping here is the only place in the crate a partition key may be
//! derived; the key strings are load-bearing contract values that must never
//! change silently between versions.
//!
//! Adding a `Category` variant forces a new mapping entry here (the match is
//! exhaustive) and is a breaking contract change to be communicated to the
//! downstream retention configuration.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Category;

/// Stable storage partition identifier.
///
/// The string forms returned by [`as_str`](PartitionKey::as_str) are the
/// object-storage prefixes retention policies are bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionKey {
    /// Requests the firewall let through. Typically short retention.
    Allowed,
    /// Requests the firewall rejected. Typically long retention.
    Blocked,
    /// Records without a recognizable decision, and raw bytes of records
    /// that failed to decode.
    Errors,
}

impl PartitionKey {
    /// The exact partition prefix string.
    ///
    /// ```rust
    /// use fwlog::PartitionKey;
    ///
    /// assert_eq!(PartitionKey::Blocked.as_str(), "blocked");
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            PartitionKey::Allowed => "allowed",
            PartitionKey::Blocked => "blocked",
            PartitionKey::Errors => "errors",
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed, total category-to-partition mapping.
pub const fn assign_key(category: Category) -> PartitionKey {
    match category {
        Category::Allowed => PartitionKey::Allowed,
        Category::Blocked => PartitionKey::Blocked,
        Category::Errored => PartitionKey::Errors,
    }
}

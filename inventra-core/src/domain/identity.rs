//! Component identity records
//!
//! An [`IdentityRecord`] is the unit of output of a scan: one resolved
//! (group, artifact, version) coordinate for one java-style archive,
//! plus the caller-supplied product labels and the location evidence
//! that produced it.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Sentinel used for every field no resolution strategy could fill.
pub const UNKNOWN: &str = "Unknown";

/// Product labels attached verbatim to every record of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLabels {
    pub product_name: String,
    pub product_version: String,
}

impl ProductLabels {
    pub fn new(product_name: impl Into<String>, product_version: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            product_version: product_version.into(),
        }
    }
}

/// Resolved identity of one embedded component.
///
/// `pom_name` is a display name only: it is excluded from equality and
/// hashing, so two records differing only in display name deduplicate
/// to one. `bundles` is the comma-joined list of non-self POM
/// descriptor paths (version substituted for `pom.xml`) when the
/// archive bundles more than one component, empty otherwise.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub product_name: String,
    pub product_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Base name of the file that produced this record.
    pub jar_file_name: String,
    /// Human display name, usually the POM `<name>`.
    pub pom_name: String,
    /// Normalized location, scratch-root-relative when extracted.
    pub path: String,
    pub bundles: String,
}

impl IdentityRecord {
    /// Placeholder record for an archive no strategy could resolve.
    pub fn unknown(labels: &ProductLabels, jar_file_name: &str, path: &str) -> Self {
        Self {
            product_name: labels.product_name.clone(),
            product_version: labels.product_version.clone(),
            group_id: UNKNOWN.to_string(),
            artifact_id: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
            jar_file_name: jar_file_name.to_string(),
            pom_name: UNKNOWN.to_string(),
            path: path.to_string(),
            bundles: String::new(),
        }
    }

    /// A record is acceptable as final output only when its display
    /// name resolved to something real: present and free of `${...}`
    /// template leftovers.
    pub fn is_resolved(&self) -> bool {
        self.pom_name != UNKNOWN && !self.pom_name.contains('$')
    }

    pub fn has_bundles(&self) -> bool {
        !self.bundles.is_empty()
    }
}

/// Manifest line rendering, kept from the original tool:
/// `{product}:{productVersion}/{pomName}/{version}/{jarName}[/{bundles}]`.
impl fmt::Display for IdentityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}/{}/{}/{}",
            self.product_name, self.product_version, self.pom_name, self.version, self.jar_file_name
        )?;
        if !self.bundles.is_empty() {
            write!(f, "/{}", self.bundles)?;
        }
        Ok(())
    }
}

// Equality deliberately skips `pom_name`: display names vary between
// evidence sources while naming the same component.
impl PartialEq for IdentityRecord {
    fn eq(&self, other: &Self) -> bool {
        self.product_name == other.product_name
            && self.product_version == other.product_version
            && self.group_id == other.group_id
            && self.artifact_id == other.artifact_id
            && self.version == other.version
            && self.jar_file_name == other.jar_file_name
            && self.path == other.path
            && self.bundles == other.bundles
    }
}

impl Hash for IdentityRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.product_name.hash(state);
        self.product_version.hash(state);
        self.group_id.hash(state);
        self.artifact_id.hash(state);
        self.version.hash(state);
        self.jar_file_name.hash(state);
        self.path.hash(state);
        self.bundles.hash(state);
    }
}

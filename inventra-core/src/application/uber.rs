//! Uber-bundle resolution
//!
//! An archive with two or more embedded POM descriptors bundles other
//! components. Two passes over the descriptors in archive iteration
//! order: first pick the archive's own ("self") descriptor by the
//! longest artifact-name substring found in the archive file name,
//! then list every remaining descriptor as a bundled sub-component
//! with its resolved version substituted for the trailing `pom.xml`.
//!
//! Self-selection is greedy longest-match with first-seen winning true
//! ties. That can mis-select when one artifact name is a substring of
//! another; the behavior is kept as-is because downstream consumers
//! key on it.

use tracing::debug;

use crate::domain::identity::IdentityRecord;
use crate::infrastructure::jar::{pom_artifact_segment, JarArchive};

use super::resolver::{apply_pom, read_pom};

/// Resolve an uber archive in place. `already_resolved` skips the
/// self-selection pass (an earlier strategy produced a valid primary
/// identity); the bundle-listing pass always runs.
pub(crate) fn resolve_uber(
    archive: &mut JarArchive,
    record: &mut IdentityRecord,
    jar_file_name: &str,
    pom_entries: &[String],
    already_resolved: bool,
) {
    let mut self_entry: Option<&str> = None;

    if !already_resolved {
        let mut best_len = 0usize;
        for entry in pom_entries {
            let Some(artifact_name) = pom_artifact_segment(entry) else {
                continue;
            };
            if !jar_file_name.contains(artifact_name) || artifact_name.len() <= best_len {
                continue;
            }
            best_len = artifact_name.len();
            self_entry = Some(entry.as_str());
            if let Some(descriptor) = read_pom(archive, entry) {
                apply_pom(record, &descriptor);
            }
        }
        debug!(
            jar = jar_file_name,
            self_descriptor = self_entry.unwrap_or("<none>"),
            "uber self-selection finished"
        );
    }

    let mut bundles: Vec<String> = Vec::new();
    for entry in pom_entries {
        if Some(entry.as_str()) == self_entry {
            continue;
        }
        // Per-descriptor parse failures degrade to an empty version
        // instead of aborting the listing.
        let version = read_pom(archive, entry)
            .and_then(|d| d.effective_version().map(str::to_string))
            .unwrap_or_default();
        let base = entry.strip_suffix("pom.xml").unwrap_or(entry);
        bundles.push(format!("{base}{version}"));
    }
    record.bundles = bundles.join(",");
}

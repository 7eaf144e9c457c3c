//! Identity resolution
//!
//! Runs the ordered strategy chain over one opened java-style archive:
//! manifest attributes seed a tentative record, `build.metadata`
//! properties overwrite it when present, and the embedded POM
//! descriptor count picks the structural branch (placeholder, single
//! descriptor, or uber-bundle). Exactly one record always comes out;
//! when nothing resolves it is the all-Unknown placeholder.
//!
//! Each field picker is a pure function over the manifest attributes
//! so the rejection heuristics stay individually testable.

use tracing::{debug, warn};

use crate::domain::identity::{IdentityRecord, ProductLabels, UNKNOWN};
use crate::infrastructure::jar::manifest::ManifestAttributes;
use crate::infrastructure::jar::pom::{self, PomDescriptor};
use crate::infrastructure::jar::JarArchive;

use super::uber;

/// Identity resolver over an opened archive.
pub struct IdentityResolver;

impl IdentityResolver {
    /// Resolve the archive's own identity record. Never fails: the
    /// worst case is the placeholder keyed by the file name.
    pub fn resolve(
        archive: &mut JarArchive,
        labels: &ProductLabels,
        jar_file_name: &str,
        path: &str,
    ) -> IdentityRecord {
        let mut record = IdentityRecord::unknown(labels, jar_file_name, path);
        let mut finished = false;

        if let Some(attrs) = archive.manifest() {
            apply_manifest(&mut record, &attrs);
            finished = record.is_resolved();
        }

        if !finished {
            if let Some(props) = archive.build_metadata() {
                let artifact = props.get("build.artifactId");
                let version = props.get("build.version");
                if let (Some(artifact), Some(version)) = (artifact, version) {
                    if let Some(group) = props.get("build.groupId") {
                        record.group_id = group.clone();
                    }
                    record.artifact_id = artifact.clone();
                    record.version = version.clone();
                    record.pom_name = artifact.clone();
                    finished = record.is_resolved();
                }
            }
        }

        // Structural branch on the embedded descriptor count. The
        // uber branch runs its bundle-listing pass even when an
        // earlier strategy already resolved the primary identity.
        let pom_entries = archive.pom_entry_names();
        match pom_entries.len() {
            0 => {
                if !finished {
                    debug!(jar = jar_file_name, "no descriptor evidence, emitting placeholder");
                    record = IdentityRecord::unknown(labels, jar_file_name, path);
                }
            }
            1 => {
                if !finished {
                    if let Some(descriptor) = read_pom(archive, &pom_entries[0]) {
                        apply_pom(&mut record, &descriptor);
                    }
                }
            }
            _ => {
                uber::resolve_uber(archive, &mut record, jar_file_name, &pom_entries, finished);
            }
        }
        record
    }
}

/// Parse one POM descriptor, degrading to `None` on failure.
pub(crate) fn read_pom(archive: &mut JarArchive, entry: &str) -> Option<PomDescriptor> {
    let bytes = match archive.read_entry(entry) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(entry, error = %e, "failed to read descriptor");
            return None;
        }
    };
    match pom::parse(entry, &bytes) {
        Ok(descriptor) => Some(descriptor),
        Err(e) => {
            warn!(entry, error = %e, "failed to parse descriptor");
            None
        }
    }
}

/// Overwrite the tentative record from one POM descriptor. Only
/// applies when the descriptor carries an artifactId and a resolvable
/// version; the tentative (manifest-derived) groupId survives when the
/// descriptor and its parent both lack one.
pub(crate) fn apply_pom(record: &mut IdentityRecord, descriptor: &PomDescriptor) {
    let Some(artifact) = descriptor.artifact_id.as_deref() else {
        return;
    };
    let Some(version) = descriptor.effective_version() else {
        return;
    };
    if let Some(group) = descriptor.effective_group_id() {
        record.group_id = group.to_string();
    }
    record.artifact_id = artifact.to_string();
    record.version = version.to_string();
    record.pom_name = match descriptor.name.as_deref() {
        Some(name) if !name.contains("${") => name.to_string(),
        _ => artifact.to_string(),
    };
}

fn apply_manifest(record: &mut IdentityRecord, attrs: &ManifestAttributes) {
    record.group_id = manifest_group_id(attrs);
    record.artifact_id = manifest_artifact_id(attrs);
    record.pom_name = manifest_display_name(attrs);
    record.version = manifest_version(attrs);
}

fn manifest_group_id(attrs: &ManifestAttributes) -> String {
    attrs
        .value("Implementation-Vendor-Id")
        .filter(|v| !v.contains(';') && !v.contains('=') && !looks_like_url(v))
        .or_else(|| attrs.value("Bundle-SymbolicName"))
        .or_else(|| attrs.value("Automatic-Module-Name"))
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn manifest_artifact_id(attrs: &ManifestAttributes) -> String {
    attrs
        .value("Implementation-Title")
        .filter(|v| !v.is_empty() && !v.contains('%') && !v.contains(' '))
        .or_else(|| attrs.value("Bundle-Name").filter(|v| !v.contains(' ')))
        .or_else(|| attrs.value("Specification-Title").filter(|v| !v.contains(' ')))
        .or_else(|| attrs.value("Bundle-SymbolicName"))
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn manifest_display_name(attrs: &ManifestAttributes) -> String {
    attrs
        .value("Bundle-Name")
        .filter(|v| !v.contains('%'))
        .or_else(|| attrs.value("Implementation-Title"))
        .or_else(|| attrs.value("Bundle-SymbolicName"))
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn manifest_version(attrs: &ManifestAttributes) -> String {
    attrs
        .value("Implementation-Version")
        .filter(|v| !v.is_empty() && *v != "null")
        .or_else(|| attrs.value("Bundle-Version"))
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn looks_like_url(value: &str) -> bool {
    value.contains("://") || value.starts_with("www.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::jar::manifest;

    fn attrs(raw: &str) -> ManifestAttributes {
        manifest::parse(raw.as_bytes())
    }

    #[test]
    fn group_id_prefers_vendor_id() {
        let a = attrs("Implementation-Vendor-Id: org.apache.camel\nBundle-SymbolicName: camel-core\n");
        assert_eq!(manifest_group_id(&a), "org.apache.camel");
    }

    #[test]
    fn group_id_rejects_urls_and_directives() {
        let a = attrs("Implementation-Vendor-Id: http://example.org\nBundle-SymbolicName: camel-core\n");
        assert_eq!(manifest_group_id(&a), "camel-core");

        let a = attrs("Implementation-Vendor-Id: a;b=c\nAutomatic-Module-Name: org.example.widget\n");
        assert_eq!(manifest_group_id(&a), "org.example.widget");

        let a = attrs("Manifest-Version: 1.0\n");
        assert_eq!(manifest_group_id(&a), UNKNOWN);
    }

    #[test]
    fn artifact_id_rejects_spaces_and_placeholders() {
        let a = attrs("Implementation-Title: Apache Camel\nBundle-Name: camel-core\n");
        assert_eq!(manifest_artifact_id(&a), "camel-core");

        let a = attrs("Implementation-Title: %bundleName\nSpecification-Title: widget\n");
        assert_eq!(manifest_artifact_id(&a), "widget");

        let a = attrs("Implementation-Title: The Widget Library\nSpecification-Title: Widget Spec\nBundle-SymbolicName: org.widget\n");
        assert_eq!(manifest_artifact_id(&a), "org.widget");
    }

    #[test]
    fn display_name_prefers_bundle_name() {
        let a = attrs("Bundle-Name: Camel Core\nImplementation-Title: camel-core\n");
        assert_eq!(manifest_display_name(&a), "Camel Core");

        let a = attrs("Bundle-Name: %project.name\nImplementation-Title: camel-core\n");
        assert_eq!(manifest_display_name(&a), "camel-core");
    }

    #[test]
    fn version_rejects_literal_null() {
        let a = attrs("Implementation-Version: null\nBundle-Version: 3.4.0\n");
        assert_eq!(manifest_version(&a), "3.4.0");

        let a = attrs("Implementation-Version: 31.1-jre\n");
        assert_eq!(manifest_version(&a), "31.1-jre");

        let a = attrs("Manifest-Version: 1.0\n");
        assert_eq!(manifest_version(&a), UNKNOWN);
    }

    #[test]
    fn pom_name_template_falls_back_to_artifact() {
        let mut record = IdentityRecord::unknown(&ProductLabels::default(), "w.jar", "w.jar");
        let descriptor = PomDescriptor {
            group_id: Some("org.example".into()),
            artifact_id: Some("widget".into()),
            version: Some("1.0".into()),
            name: Some("${project.artifactId}".into()),
            ..Default::default()
        };
        apply_pom(&mut record, &descriptor);
        assert_eq!(record.pom_name, "widget");
        assert!(record.is_resolved());
    }

    #[test]
    fn pom_without_artifact_leaves_record_untouched() {
        let mut record = IdentityRecord::unknown(&ProductLabels::default(), "w.jar", "w.jar");
        let descriptor = PomDescriptor {
            group_id: Some("org.example".into()),
            ..Default::default()
        };
        apply_pom(&mut record, &descriptor);
        assert_eq!(record.artifact_id, UNKNOWN);
        assert!(!record.is_resolved());
    }
}

//! Java-style archive access
//!
//! [`JarArchive`] wraps a zip reader with the accessors identity
//! resolution needs: the main manifest attributes, entry listing in
//! archive order, and raw entry bytes for descriptor parsing and
//! nested-archive materialization.

pub mod manifest;
pub mod pom;
pub mod properties;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::application::errors::ScanError;

pub use manifest::ManifestAttributes;
pub use pom::PomDescriptor;

pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";
pub const BUILD_METADATA_ENTRY: &str = "META-INF/build.metadata";

/// An opened java-style archive.
pub struct JarArchive {
    zip: zip::ZipArchive<File>,
    entry_names: Vec<String>,
}

impl JarArchive {
    /// Open an archive for resolution. Corrupt or truncated streams
    /// fail here and degrade to a placeholder record upstream.
    pub fn open(path: &Path) -> Result<Self, ScanError> {
        let file = File::open(path).map_err(|e| ScanError::ArchiveOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| ScanError::ArchiveOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        // Collected by index: `file_names()` iterates a map and loses
        // the archive order the resolver depends on.
        let mut entry_names = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let entry = zip.by_index(index).map_err(|e| ScanError::ArchiveOpen {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            entry_names.push(entry.name().to_string());
        }
        Ok(Self { zip, entry_names })
    }

    /// Entry names in archive iteration order.
    pub fn entry_names(&self) -> &[String] {
        &self.entry_names
    }

    /// Raw bytes of one entry.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, ScanError> {
        let mut entry = self
            .zip
            .by_name(name)
            .map_err(|e| ScanError::DescriptorParse {
                entry: name.to_string(),
                reason: e.to_string(),
            })?;
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| ScanError::DescriptorParse {
                entry: name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }

    /// Main manifest attributes, when the archive carries a manifest.
    pub fn manifest(&mut self) -> Option<ManifestAttributes> {
        if !self.entry_names.iter().any(|n| n == MANIFEST_ENTRY) {
            return None;
        }
        let bytes = self.read_entry(MANIFEST_ENTRY).ok()?;
        Some(manifest::parse(&bytes))
    }

    /// `META-INF/build.metadata` properties, when present.
    pub fn build_metadata(&mut self) -> Option<std::collections::HashMap<String, String>> {
        if !self.entry_names.iter().any(|n| n == BUILD_METADATA_ENTRY) {
            return None;
        }
        let bytes = self.read_entry(BUILD_METADATA_ENTRY).ok()?;
        Some(properties::parse(&bytes))
    }

    /// Entry names matching the canonical Maven descriptor pattern
    /// `META-INF/maven/<group>/<artifact>/pom.xml`, in archive order.
    pub fn pom_entry_names(&self) -> Vec<String> {
        self.entry_names
            .iter()
            .filter(|n| is_pom_entry(n))
            .cloned()
            .collect()
    }
}

/// Canonical POM descriptor path check.
pub fn is_pom_entry(name: &str) -> bool {
    let Some(rest) = name.strip_prefix("META-INF/maven/") else {
        return false;
    };
    let Some(middle) = rest.strip_suffix("/pom.xml") else {
        return false;
    };
    !middle.is_empty()
}

/// The artifact-name path segment of a descriptor: the second-to-last
/// directory component under `META-INF/maven/`.
pub fn pom_artifact_segment(name: &str) -> Option<&str> {
    if !is_pom_entry(name) {
        return None;
    }
    let mut parts = name.split('/');
    // components: META-INF maven <group...> <artifact> pom.xml
    let count = name.split('/').count();
    parts.nth(count - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pom_entry_pattern() {
        assert!(is_pom_entry("META-INF/maven/org.slf4j/slf4j-api/pom.xml"));
        assert!(is_pom_entry("META-INF/maven/g/a/pom.xml"));
        assert!(!is_pom_entry("META-INF/maven/pom.xml"));
        assert!(!is_pom_entry("META-INF/MANIFEST.MF"));
        assert!(!is_pom_entry("maven/org.slf4j/slf4j-api/pom.xml"));
        assert!(!is_pom_entry("META-INF/maven/org.slf4j/slf4j-api/pom.properties"));
    }

    #[test]
    fn artifact_segment_is_second_to_last() {
        assert_eq!(
            pom_artifact_segment("META-INF/maven/org.slf4j/slf4j-api/pom.xml"),
            Some("slf4j-api")
        );
        assert_eq!(
            pom_artifact_segment("META-INF/maven/com.example/deep/nested/pom.xml"),
            Some("nested")
        );
        assert_eq!(pom_artifact_segment("META-INF/MANIFEST.MF"), None);
    }
}

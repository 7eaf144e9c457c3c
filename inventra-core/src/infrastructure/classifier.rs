//! Content classification
//!
//! Classification is extension-first: platform content-type probing is
//! unreliable and most java-archive extensions have no registered MIME
//! type anyway, so a curated extension-to-content-type table is
//! consulted and the bare lowercased extension acts as a surrogate key
//! when no mapping exists. Probing failures never raise; anything
//! unrecognized is a plain file.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use once_cell::sync::Lazy;

use crate::domain::ContentClass;

pub const JAR_ARCHIVE: &str = "application/x-java-archive";
pub const JAR_ARCHIVE_ALT: &str = "application/java-archive";
pub const RAR_ARCHIVE: &str = "application/vnd.rar";
pub const ZIP_ARCHIVE: &str = "application/zip";
pub const GZ_ARCHIVE: &str = "application/gzip";
pub const TAR_ARCHIVE: &str = "application/x-tar";

/// Extension → content-type surrogate table.
static CONTENT_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("jar", JAR_ARCHIVE);
    m.insert("zip", ZIP_ARCHIVE);
    m.insert("tar", TAR_ARCHIVE);
    m.insert("gz", GZ_ARCHIVE);
    m.insert("tgz", GZ_ARCHIVE);
    m.insert("rar", RAR_ARCHIVE);
    m
});

/// Keys counting as a java-style archive. Besides the jar content
/// types this carries the zip-based Java EE containers (war/ear/hpi,
/// the resource-adapter rar, and the adm bundle format) as surrogate
/// extension keys, plus a legacy scripting content type that
/// historically showed up on these inputs.
static JAVA_ARCHIVE_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut s = HashSet::new();
    s.insert(JAR_ARCHIVE);
    s.insert(JAR_ARCHIVE_ALT);
    s.insert(RAR_ARCHIVE);
    s.insert("war");
    s.insert("ear");
    s.insert("hpi");
    s.insert("adm");
    s.insert("text/x-csh");
    s
});

/// Keys counting as a generic compressed container.
static CONTAINER_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut s = HashSet::new();
    s.insert(ZIP_ARCHIVE);
    s.insert(GZ_ARCHIVE);
    s.insert(TAR_ARCHIVE);
    s.insert(RAR_ARCHIVE);
    s
});

/// Lowercased extension of a path, if any.
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Content-type key for a path: the curated mapping when one exists,
/// else the extension itself as a surrogate.
fn content_type_key(path: &Path) -> Option<String> {
    let ext = extension(path)?;
    Some(
        CONTENT_TYPES
            .get(ext.as_str())
            .map(|t| (*t).to_string())
            .unwrap_or(ext),
    )
}

/// Content classifier over the curated membership sets.
#[derive(Debug, Clone, Default)]
pub struct ContentClassifier {
    exclude_extensions: Vec<String>,
}

impl ContentClassifier {
    pub fn new(exclude_extensions: Vec<String>) -> Self {
        Self { exclude_extensions }
    }

    /// Classify a path. Never errors: probe failures and unknown
    /// types default to [`ContentClass::PlainFile`].
    pub fn classify(&self, path: &Path) -> ContentClass {
        if path.is_dir() {
            return ContentClass::Directory;
        }
        if !self.is_scan_target(path) {
            return ContentClass::PlainFile;
        }
        let Some(key) = content_type_key(path) else {
            return ContentClass::PlainFile;
        };
        // Java-archive membership wins over the container set: .rar
        // maps into both and is treated as a resource adapter first.
        if JAVA_ARCHIVE_KEYS.contains(key.as_str()) {
            return ContentClass::JavaArchive;
        }
        if CONTAINER_KEYS.contains(key.as_str()) {
            return ContentClass::GenericContainer;
        }
        ContentClass::PlainFile
    }

    /// Extension blacklist check: source files and other known
    /// non-targets are never classified as archives.
    fn is_scan_target(&self, path: &Path) -> bool {
        match extension(path) {
            Some(ext) => !self.exclude_extensions.iter().any(|e| e == &ext),
            None => true,
        }
    }
}

/// Entry names inside a java-style archive that should be materialized
/// and recursed into.
pub fn is_nested_archive_name(name: &str) -> bool {
    const NESTED_SUFFIXES: [&str; 9] = [
        ".jar", ".war", ".ear", ".rar", ".hpi", ".zip", ".adm", ".tar", ".tar.gz",
    ];
    // Trailing slash marks a directory entry (an exploded archive),
    // which has no bytes to materialize.
    if name.ends_with('/') {
        return false;
    }
    let lower = name.to_ascii_lowercase();
    NESTED_SUFFIXES.iter().any(|s| lower.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn classifier() -> ContentClassifier {
        ContentClassifier::new(vec!["java".to_string()])
    }

    #[test]
    fn java_archive_extensions() {
        let c = classifier();
        for name in [
            "guava-31.1.jar",
            "app.war",
            "enterprise.EAR",
            "adapter.rar",
            "plugin.hpi",
            "bundle.adm",
        ] {
            assert_eq!(
                c.classify(&PathBuf::from(name)),
                ContentClass::JavaArchive,
                "{name}"
            );
        }
    }

    #[test]
    fn generic_container_extensions() {
        let c = classifier();
        for name in ["dist.zip", "dist.tar", "dist.tar.gz", "dist.tgz"] {
            assert_eq!(
                c.classify(&PathBuf::from(name)),
                ContentClass::GenericContainer,
                "{name}"
            );
        }
    }

    #[test]
    fn plain_files_and_blacklist() {
        let c = classifier();
        assert_eq!(c.classify(&PathBuf::from("README.txt")), ContentClass::PlainFile);
        assert_eq!(c.classify(&PathBuf::from("noext")), ContentClass::PlainFile);
        assert_eq!(c.classify(&PathBuf::from("Main.java")), ContentClass::PlainFile);
    }

    #[test]
    fn nested_archive_names() {
        assert!(is_nested_archive_name("lib/slf4j-api-1.7.30.jar"));
        assert!(is_nested_archive_name("nested/dist.tar.gz"));
        assert!(is_nested_archive_name("UPPER.ZIP"));
        assert!(!is_nested_archive_name("META-INF/MANIFEST.MF"));
        assert!(!is_nested_archive_name("docs/readme.txt"));
        // Directory entries of exploded archives are not materializable.
        assert!(!is_nested_archive_name("WEB-INF/lib/exploded.jar/"));
    }
}

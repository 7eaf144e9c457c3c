//! Jar manifest (`META-INF/MANIFEST.MF`) parsing
//!
//! Only the main attributes block matters for identity resolution, so
//! parsing stops at the first blank line (per-entry sections follow
//! it). Continuation lines start with a single space and append to the
//! previous value.

use std::collections::HashMap;

/// Main attributes of a jar manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestAttributes {
    attributes: HashMap<String, String>,
}

impl ManifestAttributes {
    pub fn value(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Parse the main attributes block of a manifest.
pub fn parse(bytes: &[u8]) -> ManifestAttributes {
    let text = String::from_utf8_lossy(bytes);
    let mut attributes: HashMap<String, String> = HashMap::new();
    let mut current_key: Option<String> = None;

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            // End of the main attributes block.
            break;
        }
        if let Some(continuation) = line.strip_prefix(' ') {
            if let Some(key) = &current_key {
                if let Some(value) = attributes.get_mut(key) {
                    value.push_str(continuation);
                }
            }
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_string();
            attributes.insert(key.clone(), value.trim_start().to_string());
            current_key = Some(key);
        }
    }
    ManifestAttributes { attributes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_main_attributes() {
        let raw = b"Manifest-Version: 1.0\r\nImplementation-Title: guava\r\nImplementation-Version: 31.1-jre\r\n\r\nName: com/google/\r\nSealed: true\r\n";
        let attrs = parse(raw);
        assert_eq!(attrs.value("Implementation-Title"), Some("guava"));
        assert_eq!(attrs.value("Implementation-Version"), Some("31.1-jre"));
        // Per-entry sections after the blank line are ignored.
        assert_eq!(attrs.value("Sealed"), None);
    }

    #[test]
    fn continuation_lines_append() {
        let raw = b"Bundle-SymbolicName: org.apache.camel.ca\n mel-core\nBundle-Version: 3.4.0\n";
        let attrs = parse(raw);
        assert_eq!(
            attrs.value("Bundle-SymbolicName"),
            Some("org.apache.camel.camel-core")
        );
        assert_eq!(attrs.value("Bundle-Version"), Some("3.4.0"));
    }

    #[test]
    fn empty_manifest() {
        let attrs = parse(b"");
        assert!(attrs.is_empty());
    }
}

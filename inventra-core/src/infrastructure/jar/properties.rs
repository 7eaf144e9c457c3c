//! Java properties parsing for `META-INF/build.metadata`
//!
//! Line-oriented subset: `key=value` or `key: value`, `#`/`!` comment
//! lines skipped. Multi-line escapes do not occur in build metadata.

use std::collections::HashMap;

pub fn parse(bytes: &[u8]) -> HashMap<String, String> {
    let text = String::from_utf8_lossy(bytes);
    let mut properties = HashMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let split = line
            .split_once('=')
            .or_else(|| line.split_once(':'));
        if let Some((key, value)) = split {
            properties.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    properties
}

//! Archive fixture builders shared by the integration tests
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Write a zip-format archive (jar, war, zip, ...) with the given
/// entries. Entry names ending in `/` become directories.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("failed to create fixture archive");
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(name.trim_end_matches('/'), options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap();
}

/// Write a gzip-compressed tar archive with the given entries.
pub fn write_tar_gz(path: &Path, entries: &[(&str, &[u8])]) {
    let gz = GzEncoder::new(
        File::create(path).expect("failed to create fixture archive"),
        Compression::default(),
    );
    let mut tar = tar::Builder::new(gz);
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        tar.append_data(&mut header, name, *data).unwrap();
    }
    tar.into_inner().unwrap().finish().unwrap();
}

/// Minimal POM descriptor XML.
pub fn pom_xml(
    group_id: Option<&str>,
    artifact_id: &str,
    version: Option<&str>,
    name: Option<&str>,
    parent: Option<(&str, &str)>,
) -> Vec<u8> {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n");
    if let Some((parent_group, parent_version)) = parent {
        xml.push_str(&format!(
            "  <parent>\n    <groupId>{parent_group}</groupId>\n    <artifactId>parent</artifactId>\n    <version>{parent_version}</version>\n  </parent>\n"
        ));
    }
    if let Some(group_id) = group_id {
        xml.push_str(&format!("  <groupId>{group_id}</groupId>\n"));
    }
    xml.push_str(&format!("  <artifactId>{artifact_id}</artifactId>\n"));
    if let Some(version) = version {
        xml.push_str(&format!("  <version>{version}</version>\n"));
    }
    if let Some(name) = name {
        xml.push_str(&format!("  <name>{name}</name>\n"));
    }
    xml.push_str("</project>\n");
    xml.into_bytes()
}

/// Canonical descriptor path for a (group, artifact) pair.
pub fn pom_entry(group_id: &str, artifact_id: &str) -> String {
    format!("META-INF/maven/{group_id}/{artifact_id}/pom.xml")
}

/// MANIFEST.MF bytes from main-attribute pairs.
pub fn manifest(attributes: &[(&str, &str)]) -> Vec<u8> {
    let mut out = String::from("Manifest-Version: 1.0\r\n");
    for (key, value) in attributes {
        out.push_str(&format!("{key}: {value}\r\n"));
    }
    out.push_str("\r\n");
    out.into_bytes()
}

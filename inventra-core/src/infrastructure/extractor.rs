//! Archive extraction
//!
//! Decompresses one container into a scratch directory and returns the
//! set of regular files written. Dispatch follows the filename suffix:
//! `.tar` is a tar stream, `.tar.gz`/`.tgz` gzip-then-tar, everything
//! else (zip, jar, adm, ...) a zip stream. The materialized layout is
//! always `{scratch}/{container_file_name}/{entry_name}`.
//!
//! One unreadable entry never aborts the rest of the archive: entry
//! failures are logged at warn and skipped, and whatever partial set
//! was extracted is returned.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, warn};

/// Archive extractor writing into an invocation-scoped scratch root.
#[derive(Debug, Clone, Default)]
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract `archive` under `scratch`, returning every regular file
    /// written. Whole-archive failures (corrupt header, truncated
    /// stream) are the caller's to handle; they still receive the
    /// partial set extracted before the failure.
    pub fn extract(&self, archive: &Path, scratch: &Path) -> HashSet<PathBuf> {
        let file_name = base_name(archive);
        let lower = file_name.to_ascii_lowercase();

        let extracted = if lower.ends_with(".tar") {
            self.extract_tar(archive, scratch, &file_name)
        } else if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            self.extract_tar_gz(archive, scratch, &file_name)
        } else {
            self.extract_zip(archive, scratch, &file_name)
        };
        debug!(
            archive = %archive.display(),
            entries = extracted.len(),
            "extraction finished"
        );
        extracted
    }

    fn extract_zip(&self, archive: &Path, scratch: &Path, file_name: &str) -> HashSet<PathBuf> {
        let mut extracted = HashSet::new();
        let file = match File::open(archive) {
            Ok(f) => f,
            Err(e) => {
                warn!(archive = %archive.display(), error = %e, "failed to open container");
                return extracted;
            }
        };
        let mut zip = match zip::ZipArchive::new(file) {
            Ok(z) => z,
            Err(e) => {
                warn!(archive = %archive.display(), error = %e, "failed to read zip container");
                return extracted;
            }
        };

        for index in 0..zip.len() {
            let mut entry = match zip.by_index(index) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(archive = %archive.display(), index, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let Some(dest) = entry_destination(scratch, file_name, entry.name()) else {
                warn!(archive = %archive.display(), entry = entry.name(), "skipping entry escaping the scratch root");
                continue;
            };
            if entry.is_dir() {
                if let Err(e) = fs::create_dir_all(&dest) {
                    warn!(dest = %dest.display(), error = %e, "failed to create directory");
                }
                continue;
            }
            match write_entry(&mut entry, &dest) {
                Ok(()) => {
                    extracted.insert(dest);
                }
                Err(e) => {
                    warn!(dest = %dest.display(), error = %e, "skipping entry");
                }
            }
        }
        extracted
    }

    fn extract_tar(&self, archive: &Path, scratch: &Path, file_name: &str) -> HashSet<PathBuf> {
        match File::open(archive) {
            Ok(file) => self.extract_tar_entries(
                tar::Archive::new(BufReader::new(file)),
                archive,
                scratch,
                file_name,
            ),
            Err(e) => {
                warn!(archive = %archive.display(), error = %e, "failed to open container");
                HashSet::new()
            }
        }
    }

    fn extract_tar_gz(&self, archive: &Path, scratch: &Path, file_name: &str) -> HashSet<PathBuf> {
        match File::open(archive) {
            Ok(file) => self.extract_tar_entries(
                tar::Archive::new(GzDecoder::new(BufReader::new(file))),
                archive,
                scratch,
                file_name,
            ),
            Err(e) => {
                warn!(archive = %archive.display(), error = %e, "failed to open container");
                HashSet::new()
            }
        }
    }

    fn extract_tar_entries<R: Read>(
        &self,
        mut tar: tar::Archive<R>,
        archive: &Path,
        scratch: &Path,
        file_name: &str,
    ) -> HashSet<PathBuf> {
        let mut extracted = HashSet::new();
        let entries = match tar.entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(archive = %archive.display(), error = %e, "failed to read tar container");
                return extracted;
            }
        };
        for entry in entries {
            let mut entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(archive = %archive.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let entry_name = match entry.path() {
                Ok(p) => p.to_string_lossy().into_owned(),
                Err(e) => {
                    warn!(archive = %archive.display(), error = %e, "skipping entry with bad path");
                    continue;
                }
            };
            let Some(dest) = entry_destination(scratch, file_name, &entry_name) else {
                warn!(archive = %archive.display(), entry = %entry_name, "skipping entry escaping the scratch root");
                continue;
            };
            if entry.header().entry_type().is_dir() {
                if let Err(e) = fs::create_dir_all(&dest) {
                    warn!(dest = %dest.display(), error = %e, "failed to create directory");
                }
                continue;
            }
            if !entry.header().entry_type().is_file() {
                continue;
            }
            match write_entry(&mut entry, &dest) {
                Ok(()) => {
                    extracted.insert(dest);
                }
                Err(e) => {
                    warn!(dest = %dest.display(), error = %e, "skipping entry");
                }
            }
        }
        extracted
    }
}

/// `{scratch}/{container_file_name}/{entry_name}` naming convention,
/// shared with nested-archive materialization. `None` when the entry
/// name is absolute or climbs out of the container directory.
pub fn entry_destination(
    scratch: &Path,
    container_file_name: &str,
    entry_name: &str,
) -> Option<PathBuf> {
    let entry = Path::new(entry_name);
    let mut depth = 0i64;
    for component in entry.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(scratch.join(container_file_name).join(entry))
}

/// Base name of a path, lossy on non-UTF8.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn write_entry<R: Read>(entry: &mut R, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = File::create(dest)?;
    io::copy(entry, &mut out)?;
    Ok(())
}

//! Recursive traversal use case
//!
//! Walks one input path (file or directory), recursively entering
//! every discovered container and java-style archive, and returns the
//! merged set of identity records. Each recursion level owns its local
//! result set and the caller merges it, so no collection is shared
//! across levels; sibling branches fan out as tasks joined through a
//! `JoinSet` with a semaphore bounding concurrent archive work.
//!
//! The ephemeral working root is a process-unique temp directory per
//! invocation; removal on completion is best-effort. There is no
//! guard against pathologically deep nesting or decompression bombs.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::config::ScanConfig;
use crate::domain::{ContentClass, IdentityRecord, ProductLabels};
use crate::infrastructure::classifier::{is_nested_archive_name, ContentClassifier};
use crate::infrastructure::extractor::{base_name, entry_destination, ArchiveExtractor};
use crate::infrastructure::jar::JarArchive;

use super::errors::ScanError;
use super::resolver::IdentityResolver;

const VCS_DIRS: [&str; 3] = [".git", ".svn", ".hg"];

/// Use case scanning one input tree for embedded components.
pub struct ScanArchiveUseCase {
    config: ScanConfig,
}

/// Per-invocation state shared by every recursion level.
struct ScanContext {
    labels: ProductLabels,
    classifier: ContentClassifier,
    extractor: ArchiveExtractor,
    scratch: PathBuf,
    semaphore: Semaphore,
}

impl ScanArchiveUseCase {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan `input` and return the deduplicated record set.
    ///
    /// Only a missing or unreadable input aborts; every failure below
    /// the top level degrades locally (placeholder record or skipped
    /// entry) and the scan runs to completion.
    #[instrument(skip(self), fields(input = %input.display()))]
    pub async fn execute(&self, input: &Path) -> Result<HashSet<IdentityRecord>, ScanError> {
        self.config.validate()?;
        if !input.exists() {
            return Err(ScanError::InputNotFound(input.to_path_buf()));
        }
        let input = input
            .canonicalize()
            .map_err(|_| ScanError::InputNotFound(input.to_path_buf()))?;

        // Process-unique working root so concurrent invocations never
        // collide on scratch paths. Removed on drop, best-effort.
        let scratch = match &self.config.scratch_root {
            Some(root) => tempfile::Builder::new().prefix("inventra-").tempdir_in(root)?,
            None => tempfile::Builder::new().prefix("inventra-").tempdir()?,
        };

        let ctx = Arc::new(ScanContext {
            labels: ProductLabels::new(
                self.config.product_name.clone(),
                self.config.product_version.clone(),
            ),
            classifier: ContentClassifier::new(self.config.exclude_extensions.clone()),
            extractor: ArchiveExtractor::new(),
            scratch: scratch.path().to_path_buf(),
            semaphore: Semaphore::new(self.config.max_concurrency),
        });

        info!("starting component scan");
        let records = scan_path(ctx, input).await;
        info!(record_count = records.len(), "component scan completed");
        Ok(records)
    }
}

impl Default for ScanArchiveUseCase {
    fn default() -> Self {
        Self::new()
    }
}

/// One step of the traversal state machine. Boxed because the engine
/// re-invokes itself on nested archives at arbitrary depth.
fn scan_path(ctx: Arc<ScanContext>, path: PathBuf) -> BoxFuture<'static, HashSet<IdentityRecord>> {
    async move {
        match ctx.classifier.classify(&path) {
            ContentClass::Directory => scan_directory(ctx, path).await,
            ContentClass::GenericContainer => expand_container(ctx, path).await,
            ContentClass::JavaArchive => resolve_archive(ctx, path).await,
            ContentClass::PlainFile => HashSet::new(),
        }
    }
    .boxed()
}

/// Directory branch: every regular file beneath the directory is a
/// sibling scan, version-control metadata excluded.
async fn scan_directory(ctx: Arc<ScanContext>, path: PathBuf) -> HashSet<IdentityRecord> {
    let files: Vec<PathBuf> = walkdir::WalkDir::new(&path)
        .into_iter()
        .filter_entry(|e| {
            e.file_name()
                .to_str()
                .map(|name| !VCS_DIRS.contains(&name))
                .unwrap_or(true)
        })
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(entry.into_path()),
            Ok(_) => None,
            Err(e) => {
                warn!(directory = %path.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .collect();
    debug!(directory = %path.display(), file_count = files.len(), "scanning directory");
    fan_out(ctx, files).await
}

/// Container branch: extract, then scan every extracted file. The
/// container itself never contributes a record.
async fn expand_container(ctx: Arc<ScanContext>, path: PathBuf) -> HashSet<IdentityRecord> {
    let extracted = {
        let _permit = ctx.semaphore.acquire().await.ok();
        ctx.extractor.extract(&path, &ctx.scratch)
    };
    fan_out(ctx, extracted.into_iter().collect()).await
}

/// Java-archive branch: resolve this level's own identity, then
/// materialize and recurse into any nested-archive-looking entries.
async fn resolve_archive(ctx: Arc<ScanContext>, path: PathBuf) -> HashSet<IdentityRecord> {
    let jar_file_name = base_name(&path);
    let display = display_path(&ctx, &path);

    let mut records = HashSet::new();
    let mut nested: Vec<PathBuf> = Vec::new();
    {
        let _permit = ctx.semaphore.acquire().await.ok();
        match JarArchive::open(&path) {
            Ok(mut archive) => {
                let record =
                    IdentityResolver::resolve(&mut archive, &ctx.labels, &jar_file_name, &display);
                records.insert(record);

                let nested_names: Vec<String> = archive
                    .entry_names()
                    .iter()
                    .filter(|n| is_nested_archive_name(n))
                    .cloned()
                    .collect();
                for name in nested_names {
                    let Some(dest) = entry_destination(&ctx.scratch, &jar_file_name, &name)
                    else {
                        warn!(entry = %name, "skipping entry escaping the scratch root");
                        continue;
                    };
                    match archive.read_entry(&name) {
                        Ok(bytes) => {
                            match materialize(&dest, &bytes) {
                                Ok(()) => nested.push(dest),
                                Err(e) => {
                                    warn!(entry = %name, error = %e, "failed to materialize nested archive");
                                }
                            }
                        }
                        Err(e) => {
                            warn!(entry = %name, error = %e, "failed to read nested archive");
                        }
                    }
                }
            }
            Err(e) => {
                // Corrupt archive: placeholder record, siblings and
                // ancestors continue untouched.
                warn!(archive = %path.display(), error = %e, "failed to open java archive");
                records.insert(IdentityRecord::unknown(&ctx.labels, &jar_file_name, &display));
            }
        }
    }

    records.extend(fan_out(ctx, nested).await);
    records
}

/// Fan out sibling scans and merge their locally-owned result sets.
async fn fan_out(ctx: Arc<ScanContext>, paths: Vec<PathBuf>) -> HashSet<IdentityRecord> {
    let mut join_set: JoinSet<HashSet<IdentityRecord>> = JoinSet::new();
    for path in paths {
        let ctx = Arc::clone(&ctx);
        join_set.spawn(async move { scan_path(ctx, path).await });
    }

    let mut merged = HashSet::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(records) => merged.extend(records),
            Err(e) => warn!(error = %e, "scan task failed"),
        }
    }
    merged
}

/// Normalized record location: scratch-root-relative for extracted
/// files so two scans of the same input compare equal regardless of
/// the scratch token.
fn display_path(ctx: &ScanContext, path: &Path) -> String {
    path.strip_prefix(&ctx.scratch)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn materialize(dest: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest, bytes)
}

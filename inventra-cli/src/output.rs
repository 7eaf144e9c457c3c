//! Result rendering
//!
//! The engine returns an unordered record set; output sorts it by
//! location for stable diffs and renders one line per record.

use inventra_core::IdentityRecord;

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `product:version/name/version/jar` manifest lines
    Text,
    /// `pkg:mvn/...` package URLs
    Purl,
    /// JSON array of records
    Json,
}

/// Canonical package-URL rendering:
/// `pkg:mvn/{groupId}/{artifactId}@{version}/{jarFileName}[/{bundles}]`.
pub fn render_purl(record: &IdentityRecord) -> String {
    let mut line = format!(
        "pkg:mvn/{}/{}@{}/{}",
        record.group_id, record.artifact_id, record.version, record.jar_file_name
    );
    if record.has_bundles() {
        line.push('/');
        line.push_str(&record.bundles);
    }
    line
}

/// Render the whole record set in the chosen format.
pub fn render(records: &[IdentityRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(records
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Purl => Ok(records
            .iter()
            .map(render_purl)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
    }
}

/// Sort records by location, then artifact, for stable output.
pub fn sorted(records: impl IntoIterator<Item = IdentityRecord>) -> Vec<IdentityRecord> {
    let mut records: Vec<_> = records.into_iter().collect();
    records.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| a.artifact_id.cmp(&b.artifact_id))
            .then_with(|| a.version.cmp(&b.version))
    });
    records
}

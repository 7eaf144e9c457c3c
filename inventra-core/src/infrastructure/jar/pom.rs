//! Maven POM descriptor parsing
//!
//! Extracts only the coordinate-bearing elements from a
//! `META-INF/maven/<group>/<artifact>/pom.xml` descriptor: the
//! project-level groupId/artifactId/version/name and the parent
//! block's groupId/version. Everything else (dependencies, build
//! sections) is skipped by tracking element depth, so a dependency's
//! `<groupId>` never leaks into the project coordinate.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::errors::ScanError;

/// Coordinate fields of one POM descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomDescriptor {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub parent_group_id: Option<String>,
    pub parent_version: Option<String>,
}

impl PomDescriptor {
    /// Own version, else the parent's.
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or(self.parent_version.as_deref())
    }

    /// Own groupId, else the parent's.
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or(self.parent_group_id.as_deref())
    }
}

/// Parse a POM descriptor from raw bytes.
pub fn parse(entry_name: &str, bytes: &[u8]) -> Result<PomDescriptor, ScanError> {
    let mut reader = Reader::from_reader(bytes);

    let mut descriptor = PomDescriptor::default();
    let mut stack: Vec<String> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                stack.push(tag);
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(t)) => {
                let field = match field_for_path(&stack) {
                    Some(field) => field,
                    None => continue,
                };
                let text = reader
                    .decoder()
                    .decode(t.as_ref())
                    .unwrap_or_default()
                    .trim()
                    .to_string();
                if text.is_empty() {
                    continue;
                }
                match field {
                    PomField::GroupId => descriptor.group_id = Some(text),
                    PomField::ArtifactId => descriptor.artifact_id = Some(text),
                    PomField::Version => descriptor.version = Some(text),
                    PomField::Name => descriptor.name = Some(text),
                    PomField::ParentGroupId => descriptor.parent_group_id = Some(text),
                    PomField::ParentVersion => descriptor.parent_version = Some(text),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ScanError::DescriptorParse {
                    entry: entry_name.to_string(),
                    reason: e.to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(descriptor)
}

enum PomField {
    GroupId,
    ArtifactId,
    Version,
    Name,
    ParentGroupId,
    ParentVersion,
}

/// Map an element path to a coordinate field. Only the project root
/// and its `<parent>` block participate.
fn field_for_path(stack: &[String]) -> Option<PomField> {
    match stack {
        [project, tag] if project == "project" => match tag.as_str() {
            "groupId" => Some(PomField::GroupId),
            "artifactId" => Some(PomField::ArtifactId),
            "version" => Some(PomField::Version),
            "name" => Some(PomField::Name),
            _ => None,
        },
        [project, parent, tag] if project == "project" && parent == "parent" => {
            match tag.as_str() {
                "groupId" => Some(PomField::ParentGroupId),
                "version" => Some(PomField::ParentVersion),
                _ => None,
            }
        }
        _ => None,
    }
}

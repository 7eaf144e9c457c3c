//! Input classification value object

use serde::{Deserialize, Serialize};

/// How the traversal engine treats one filesystem path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentClass {
    /// Directory: fan out over every regular file beneath it.
    Directory,
    /// zip/tar/tar.gz/rar container: extract, then fan out.
    GenericContainer,
    /// jar/war/ear/rar/hpi/adm: resolve an identity of its own.
    JavaArchive,
    /// Anything else: contributes nothing.
    PlainFile,
}

impl std::fmt::Display for ContentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::GenericContainer => write!(f, "generic-container"),
            Self::JavaArchive => write!(f, "java-archive"),
            Self::PlainFile => write!(f, "plain-file"),
        }
    }
}

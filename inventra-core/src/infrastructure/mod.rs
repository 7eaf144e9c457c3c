//! Infrastructure: classification, extraction, archive access

pub mod classifier;
pub mod extractor;
pub mod jar;

pub use classifier::ContentClassifier;
pub use extractor::ArchiveExtractor;
pub use jar::JarArchive;

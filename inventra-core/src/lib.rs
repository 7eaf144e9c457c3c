//! Inventra Core - Embedded component inventory for nested archives
//!
//! This crate answers: "what third-party artifacts, at what versions,
//! are bundled inside this deliverable, at any nesting depth?" It
//! recursively descends directories, generic containers (zip, tar,
//! tar.gz) and java-style archives (jar, war, ear, rar, hpi, adm),
//! resolving each discovered component to a canonical
//! (groupId, artifactId, version) identity.
//!
//! # Resolution evidence, in priority order
//!
//! 1. Jar manifest attributes (`Implementation-*`, `Bundle-*`)
//! 2. `META-INF/build.metadata` build properties
//! 3. Embedded Maven POM descriptors, including multi-descriptor
//!    "uber" archives with bundled sub-components
//!
//! Every java-style archive yields exactly one record; archives with
//! no resolvable evidence yield an all-"Unknown" placeholder instead
//! of being dropped.
//!
//! # Usage
//!
//! ```rust,ignore
//! use inventra_core::{ScanArchiveUseCase, ScanConfig};
//!
//! let use_case = ScanArchiveUseCase::with_config(ScanConfig::default());
//! let records = use_case.execute(path).await?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! inventra-core/
//! ├── domain/          # IdentityRecord, ContentClass
//! ├── application/     # traversal use case, resolver strategies
//! ├── infrastructure/  # classifier, extractor, jar access
//! └── config/          # ScanConfig
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{IdentityResolver, ScanArchiveUseCase, ScanError};
pub use config::{ConfigError, ScanConfig};
pub use domain::{ContentClass, IdentityRecord, ProductLabels, UNKNOWN};

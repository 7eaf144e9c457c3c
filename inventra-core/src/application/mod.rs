//! Application layer: the traversal use case and identity resolution

pub mod errors;
pub mod resolver;
pub mod uber;
pub mod use_cases;

pub use errors::ScanError;
pub use resolver::IdentityResolver;
pub use use_cases::ScanArchiveUseCase;

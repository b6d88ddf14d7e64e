// Repository module structure
pub mod errors;
mod alerts;
mod contacts;
mod in_memory;
mod vitals;

// Re-export commonly used types
pub use alerts::{AlertRepository, AlertRepositoryTrait};
pub use contacts::{ContactDirectory, ContactDirectoryTrait};
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use vitals::{VitalsRepository, VitalsRepositoryTrait};

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use alerts::tests as alert_tests;
#[cfg(any(test, feature = "mock"))]
pub use contacts::tests as contact_tests;
#[cfg(any(test, feature = "mock"))]
pub use vitals::tests as vitals_tests;

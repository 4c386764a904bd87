//! Idempotency key generation

use uuid::Uuid;

/// Produces a fresh request identifier per call
///
/// The provider deduplicates retried writes by this value, so every call
/// must return a value never returned before.
pub trait GuidGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random (v4) UUID generator
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl GuidGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

//! Identifier generator port

/// Port producing client-side unique identifiers
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

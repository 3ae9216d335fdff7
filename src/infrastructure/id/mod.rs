//! Identifier generator adapters

use uuid::Uuid;

use crate::application::ports::IdGenerator;

/// Random v4 UUIDs in simple (unhyphenated) form
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

use uuid::Uuid;

use crate::core::traits::id_generator::IdGenerator;

/// Random (v4) UUIDs in canonical hyphenated lowercase form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

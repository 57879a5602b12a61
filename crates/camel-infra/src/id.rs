use uuid::Uuid;

use camel_domain::provider::IdGenerator;

/// Random (v4) UUID entry identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

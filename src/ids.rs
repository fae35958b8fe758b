/// Source of fresh film ids.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

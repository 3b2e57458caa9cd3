/// Source of globally unique identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

pub mod clock;
pub mod ids;
pub mod jsonl;
pub mod memory;

pub mod memory_session;

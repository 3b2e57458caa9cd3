pub mod jsonl_session;

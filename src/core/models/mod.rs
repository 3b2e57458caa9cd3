pub mod audit_log;
pub mod audit_log_dto;
pub mod criteria;
pub mod paging;

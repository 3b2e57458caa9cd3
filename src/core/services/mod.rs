pub mod audit_log_store;
pub mod criteria_query_builder;
pub mod paginated_lists;

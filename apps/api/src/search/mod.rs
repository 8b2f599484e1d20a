pub mod dedup;
pub mod handlers;
pub mod query;
pub mod semantic;

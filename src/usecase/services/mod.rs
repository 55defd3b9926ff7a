pub mod edit_service;
pub mod ingest_service;
pub mod query_service;

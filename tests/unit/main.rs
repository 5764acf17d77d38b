// Unit tests across module boundaries
// Event JSON ingestion and timezone-aware day expansion

mod event_json_tests;
mod expansion_tests;

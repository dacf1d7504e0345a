/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Plan records and validated inputs
pub mod model;
/// Reminder evaluation, composition and dispatch
pub mod reminder;
/// Repositories
pub mod repo;
/// Daily background trigger
pub mod scheduler;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;

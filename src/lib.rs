// Declare all modules as public so they can be used by embedding shells and tests.
pub mod app;
pub mod config;
pub mod core;

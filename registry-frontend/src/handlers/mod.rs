pub mod app;
pub mod artifact;
pub mod auth;
pub mod dashboard;
pub mod metrics;
pub mod settings;

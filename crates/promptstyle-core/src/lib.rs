pub mod analysis;
pub mod config;
pub mod engine;
pub mod errors;
pub mod features_api;
pub mod fingerprint;
pub mod model;
pub mod prompts;
pub mod providers;
pub mod record;
pub mod report;

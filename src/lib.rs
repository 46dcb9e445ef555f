pub mod cli;
pub mod config;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod models;
pub mod oracle;
pub mod services;
pub mod store;

pub use config::EngineConfig;
pub use errors::{Error, Result};
pub use events::Event;
pub use services::{StepDriver, StepOutcome};

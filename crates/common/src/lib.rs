//! Connection settings for the external services this system integrates with

pub mod config;
pub mod env;
pub mod error;

pub use config::{
    integrations, Integration, IntegrationConfig, IntegrationStatus, IntegrationsConfig,
};
pub use env::{EnvSource, ProcessEnv};
pub use error::{Error, Result};

//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use minuta_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // Ensure the staging directory exists before the first upload arrives
    tokio::fs::create_dir_all(config.upload_dir())
        .await
        .with_context(|| format!("Failed to create upload directory {}", config.upload_dir()))?;

    tracing::info!("Configuration loaded and validated successfully");

    // Initialize provider clients and application state
    let state = services::initialize_services(&config)?;

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

//! Core library for the vigil operation tracker.
//!
//! This crate manages operation plans for a municipal guard unit: the plan
//! data model and its lifecycle rules, a durable per-device cache, a shared
//! remote store and the controller that keeps them in sync.
//!
//! # Layers
//!
//! - **Plan store** ([`models`], [`params`], [`store`], [`photo`]): entity
//!   shapes, boundary validation and pure transitions
//! - **Persistence** ([`persistence`], [`db`]): the [`persistence::LocalCache`]
//!   and [`persistence::RemoteStore`] seams with SQLite and in-memory backends
//! - **Sync controller** ([`sync`]): the authoritative in-memory list,
//!   optimistic mutations and remote propagation
//! - **Presentation helpers** ([`display`], [`export`]): markdown rendering,
//!   printable documents and JSON backups
//!
//! # Quick Start
//!
//! ```rust
//! use vigil_core::{params::{CreatePlan, SetStatus}, SyncControllerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = SyncControllerBuilder::new()
//!     .with_cache_path(Some("cache.db"))
//!     .with_remote_path(Some("/mnt/shared/vigil/remote.db"))
//!     .build()
//!     .await;
//!
//! let plan = controller.create(&CreatePlan {
//!     name: "Blitz".to_string(),
//!     location: "Praça Sete".to_string(),
//!     date: "2024-09-01".to_string(),
//!     start_time: "16:00".to_string(),
//!     ..Default::default()
//! })?;
//! controller.set_status(&SetStatus {
//!     id: plan.id.clone(),
//!     status: "in-progress".to_string(),
//! })?;
//!
//! controller.wait_idle().await;
//! if let Some(error) = controller.last_sync_error() {
//!     eprintln!("Not synchronized: {error}");
//! }
//! controller.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod params;
pub mod persistence;
pub mod photo;
pub mod seed;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use error::{Result, SyncError, VigilError};
pub use models::{OperationPlan, OperationStatus, OperationSummary, Vehicle};
pub use sync::{SyncController, SyncControllerBuilder, SyncEvent, SyncStatus};

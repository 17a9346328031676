//! Shared type definitions for gallformers admin controllers
//!
//! This crate holds everything the admin controller, the HTTP client and the
//! per-entity adapters agree on:
//!
//! - **entity**: the [`Entity`] trait and its [`EntityId`]
//! - **forms**: the [`AdminFormFields`] contract for editable view-models
//! - **events**: rename events, delete results and confirmation prompts
//! - **api**: the [`AdminApi`] collaborator and its endpoint configuration
//! - **errors**: the [`AdminError`] / [`ApiError`] taxonomy

pub mod api;
pub mod entity;
pub mod errors;
pub mod events;
pub mod forms;

pub use api::{AdminApi, ApiConfig};
pub use entity::{Entity, EntityId, NEW_ID};
pub use errors::{AdminError, AdminResult, ApiError};
pub use events::{ConfirmVariant, ConfirmationOptions, DeleteResult, RenameEvent};
pub use forms::AdminFormFields;

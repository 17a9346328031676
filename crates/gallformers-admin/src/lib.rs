//! # gallformers-admin
//!
//! Entity administration for the gallformers site.
//!
//! This crate serves as a workspace for admin-related functionality:
//! - **types**: Shared type definitions (entities, events, errors, API contract)
//! - **core**: The admin controller (selection, form binding, transactions, renames)
//! - **client**: HTTP implementation of the API contract
//! - **species**: Host species administration
//!
//! ## Features
//!
//! - `default`: `client` and `species`
//! - `client`: Enable the reqwest-backed API client
//! - `species`: Enable species administration

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use gallformers_admin_core as core;
pub use gallformers_admin_types as types;

#[cfg(feature = "client")]
pub use gallformers_admin_client as client;

#[cfg(feature = "species")]
pub use gallformers_admin_species as species;

pub use gallformers_admin_core::{AdminConfig, AdminController, ModelAdmin};
pub use gallformers_admin_types::{AdminError, AdminResult, Entity, EntityId};

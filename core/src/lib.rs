//! View models for a TodoMVC page stored in a content repository.
//!
//! # Overview
//! Two request-scoped builders shape what the templates render:
//! `build_item_model` decides whether one todo item is visible under the
//! current filter and builds its update/destroy/toggle actions;
//! `build_list_model` partitions the page's children into all/active/completed
//! lists and builds the add, toggle-all and destroy-completed actions.
//!
//! # Design
//! - Everything the host used to expose as globals (current resource,
//!   current page, selector) is an explicit parameter.
//! - Actions are plain `ActionDescriptor` data. `RepositoryClient` turns them
//!   into form POSTs and reads nodes back (host-does-IO pattern); the caller
//!   runs the HTTP round trip.
//! - The repository owns all state. Nothing here writes or caches.

pub mod action;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod item;
pub mod list;
pub mod types;

pub use action::{ActionDescriptor, FieldValue};
pub use client::RepositoryClient;
pub use config::ViewConfig;
pub use error::ViewError;
pub use filter::{Filter, FilterContext};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use item::{build_item_model, ItemModel};
pub use list::{build_list_model, ChildSource, ListModel};
pub use types::{PropertyValue, Resource};

//! # Binder Architecture
//!
//! Binder is a **UI-agnostic personal-organizer core**: tabs (topic folders)
//! holding todo-like items, persisted in a local SQLite database, relocated
//! once from a legacy private directory to a shared app-group directory, and
//! mirrored through a pluggable cloud-sync boundary.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI collaborator (not in this crate)                        │
//! │  - Renders lists, collects drafts, decides what to surface  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) on a serialized context (store/context) │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic: load, create, update, delete, toggles    │
//! │  - Every mutation ends in an explicit commit                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract RecordStore trait, staged writes, change events │
//! │  - SqliteStore (production), InMemoryStore (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Alongside the stack: [`locator`] computes the two candidate database
//! locations, [`migrate`] relocates old installs at startup, and [`sync`]
//! mirrors commits to a remote service and merges remote change sets back
//! into the live store.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular arguments, returns regular
//! `Result` values, never writes to stdout, and never exits the process.
//! The two fatal startup classes (unresolvable roots, failed relocation)
//! surface as errors from [`init::initialize`]; what to do with them is the
//! embedder's decision.
//!
//! ## Module Overview
//!
//! - [`init`]: the composition root; start here
//! - [`api`]: the API facade for UI collaborators
//! - [`commands`]: business logic for each operation
//! - [`store`]: storage abstraction, backends, serialized context
//! - [`model`]: core data types (`Tab`, `Item`, `TabColor`)
//! - [`locator`]: legacy and shared database locations
//! - [`migrate`]: the one-shot store relocation
//! - [`sync`]: the cloud-sync boundary
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod error;
pub mod init;
pub mod locator;
pub mod migrate;
pub mod model;
pub mod store;
pub mod sync;

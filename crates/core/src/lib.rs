//! Runner Bids Core - Bid domain types and validation.
//!
//! This crate provides the types shared by the Runner Bids components:
//! - `site` - Public landing page with the bid submission form
//! - `integration-tests` - End-to-end tests against a stub backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. The same validation runs for every submission regardless of
//! whether the browser-side guards ran.
//!
//! # Modules
//!
//! - [`types`] - Cities, bid drafts, per-field errors, payment types, emails
//! - [`validation`] - Field predicates, the price input guard, and the
//!   first-failure-wins draft validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{ValidationError, validate};

//! Core types for Runner Bids.
//!
//! This module provides the records exchanged with the bidding backend and
//! the form state mirrored by the landing page.

pub mod bid;
pub mod city;
pub mod email;
pub mod payment;

pub use bid::{BidDraft, BidField, FieldErrors};
pub use city::City;
pub use email::{Email, EmailError};
pub use payment::PaymentType;

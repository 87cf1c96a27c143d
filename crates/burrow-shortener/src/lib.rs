//! URL shortener service implementation.
//!
//! This crate provides the [`Shortener`] trait and [`ShortenerService`], which
//! implements the create and resolve flows on top of any
//! [`Repository`](burrow_core::Repository). Core types are re-exported from
//! `burrow_core`.

pub mod error;
pub mod service;
pub mod shortener;

pub use error::{Result, ShortenerError};
pub use service::ShortenerService;
pub use shortener::{Shortened, Shortener};

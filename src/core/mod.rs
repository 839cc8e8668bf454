//! Core components of the `sparkvibe-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`SvClient`] and its builder.
//! - The primary [`SvError`] type.
//! - The resilience primitives: [`RequestCache`], [`RequestQueue`] and [`ConnectionHealth`].
//! - Session persistence on top of a [`LocalStore`].

/// Single-flight TTL cache.
pub mod cache;
/// The main client (`SvClient`), builder, and configuration.
pub mod client;
/// Connection health tracking used to scale timeouts.
pub mod connection;
/// The primary error type (`SvError`) for the crate.
pub mod error;
/// Shared data models used across multiple API modules (e.g., `User`, `Mood`).
pub mod models;
/// Paced FIFO request queue.
pub mod queue;
/// Token and user persistence.
pub mod session;
/// Local storage backends.
pub mod storage;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::SvClient`
pub use cache::RequestCache;
pub use client::{CacheMode, RetryConfig, SvClient, SvClientBuilder};
pub use connection::ConnectionHealth;
pub use error::SvError;
pub use models::{Mood, User};
pub use queue::{QueueConfig, RequestQueue};
pub use session::Session;
pub use storage::{FileStore, LocalStore, MemoryStore};

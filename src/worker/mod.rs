//! Background worker for asynchronous gateway and storage operations.
//!
//! The event loop never awaits the network directly: it posts a
//! [`WorkerMessage`] and later receives a [`WorkerResponse`] as an event.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::ExploreWorker;
pub use messages::{WorkerMessage, WorkerResponse};

//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing several side effects to be queued atomically. The runtime in
//! `main.rs` executes them in order.
//!
//! # Example
//!
//! ```rust
//! use dinedeck::app::Action;
//! use dinedeck::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::ProbeAuth)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Posts a message to the background worker.
    ///
    /// The response comes back later as
    /// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Restores the terminal and exits.
    Quit,
}

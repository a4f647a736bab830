//! Terminal front end for the mural message board.
//!
//! `Screen` plays the part of the app screen: it owns the board state, runs
//! one request per user action through a `Transport`, and reports each
//! failure as a single alert. `main.rs` only parses arguments and prints.

pub mod config;
pub mod prompt;
pub mod render;
pub mod screen;
pub mod transport;

pub use screen::{Failure, Screen, ScreenError};
pub use transport::{Transport, TransportError, UreqTransport};

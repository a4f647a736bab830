//! Client core for the mural message board.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! `/recados` store without touching the network, and orders fetched
//! messages for display. Hosts (the `mural` CLI, or a mobile app through
//! `mural-ffi`) execute the I/O and render.
//!
//! # Design
//! - `MuralClient` is stateless; it holds only `base_url`.
//! - Each store operation is split into `build_*` and `parse_*`.
//! - Raw store JSON is validated once, in `types::decode_listing`.
//! - Ordering is pure; the selected mode lives in `Board`, owned by the host.

pub mod board;
pub mod client;
pub mod error;
pub mod http;
pub mod order;
pub mod types;

pub use board::Board;
pub use client::MuralClient;
pub use error::{ApiError, UnknownOrderMode};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use order::{order, order_by_name, order_value, parse_timestamp, OrderMode};
pub use types::{decode_listing, Message, MessageId, NewMessage, ANONYMOUS_AUTHOR};

//! ICS batch generation and removal.
//!
//! A batch is published once with fresh UIDs and remembered in a
//! [`BatchStore`](crate::batch::BatchStore). The matching removal document
//! replays the same UIDs and times with `METHOD:CANCEL`.

mod cancel;
mod document;
mod generate;
mod inspect;

pub use cancel::{build_cancellation, build_cancellation_at};
pub use document::{Method, mint_uid};
pub use generate::{BatchOptions, GeneratedBatch, generate, generate_at};
pub use inspect::{DocumentSummary, EventSummary, inspect};

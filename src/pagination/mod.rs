//! Pagination module
//!
//! Cursor pagination over list endpoints.
//!
//! # Overview
//!
//! List responses carry `meta.cursors.after`. A [`Paginator`] sends the
//! cursor of the previous page as the `after` query parameter of the next
//! request, and stops once the server returns no cursor. The cursor
//! bookkeeping lives in [`PageState`], a plain enum with pure transitions.

mod paginator;
mod types;

pub use paginator::Paginator;
pub use types::{CursorPage, Cursors, ListMeta, ListParams, PageState};

//! Pagination types and traits
//!
//! Defines the cursor state machine and the traits list parameters and list
//! results implement to take part in pagination.

use crate::types::null_as_default;
use serde::{Deserialize, Serialize};

/// Cursor block of a list response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursors {
    /// Cursor for the next page, absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Cursor for the previous page, absent on the first page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

/// `meta` block of a list response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cursors: Cursors,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: u32,
}

impl ListMeta {
    /// The non-empty `after` cursor, if any
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursors.after.as_deref().filter(|c| !c.is_empty())
    }
}

/// List parameters that accept an `after` cursor
pub trait ListParams: Serialize + Clone {
    /// Overwrite the `after` cursor
    fn set_after(&mut self, cursor: String);
}

/// A page of results that reports the cursor of the next page
pub trait CursorPage {
    /// Cursor for the next page; `None` or empty on the last page
    fn next_cursor(&self) -> Option<&str>;
}

/// Cursor state of a paginator
///
/// `Fresh` until the first page arrives, then `HasMore` while the server keeps
/// returning a non-empty `after` cursor, then `Exhausted`. Transitions are
/// pure: [`advance`](Self::advance) consumes the old state and returns the new
/// one.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<R> {
    /// No page fetched yet
    Fresh,
    /// A page was fetched and the server returned a cursor
    HasMore {
        /// Cursor to send as `after` on the next fetch
        cursor: String,
        /// Most recent page
        last: R,
    },
    /// A page was fetched and the server returned no cursor
    Exhausted {
        /// Final page
        last: R,
    },
}

impl<R> Default for PageState<R> {
    fn default() -> Self {
        Self::Fresh
    }
}

impl<R> PageState<R> {
    /// Whether another fetch would hit the server
    pub fn has_next(&self) -> bool {
        !self.is_exhausted()
    }

    /// Check if the last page has been fetched
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Cursor for the next request; empty before the first page
    pub fn cursor(&self) -> &str {
        match self {
            Self::HasMore { cursor, .. } => cursor,
            Self::Fresh | Self::Exhausted { .. } => "",
        }
    }

    /// Most recently fetched page
    pub fn last(&self) -> Option<&R> {
        match self {
            Self::Fresh => None,
            Self::HasMore { last, .. } | Self::Exhausted { last } => Some(last),
        }
    }
}

impl<R: CursorPage> PageState<R> {
    /// State after receiving `page`
    #[must_use]
    pub fn advance(self, page: R) -> Self {
        let cursor = page
            .next_cursor()
            .filter(|c| !c.is_empty())
            .map(str::to_owned);

        match cursor {
            Some(cursor) => Self::HasMore { cursor, last: page },
            None => Self::Exhausted { last: page },
        }
    }
}

//! Cursor paginator
//!
//! Pulls one page per [`fetch`](Paginator::fetch), threading the server's
//! `after` cursor into the next request. There is no read-ahead.

use super::types::{CursorPage, ListParams, PageState};
use crate::error::{Error, Result};
use crate::http::{ApiRequest, HttpClient, RequestOptions, ResultKey};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Lazy sequence of pages over a list endpoint
///
/// Not restartable: once a page has been fetched, earlier pages are only
/// available if the caller kept them. `fetch` takes `&mut self`, so one
/// instance cannot be driven from two places at once; paginate concurrently
/// with independent instances.
pub struct Paginator<'a, P, R> {
    client: &'a HttpClient,
    path: Vec<String>,
    key: ResultKey,
    params: P,
    options: RequestOptions,
    state: PageState<R>,
}

impl<'a, P, R> Paginator<'a, P, R>
where
    P: ListParams,
    R: CursorPage + DeserializeOwned + Clone,
{
    /// Create a paginator over `path` with base list parameters
    pub fn new<I, S>(client: &'a HttpClient, path: I, key: ResultKey, params: P) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client,
            path: path.into_iter().map(Into::into).collect(),
            key,
            params,
            options: RequestOptions::default(),
            state: PageState::Fresh,
        }
    }

    /// Options applied to every page request
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether another page may be available
    ///
    /// True before the first fetch and while the server keeps returning a
    /// cursor.
    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    /// Current cursor state
    pub fn state(&self) -> &PageState<R> {
        &self.state
    }

    /// The base list parameters
    pub fn params(&self) -> &P {
        &self.params
    }

    /// Fetch the next page
    ///
    /// Once exhausted, returns the final page again without a request. On
    /// error the state is left untouched, so the same page can be retried.
    pub async fn fetch(&mut self) -> Result<R> {
        if let PageState::Exhausted { last } = &self.state {
            return Ok(last.clone());
        }

        let mut params = self.params.clone();
        params.set_after(self.state.cursor().to_owned());

        let request = ApiRequest::get(self.path.iter().cloned())
            .query(&params)?
            .options(self.options.clone());
        let page: R = self.client.execute(request, self.key).await?;

        let state = std::mem::take(&mut self.state);
        self.state = state.advance(page.clone());
        debug!(
            "Fetched page of /{}, more available: {}",
            self.path.join("/"),
            self.state.has_next()
        );

        Ok(page)
    }

    /// Consume the paginator into a stream yielding each page once
    pub fn into_stream(self) -> impl Stream<Item = Result<R>> + 'a
    where
        P: 'a,
        R: 'a,
    {
        stream::try_unfold(self, |mut paginator| async move {
            if !paginator.has_next() {
                return Ok::<_, Error>(None);
            }
            let page = paginator.fetch().await?;
            Ok(Some((page, paginator)))
        })
    }
}

impl<P: std::fmt::Debug, R> std::fmt::Debug for Paginator<'_, P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("path", &self.path)
            .field("params", &self.params)
            .field("cursor", &self.state.cursor())
            .field("exhausted", &self.state.is_exhausted())
            .finish_non_exhaustive()
    }
}

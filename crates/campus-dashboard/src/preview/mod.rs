//! Widget previews: the few lines each dashboard card shows.
//!
//! Each widget module has a pure summarizer that turns already-fetched data
//! into display lines. Fetching lives behind [`PreviewSource`], so callers
//! plug in their own backends and [`collect_previews`] runs them together.

use std::future::Future;
use std::pin::Pin;

use futures::future::join_all;
use thiserror::Error;

use crate::layout::Layout;

pub mod calendar;
pub mod mensa;
pub mod mobility;
pub mod timetable;

/// Object-safe boxed future returned by [`PreviewSource::fetch`].
pub type PreviewFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Errors raised while fetching preview data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreviewError {
    /// The backend session expired; the user has to log in again.
    #[error("No active session")]
    NoSession,

    /// The backend cannot answer this query for the current user.
    #[error("Query not possible")]
    QueryUnavailable,

    /// Any other fetch failure.
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

/// Supplier of preview lines for one widget.
pub trait PreviewSource {
    /// Catalog key of the widget this source serves.
    fn key(&self) -> &str;

    /// Fetches the current preview lines.
    fn fetch(&self) -> PreviewFuture<'_, Result<Vec<String>, PreviewError>>;
}

/// Preview outcome for one shown widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetPreview {
    /// Widget key.
    pub key: String,
    /// Lines to render, or the error the card should show instead.
    pub lines: Result<Vec<String>, PreviewError>,
}

/// Fetches previews for every shown widget that has a source.
///
/// Sources run concurrently. Results follow the shown order, and a failing
/// source only affects its own entry. Hidden widgets are never fetched.
pub async fn collect_previews(
    layout: &Layout,
    sources: &[Box<dyn PreviewSource>],
) -> Vec<WidgetPreview> {
    let pending = layout.shown().iter().filter_map(|widget| {
        let source = sources.iter().find(|s| s.key() == widget.key)?;
        Some(async move {
            let lines = source.fetch().await;
            if let Err(e) = &lines {
                tracing::warn!(key = %widget.key, error = %e, "Preview fetch failed");
            }
            WidgetPreview {
                key: widget.key.clone(),
                lines,
            }
        })
    });
    join_all(pending).await
}

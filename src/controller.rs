//! Orchestration of the fetch → rank → annotate → render pipeline.
//!
//! A refresh drives one pass over the pipeline for a selection snapshot.
//! Overlapping refreshes are serialized by token: every refresh is stamped
//! with a monotonically increasing token at issue time, and a completion
//! whose token is no longer the latest is discarded before it touches the
//! render target, so a slow stale fetch can never clobber a newer result
//! or clear the loading flag while that newer fetch is still in flight.
//! The refresh that superseded it settles the flag when it completes.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::fetch::FetchCatalog;
use crate::prefs::Selection;
use crate::rank::{self, RankedRow};

pub type RefreshToken = u64;

/// Surface that receives the final ordered, annotated row set. Row
/// replacement is all-or-nothing: prior contents are gone once
/// `replace_rows` returns.
pub trait RenderTarget {
    fn set_loading(&mut self, loading: bool);
    fn replace_rows(&mut self, rows: Vec<RankedRow>);
}

pub struct AgentListController {
    fetcher: Arc<dyn FetchCatalog>,
    latest_token: RefreshToken,
}

impl AgentListController {
    pub fn new(fetcher: Arc<dyn FetchCatalog>) -> Self {
        Self {
            fetcher,
            latest_token: 0,
        }
    }

    fn issue_token(&mut self) -> RefreshToken {
        self.latest_token += 1;
        self.latest_token
    }

    fn is_current(&self, token: RefreshToken) -> bool {
        token == self.latest_token
    }

    /// Run one full refresh pass against the target.
    ///
    /// The loading flag transitions true → false exactly once, and the
    /// false transition happens regardless of what the fetch produced; an
    /// empty catalog renders as an empty row set, never as an error.
    pub async fn refresh(&mut self, selection: &Selection, target: &mut impl RenderTarget) {
        let (token, rows) = self.begin_detached(selection, target);
        let rows = rows.await;
        self.complete(token, rows, target);
    }

    /// Start a refresh whose fetch half runs out-of-band (the TUI spawns it
    /// on the runtime). Marks the target as loading and returns the stamped
    /// token together with the future producing the annotated rows.
    pub fn begin_detached(
        &mut self,
        selection: &Selection,
        target: &mut impl RenderTarget,
    ) -> (RefreshToken, impl Future<Output = Vec<RankedRow>> + Send + 'static) {
        let token = self.issue_token();
        target.set_loading(true);

        let fetcher = Arc::clone(&self.fetcher);
        let selection = selection.clone();
        let rows = async move {
            let catalog = fetcher.fetch(&selection.browser, &selection.os).await;
            rank::annotate(rank::rank(&catalog, selection.sort), &selection.active_ua)
        };

        (token, rows)
    }

    /// Apply a finished refresh. A completion that is no longer the latest
    /// is discarded without touching the target: the refresh that replaced
    /// it owns the row set and the loading flag.
    pub fn complete(
        &self,
        token: RefreshToken,
        rows: Vec<RankedRow>,
        target: &mut impl RenderTarget,
    ) {
        if !self.is_current(token) {
            debug!(token, latest = self.latest_token, "discarding stale refresh");
            return;
        }
        target.replace_rows(rows);
        target.set_loading(false);
    }
}

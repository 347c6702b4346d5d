//! Deterministic version ordering of a catalog and row annotation.

use serde::{Deserialize, Serialize};

use crate::catalog::AgentRecord;
use crate::version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// A catalog entry placed in its final display position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    /// 1-based position after ordering.
    pub rank: usize,
    pub record: AgentRecord,
    pub is_active: bool,
}

/// Order a catalog by browser version. Descending is the exact reversal of
/// the ascending result, ties included. The input is left untouched; the
/// stable sort keeps repeated calls deterministic.
pub fn rank(catalog: &[AgentRecord], direction: SortDirection) -> Vec<AgentRecord> {
    let mut ordered = catalog.to_vec();
    ordered.sort_by(|a, b| {
        version::compare(a.browser.version.as_deref(), b.browser.version.as_deref())
    });
    if direction == SortDirection::Descending {
        ordered.reverse();
    }
    ordered
}

/// Assemble display rows, marking the entry whose `ua` matches the active
/// agent. At most one row is active; zero when the active agent is not in
/// this catalog.
///
/// An empty `active_ua` means no agent is active and matches nothing, even
/// a record whose own `ua` happens to be empty. Plain equality would mark
/// such a record, which is never what an unset preference should do.
pub fn annotate(ordered: Vec<AgentRecord>, active_ua: &str) -> Vec<RankedRow> {
    ordered
        .into_iter()
        .enumerate()
        .map(|(index, record)| RankedRow {
            rank: index + 1,
            is_active: !active_ua.is_empty() && record.ua == active_ua,
            record,
        })
        .collect()
}

//! View state held by the page controller

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use crate::types::{Dataset, PairRecord, TokenAggregate, Totals};

/// Everything derived from one successful fetch cycle.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub pairs: Dataset<PairRecord>,
    pub tokens: Dataset<TokenAggregate>,
    pub totals: Totals,
    /// Unreadable plus malformed records.
    pub skipped: usize,
    pub reference_price: Option<Decimal>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum ViewState {
    Loading,
    Ready(DashboardSnapshot),
    Failed {
        message: String,
        /// Last good data, still shown under the error banner.
        previous: Option<DashboardSnapshot>,
    },
}

impl ViewState {
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        match self {
            ViewState::Loading => None,
            ViewState::Ready(snapshot) => Some(snapshot),
            ViewState::Failed { previous, .. } => previous.as_ref(),
        }
    }

    pub fn take_snapshot(&mut self) -> Option<DashboardSnapshot> {
        match std::mem::replace(self, ViewState::Loading) {
            ViewState::Loading => None,
            ViewState::Ready(snapshot) => Some(snapshot),
            ViewState::Failed { previous, .. } => previous,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }
}

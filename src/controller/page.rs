//! Page controller: fetch orchestration, view state and table composition

use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use crate::{
    aggregation::run_pipeline,
    config::{Config, PriceDenomination},
    controller::{Command, DashboardSnapshot, PageMove, TableTarget, ViewState, HELP},
    errors::{DashboardError, DashboardResult},
    network::{AllowList, PairsPayload, PairsSource, PriceOracle},
    table::{PairColumn, PairTable, SortDirection, SortableTable, Sortable, TokenColumn, TokenTable},
    types::Dataset,
    utils::{render_overview, render_pair_table, render_token_table, Layout},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub denomination: PriceDenomination,
    pub page_size: usize,
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            denomination: config.price_denomination,
            page_size: config.page_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Data already present and not invalidated.
    Skipped,
    Updated,
    Failed,
}

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Render,
    Refresh,
    ShowHelp,
    Quit,
}

pub struct PageController {
    pairs_source: Arc<dyn PairsSource>,
    oracle: Option<Arc<dyn PriceOracle>>,
    allow_list: AllowList,
    settings: ControllerSettings,
    state: ViewState,
    stale: bool,
    consecutive_failures: u32,
    token_table: TokenTable,
    pair_table: PairTable,
}

impl PageController {
    pub fn new(
        pairs_source: Arc<dyn PairsSource>,
        oracle: Option<Arc<dyn PriceOracle>>,
        allow_list: AllowList,
        settings: ControllerSettings,
    ) -> DashboardResult<Self> {
        if settings.denomination == PriceDenomination::Reference && oracle.is_none() {
            return Err(DashboardError::Configuration {
                message: "reference-denominated prices need PRICE_ORACLE_URL".to_string(),
            });
        }

        Ok(Self {
            pairs_source,
            oracle,
            allow_list,
            settings,
            state: ViewState::Loading,
            stale: true,
            consecutive_failures: 0,
            token_table: SortableTable::new(TokenColumn::Tvl, SortDirection::Descending, settings.page_size),
            pair_table: SortableTable::new(PairColumn::Tvl, SortDirection::Descending, settings.page_size),
        })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn token_table(&self) -> &TokenTable {
        &self.token_table
    }

    pub fn pair_table(&self) -> &PairTable {
        &self.pair_table
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Forces the next `refresh` to fetch.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    fn is_populated(&self) -> bool {
        matches!(&self.state, ViewState::Ready(snapshot) if !snapshot.tokens.is_empty())
    }

    /// Fetches pairs (and the reference price when an oracle is configured)
    /// concurrently, then aggregates. State is written only after both
    /// fetches finish, so dropping this future leaves the state untouched.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        if !self.stale && self.is_populated() {
            debug!("Dashboard data already loaded, skipping fetch");
            return RefreshOutcome::Skipped;
        }

        let pairs_source = Arc::clone(&self.pairs_source);
        let oracle = self.oracle.clone();
        let (pairs_result, price_result) = tokio::join!(pairs_source.fetch_pairs(), async {
            match &oracle {
                Some(oracle) => Some(oracle.fetch_reference_price().await),
                None => None,
            }
        });

        match self.build_snapshot(pairs_result, price_result) {
            Ok(snapshot) => {
                info!(
                    "✅ Loaded {} pairs, {} tokens (skipped {}) | TVL ${} | Volume ${}",
                    snapshot.pairs.len(),
                    snapshot.tokens.len(),
                    snapshot.skipped,
                    snapshot.totals.tvl.round_dp(2),
                    snapshot.totals.volume.round_dp(2),
                );
                self.state = ViewState::Ready(snapshot);
                self.stale = false;
                self.consecutive_failures = 0;
                RefreshOutcome::Updated
            }
            Err(e) => {
                self.consecutive_failures += 1;
                error!(
                    kind = e.kind(),
                    failures = self.consecutive_failures,
                    "❌ Dashboard refresh failed: {}",
                    e
                );
                let previous = self.state.take_snapshot();
                self.state = ViewState::Failed {
                    message: e.to_string(),
                    previous,
                };
                RefreshOutcome::Failed
            }
        }
    }

    fn build_snapshot(
        &self,
        pairs_result: DashboardResult<PairsPayload>,
        price_result: Option<DashboardResult<Decimal>>,
    ) -> DashboardResult<DashboardSnapshot> {
        let payload = pairs_result?;

        let (multiplier, reference_price) = match (self.settings.denomination, price_result) {
            (PriceDenomination::Reference, Some(Ok(price))) => (price, Some(price)),
            (PriceDenomination::Reference, Some(Err(e))) => return Err(e),
            (PriceDenomination::Reference, None) => {
                return Err(DashboardError::PriceUnavailable {
                    reason: "no price oracle configured".to_string(),
                });
            }
            (PriceDenomination::Usd, Some(Ok(price))) => (Decimal::ONE, Some(price)),
            (PriceDenomination::Usd, Some(Err(e))) => {
                warn!("⚠️ Reference price unavailable, continuing without it: {}", e);
                (Decimal::ONE, None)
            }
            (PriceDenomination::Usd, None) => (Decimal::ONE, None),
        };

        let fetched = payload.pairs.len();
        let eligible = self.allow_list.filter_pairs(payload.pairs);
        if self.allow_list.is_restricted() {
            debug!("Allow-list kept {} of {} pairs", eligible.len(), fetched);
        }

        let output = run_pipeline(&eligible, multiplier);

        Ok(DashboardSnapshot {
            pairs: Dataset::new(output.pairs),
            tokens: Dataset::new(output.tokens),
            totals: output.totals,
            skipped: output.skipped + payload.unreadable,
            reference_price,
            fetched_at: Utc::now(),
        })
    }

    /// Applies a user command to table state.
    pub fn apply(&mut self, command: Command) -> CommandAction {
        match command {
            Command::SortTokens(column) => {
                self.token_table.select_column(column);
                CommandAction::Render
            }
            Command::SortPairs(column) => {
                self.pair_table.select_column(column);
                CommandAction::Render
            }
            Command::Page(TableTarget::Tokens, movement) => {
                if let Some(snapshot) = self.state.snapshot() {
                    self.token_table.observe(&snapshot.tokens);
                }
                move_page(&mut self.token_table, movement);
                CommandAction::Render
            }
            Command::Page(TableTarget::Pairs, movement) => {
                if let Some(snapshot) = self.state.snapshot() {
                    self.pair_table.observe(&snapshot.pairs);
                }
                move_page(&mut self.pair_table, movement);
                CommandAction::Render
            }
            Command::Refresh => {
                self.invalidate();
                CommandAction::Refresh
            }
            Command::Help => CommandAction::ShowHelp,
            Command::Quit => CommandAction::Quit,
        }
    }

    pub fn help(&self) -> &'static str {
        HELP
    }

    /// Renders the whole page for a terminal `width` columns wide.
    pub fn render(&mut self, width: usize) -> String {
        let layout = Layout::for_width(width);
        match &self.state {
            ViewState::Loading => "Loading dashboard data...\n".to_string(),
            ViewState::Ready(snapshot) => {
                render_snapshot(snapshot, &mut self.token_table, &mut self.pair_table, layout)
            }
            ViewState::Failed { message, previous } => {
                let mut out = format!("Unable to refresh data: {}\n", message);
                match previous {
                    Some(snapshot) => {
                        out.push_str("Showing last loaded data.\n\n");
                        out.push_str(&render_snapshot(
                            snapshot,
                            &mut self.token_table,
                            &mut self.pair_table,
                            layout,
                        ));
                    }
                    None => out.push_str("Will retry on the next refresh.\n"),
                }
                out
            }
        }
    }
}

fn move_page<T: Sortable>(table: &mut SortableTable<T>, movement: PageMove) {
    match movement {
        PageMove::To(page) => table.set_page(page),
        PageMove::Next => table.next_page(),
        PageMove::Previous => table.previous_page(),
    }
}

fn render_snapshot(
    snapshot: &DashboardSnapshot,
    token_table: &mut TokenTable,
    pair_table: &mut PairTable,
    layout: Layout,
) -> String {
    let mut out = render_overview(
        &snapshot.totals,
        snapshot.reference_price,
        snapshot.skipped,
        snapshot.fetched_at,
    );
    out.push_str("\nTOKENS\n");
    out.push_str(&render_token_table(&token_table.render(&snapshot.tokens), layout));
    out.push_str("\nTOP PAIRS\n");
    out.push_str(&render_pair_table(&pair_table.render(&snapshot.pairs), layout));
    out
}

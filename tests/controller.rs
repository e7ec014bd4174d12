use async_trait::async_trait;
use dex_dashboard::config::PriceDenomination;
use dex_dashboard::controller::{
    Command, CommandAction, ControllerSettings, PageController, PageMove, RefreshOutcome,
    TableTarget, ViewState,
};
use dex_dashboard::errors::{DashboardError, DashboardResult};
use dex_dashboard::network::{
    AllowList, HttpPairsClient, HttpPriceOracle, PairsPayload, PairsSource, PriceOracle,
    RetryConfig,
};
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_ok, assert_pending};

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 1,
        initial_delay_ms: 1,
        max_delay_ms: 1,
        exponential_base: 2.0,
        attempt_timeout: Duration::from_secs(5),
    }
}

fn settings(denomination: PriceDenomination, page_size: usize) -> ControllerSettings {
    ControllerSettings {
        denomination,
        page_size,
    }
}

fn pairs_body() -> String {
    json!({
        "0xpair1": {
            "token0": {"contractAddress": "0xA", "symbol": "AAA", "name": "Alpha", "usdPrice": "1"},
            "token1": {"contractAddress": "0xB", "symbol": "BBB", "name": "Beta", "usdPrice": "0.5"},
            "token0Reserve": "100", "token1Reserve": "200",
            "token0Volume": "10", "token1Volume": "20",
            "swapFee": "0.3", "platformFee": "10"
        },
        "0xpair2": {
            "token0": {"contractAddress": "0xa", "symbol": "AAA", "name": "Alpha", "usdPrice": "1"},
            "token1": {"contractAddress": "0xC", "symbol": "CCC", "name": "Gamma", "usdPrice": "2"},
            "token0Reserve": "50", "token1Reserve": "50",
            "token0Volume": "0", "token1Volume": "0",
            "swapFee": "0.3", "platformFee": "10"
        },
        "0xbroken": {
            "token0": {"contractAddress": "0xd", "symbol": "DDD", "name": "Delta"},
            "token1": {"contractAddress": "0xe", "symbol": "EEE", "name": "Eps", "usdPrice": "1"},
            "token0Reserve": "1", "token1Reserve": "1",
            "token0Volume": "1", "token1Volume": "1",
            "swapFee": "0.3", "platformFee": "0"
        }
    })
    .to_string()
}

fn pairs_client(server: &mockito::Server) -> Arc<dyn PairsSource> {
    Arc::new(HttpPairsClient::new(&server.url(), fast_retry()).expect("client"))
}

fn oracle_client(server: &mockito::Server) -> Arc<dyn PriceOracle> {
    Arc::new(
        HttpPriceOracle::new(&format!("{}/price", server.url()), "/price", fast_retry())
            .expect("oracle"),
    )
}

#[tokio::test]
async fn refresh_loads_pairs_tokens_and_totals() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/pairs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pairs_body())
        .expect(1)
        .create_async()
        .await;

    let mut controller = assert_ok!(PageController::new(
        pairs_client(&server),
        None,
        AllowList::allow_all(),
        settings(PriceDenomination::Usd, 20),
    ));

    assert_eq!(controller.refresh().await, RefreshOutcome::Updated);
    mock.assert_async().await;

    let snapshot = controller.state().snapshot().expect("snapshot");
    assert_eq!(snapshot.pairs.len(), 2);
    assert_eq!(snapshot.tokens.len(), 3);
    assert_eq!(snapshot.skipped, 1);
    assert_eq!(snapshot.totals.tvl, dec!(350));
    assert_eq!(snapshot.totals.volume, dec!(10));
    assert_eq!(snapshot.reference_price, None);

    let page = controller.render(120);
    assert!(page.contains("$350.00"));
    assert!(page.contains("AAA-BBB"));
    assert!(page.contains("Page 1 of 1"));
}

#[tokio::test]
async fn second_refresh_is_skipped_until_invalidated() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/pairs")
        .with_status(200)
        .with_body(pairs_body())
        .expect(2)
        .create_async()
        .await;

    let mut controller = assert_ok!(PageController::new(
        pairs_client(&server),
        None,
        AllowList::allow_all(),
        settings(PriceDenomination::Usd, 20),
    ));

    assert_eq!(controller.refresh().await, RefreshOutcome::Updated);
    assert_eq!(controller.refresh().await, RefreshOutcome::Skipped);

    assert_eq!(controller.apply(Command::Refresh), CommandAction::Refresh);
    assert_eq!(controller.refresh().await, RefreshOutcome::Updated);
    mock.assert_async().await;
}

#[tokio::test]
async fn failed_refresh_keeps_previous_snapshot() {
    let mut server = mockito::Server::new_async().await;
    let ok = server
        .mock("GET", "/pairs")
        .with_status(200)
        .with_body(pairs_body())
        .create_async()
        .await;

    let mut controller = assert_ok!(PageController::new(
        pairs_client(&server),
        None,
        AllowList::allow_all(),
        settings(PriceDenomination::Usd, 20),
    ));
    assert_eq!(controller.refresh().await, RefreshOutcome::Updated);

    ok.remove_async().await;
    let _failing = server
        .mock("GET", "/pairs")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    controller.invalidate();
    assert_eq!(controller.refresh().await, RefreshOutcome::Failed);
    assert_eq!(controller.consecutive_failures(), 1);

    match controller.state() {
        ViewState::Failed { previous, .. } => {
            let previous = previous.as_ref().expect("previous data kept");
            assert_eq!(previous.totals.tvl, dec!(350));
        }
        other => panic!("expected failed state, got {:?}", other),
    }
    let page = controller.render(120);
    assert!(page.starts_with("Unable to refresh data"));
    assert!(page.contains("$350.00"));
}

#[tokio::test]
async fn first_failure_without_data_shows_error_only() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/pairs")
        .with_status(500)
        .create_async()
        .await;

    let mut controller = assert_ok!(PageController::new(
        pairs_client(&server),
        None,
        AllowList::allow_all(),
        settings(PriceDenomination::Usd, 20),
    ));

    assert_eq!(controller.refresh().await, RefreshOutcome::Failed);
    assert!(controller.state().snapshot().is_none());
    assert!(controller.render(120).contains("Will retry on the next refresh"));
}

#[tokio::test]
async fn oracle_failure_in_usd_mode_still_shows_data() {
    let mut server = mockito::Server::new_async().await;
    let _pairs = server
        .mock("GET", "/pairs")
        .with_status(200)
        .with_body(pairs_body())
        .create_async()
        .await;
    let _price = server
        .mock("GET", "/price")
        .with_status(500)
        .create_async()
        .await;

    let mut controller = assert_ok!(PageController::new(
        pairs_client(&server),
        Some(oracle_client(&server)),
        AllowList::allow_all(),
        settings(PriceDenomination::Usd, 20),
    ));

    assert_eq!(controller.refresh().await, RefreshOutcome::Updated);
    let snapshot = controller.state().snapshot().expect("snapshot");
    assert_eq!(snapshot.reference_price, None);
    assert_eq!(snapshot.totals.tvl, dec!(350));
}

#[tokio::test]
async fn oracle_failure_in_reference_mode_fails_the_refresh() {
    let mut server = mockito::Server::new_async().await;
    let _pairs = server
        .mock("GET", "/pairs")
        .with_status(200)
        .with_body(pairs_body())
        .create_async()
        .await;
    let _price = server
        .mock("GET", "/price")
        .with_status(200)
        .with_body(r#"{"price": "0"}"#)
        .create_async()
        .await;

    let mut controller = assert_ok!(PageController::new(
        pairs_client(&server),
        Some(oracle_client(&server)),
        AllowList::allow_all(),
        settings(PriceDenomination::Reference, 20),
    ));

    assert_eq!(controller.refresh().await, RefreshOutcome::Failed);
}

#[tokio::test]
async fn reference_mode_scales_prices_by_oracle() {
    let mut server = mockito::Server::new_async().await;
    let _pairs = server
        .mock("GET", "/pairs")
        .with_status(200)
        .with_body(pairs_body())
        .create_async()
        .await;
    let _price = server
        .mock("GET", "/price")
        .with_status(200)
        .with_body(r#"{"price": "0.02"}"#)
        .create_async()
        .await;

    let mut controller = assert_ok!(PageController::new(
        pairs_client(&server),
        Some(oracle_client(&server)),
        AllowList::allow_all(),
        settings(PriceDenomination::Reference, 20),
    ));

    assert_eq!(controller.refresh().await, RefreshOutcome::Updated);
    let snapshot = controller.state().snapshot().expect("snapshot");
    assert_eq!(snapshot.reference_price, Some(dec!(0.02)));
    assert_eq!(snapshot.totals.tvl, dec!(7));
}

#[tokio::test]
async fn allow_list_restricts_pairs() {
    let mut server = mockito::Server::new_async().await;
    let _pairs = server
        .mock("GET", "/pairs")
        .with_status(200)
        .with_body(pairs_body())
        .create_async()
        .await;

    let mut controller = assert_ok!(PageController::new(
        pairs_client(&server),
        None,
        AllowList::from_addresses(["0xa", "0xb"]),
        settings(PriceDenomination::Usd, 20),
    ));

    assert_eq!(controller.refresh().await, RefreshOutcome::Updated);
    let snapshot = controller.state().snapshot().expect("snapshot");
    assert_eq!(snapshot.pairs.len(), 1);
    assert_eq!(snapshot.totals.tvl, dec!(200));
}

#[test]
fn reference_mode_without_oracle_is_a_configuration_error() {
    struct NeverCalled;

    #[async_trait]
    impl PairsSource for NeverCalled {
        fn name(&self) -> &'static str {
            "never"
        }
        async fn fetch_pairs(&self) -> DashboardResult<PairsPayload> {
            unreachable!("constructor should fail first")
        }
    }

    let result = PageController::new(
        Arc::new(NeverCalled),
        None,
        AllowList::allow_all(),
        settings(PriceDenomination::Reference, 20),
    );
    assert!(matches!(result, Err(DashboardError::Configuration { .. })));
}

struct SlowSource;

#[async_trait]
impl PairsSource for SlowSource {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn fetch_pairs(&self) -> DashboardResult<PairsPayload> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(PairsPayload::default())
    }
}

#[tokio::test]
async fn dropped_refresh_leaves_state_untouched() {
    let mut controller = assert_ok!(PageController::new(
        Arc::new(SlowSource),
        None,
        AllowList::allow_all(),
        settings(PriceDenomination::Usd, 20),
    ));

    let mut refresh = tokio_test::task::spawn(controller.refresh());
    assert_pending!(refresh.poll());
    drop(refresh);

    assert!(matches!(controller.state(), ViewState::Loading));
    assert_eq!(controller.consecutive_failures(), 0);

    let timed_out = tokio::time::timeout(Duration::from_millis(20), controller.refresh()).await;
    assert!(timed_out.is_err());
    assert!(matches!(controller.state(), ViewState::Loading));
}

#[tokio::test]
async fn new_dataset_resets_page_to_one() {
    let mut server = mockito::Server::new_async().await;
    let _pairs = server
        .mock("GET", "/pairs")
        .with_status(200)
        .with_body(pairs_body())
        .create_async()
        .await;

    let mut controller = assert_ok!(PageController::new(
        pairs_client(&server),
        None,
        AllowList::allow_all(),
        settings(PriceDenomination::Usd, 1),
    ));
    assert_eq!(controller.refresh().await, RefreshOutcome::Updated);
    controller.render(120);

    controller.apply(Command::Page(TableTarget::Tokens, PageMove::To(3)));
    assert_eq!(controller.token_table().page(), 3);
    controller.apply(Command::Page(TableTarget::Tokens, PageMove::Next));
    assert_eq!(controller.token_table().page(), 3);
    assert!(controller.render(120).contains("Page 3 of 3 (3 tokens)"));

    controller.apply(Command::Refresh);
    assert_eq!(controller.refresh().await, RefreshOutcome::Updated);
    controller.render(120);
    assert_eq!(controller.token_table().page(), 1);
}

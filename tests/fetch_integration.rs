//! Integration tests for the API client and the fetch worker
//!
//! Requests go to a loopback server so no test touches the network.

mod common;

use common::builders::{api_body, DataPointBuilder};
use common::http_fixture::{refused_base_url, Canned, HttpFixture};
use common::{day, test_timeout};
use covid_tracker::backend::spawn_fetches;
use covid_tracker::config::ApiConfig;
use covid_tracker::{CovidClient, FetchError, FetchMessage, SelectionController, ScreenPhase};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn client_for(base_url: String) -> CovidClient {
    client_with_timeout(base_url, 5)
}

fn client_with_timeout(base_url: String, secs: u64) -> CovidClient {
    let config = ApiConfig {
        use_system_proxy: false,
        request_timeout_secs: Some(secs),
        ..ApiConfig::with_base_url(base_url)
    };
    CovidClient::new(&config).expect("client")
}

fn national_body() -> String {
    api_body(&[
        DataPointBuilder::new(0).positive(100).negative(10).death(1).build(),
        DataPointBuilder::new(1).positive(150).negative(20).death(2).build(),
        DataPointBuilder::new(2).positive(175).negative(30).death(3).build(),
    ])
}

fn states_body() -> String {
    api_body(&[
        DataPointBuilder::new(0).state("NY").positive(5).build(),
        DataPointBuilder::new(1).state("NY").positive(6).build(),
        DataPointBuilder::new(0).state("CA").positive(7).build(),
        DataPointBuilder::new(1).state("CA").positive(8).build(),
        DataPointBuilder::new(1).state("AK").positive(9).build(),
    ])
}

#[tokio::test]
async fn test_fetch_national_reverses_api_order() {
    let server = HttpFixture::serve(vec![("/v1/us/daily.json", Canned::ok(national_body()))]);
    let client = client_for(server.base_url());

    let series = client.fetch_national().await.expect("national series");
    assert_eq!(series.len(), 3);
    assert_eq!(series.points()[0].date, day(0));
    assert_eq!(series.last().map(|p| p.positive_increase), Some(175));
    assert!(series.iter().all(|p| p.state.is_none()));
}

#[tokio::test]
async fn test_fetch_states_groups_by_code() {
    let server = HttpFixture::serve(vec![("/v1/states/daily.json", Canned::ok(states_body()))]);
    let client = client_for(server.base_url());

    let index = client.fetch_states().await.expect("state index");
    assert_eq!(index.codes().collect::<Vec<_>>(), vec!["AK", "CA", "NY"]);

    let ny = index.get("NY").expect("NY series");
    assert_eq!(ny.len(), 2);
    assert_eq!(ny.points()[0].positive_increase, 5);
    assert_eq!(ny.points()[1].date, day(1));
    assert_eq!(index.get("AK").map(|s| s.len()), Some(1));
}

#[tokio::test]
async fn test_http_error_status_is_transport_failure() {
    let server = HttpFixture::serve(vec![("/v1/us/daily.json", Canned::status(500))]);
    let client = client_for(server.base_url());

    let national = client.fetch_national().await;
    assert!(matches!(national, Err(ref e) if e.is_transport()));

    // unrouted path answers 404
    let states = client.fetch_states().await;
    assert!(matches!(states, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn test_null_and_empty_bodies() {
    let server = HttpFixture::serve(vec![
        ("/v1/us/daily.json", Canned::ok("null")),
        ("/v1/states/daily.json", Canned::ok("[]")),
    ]);
    let client = client_for(server.base_url());

    assert!(matches!(
        client.fetch_national().await,
        Err(FetchError::EmptyResponse)
    ));
    assert!(matches!(
        client.fetch_states().await,
        Err(FetchError::EmptyResponse)
    ));
}

#[tokio::test]
async fn test_state_feed_without_state_codes_is_empty() {
    let server = HttpFixture::serve(vec![("/v1/states/daily.json", Canned::ok(national_body()))]);
    let client = client_for(server.base_url());

    assert!(matches!(
        client.fetch_states().await,
        Err(FetchError::EmptyResponse)
    ));
}

#[tokio::test]
async fn test_refused_connection_is_transport_failure() {
    let client = client_for(refused_base_url());
    let result = client.fetch_national().await;
    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn test_request_timeout_is_transport_failure() {
    let server = HttpFixture::silent();
    let client = client_with_timeout(server.base_url(), 1);

    let started = Instant::now();
    let result = client.fetch_national().await;

    assert!(matches!(result, Err(FetchError::Transport(ref e)) if e.is_timeout()));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[test]
fn test_worker_delivers_both_results() {
    let server = HttpFixture::serve(vec![
        ("/v1/us/daily.json", Canned::ok(national_body())),
        ("/v1/states/daily.json", Canned::ok(states_body())),
    ]);
    let updates = Arc::new(AtomicUsize::new(0));
    let counter = updates.clone();

    let (bridge, handle) = spawn_fetches(client_for(server.base_url()), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .expect("spawn worker");

    let mut controller = SelectionController::new();
    let mut sources = Vec::new();
    for _ in 0..2 {
        let msg = bridge.recv_timeout(test_timeout()).expect("fetch result");
        sources.push(msg.source());
        controller.handle_fetch(msg);
    }
    handle.join().expect("worker exits");

    sources.sort();
    assert_eq!(sources, vec!["national", "state"]);
    assert_eq!(updates.load(Ordering::SeqCst), 2);
    assert_eq!(controller.phase(), ScreenPhase::Ready);
    assert_eq!(controller.labels().map(|l| l.value.as_str()), Some("175"));
    assert_eq!(controller.state_names().len(), 4);
}

#[test]
fn test_worker_reports_each_failure_once() {
    let server = HttpFixture::serve(vec![("/v1/us/daily.json", Canned::ok(national_body()))]);
    let (bridge, handle) =
        spawn_fetches(client_for(server.base_url()), || {}).expect("spawn worker");

    let mut national_ok = false;
    let mut states_failed = false;
    for _ in 0..2 {
        match bridge.recv_timeout(test_timeout()).expect("fetch result") {
            FetchMessage::National(result) => national_ok = result.is_ok(),
            FetchMessage::States(result) => states_failed = result.is_err(),
        }
    }
    handle.join().expect("worker exits");

    assert!(national_ok);
    assert!(states_failed);
    assert!(bridge.try_recv().is_none());
}

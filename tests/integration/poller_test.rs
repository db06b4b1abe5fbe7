//! Stats poller integration tests

use std::time::Duration;

use synadmin::console::{Operation, StatsPoller};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::assertions::eventually;
use crate::common::{stats_json, MockAdmin};

async fn mount_stats(admin: &MockAdmin, status: u16) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(stats_json(10))
    } else {
        ResponseTemplate::new(status)
    };
    Mock::given(method("GET"))
        .and(path(MockAdmin::path("/v1/statistics")))
        .respond_with(response)
        .mount(&admin.server)
        .await;
}

#[tokio::test]
async fn test_polls_immediately_then_on_interval() {
    let admin = MockAdmin::start().await;
    mount_stats(&admin, 200).await;
    let ctx = admin.context().await;

    let poller = StatsPoller::spawn(&ctx, Duration::from_millis(50));
    assert!(eventually(500, || poller.ticks() >= 1).await);
    assert_eq!(ctx.stats().map(|s| s.total_users), Some(10));

    assert!(eventually(1_000, || poller.ticks() >= 3).await);
    assert!(poller.is_active());
    poller.shutdown().await;
}

#[tokio::test]
async fn test_stop_halts_polling() {
    let admin = MockAdmin::start().await;
    mount_stats(&admin, 200).await;
    let ctx = admin.context().await;

    let poller = StatsPoller::spawn(&ctx, Duration::from_millis(30));
    assert!(eventually(500, || poller.ticks() >= 2).await);

    poller.stop();
    assert!(eventually(500, || !poller.is_active()).await);
    tokio::time::sleep(Duration::from_millis(50)).await;
    let ticks = poller.ticks();
    let requests = admin.request_count().await;

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(poller.ticks(), ticks);
    assert_eq!(admin.request_count().await, requests);
}

#[tokio::test]
async fn test_failures_do_not_stop_polling() {
    let admin = MockAdmin::start().await;
    mount_stats(&admin, 503).await;
    let ctx = admin.context().await;

    let poller = StatsPoller::spawn(&ctx, Duration::from_millis(30));
    assert!(eventually(1_000, || poller.ticks() >= 3).await);
    assert!(poller.is_active());

    let status = ctx.status(Operation::FetchStats);
    assert!(status.last_error.is_some());
    assert!(ctx.stats().is_none());
}

#[tokio::test]
async fn test_dropping_view_stops_poller() {
    let admin = MockAdmin::start().await;
    mount_stats(&admin, 200).await;
    let ctx = admin.context().await;

    let (view, guard) = ctx.scoped();
    let poller = StatsPoller::spawn(&view, Duration::from_millis(30));
    assert!(eventually(500, || poller.ticks() >= 1).await);

    drop(guard);
    assert!(eventually(500, || !poller.is_active()).await);
    assert!(!ctx.scope().is_cancelled());
}

#[tokio::test]
async fn test_dropping_handle_stops_poller() {
    let admin = MockAdmin::start().await;
    mount_stats(&admin, 200).await;
    let ctx = admin.context().await;

    let poller = StatsPoller::spawn(&ctx, Duration::from_millis(30));
    assert!(eventually(500, || poller.ticks() >= 1).await);
    drop(poller);

    tokio::time::sleep(Duration::from_millis(50)).await;
    let requests = admin.request_count().await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(admin.request_count().await, requests);
    assert!(!ctx.is_loading());
}

mod common;

use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use http::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use revalid_client::cache::{CacheKey, NoCache, ResponseCache};
use revalid_client::{
    CACHE_ORIGIN, CacheConfig, CacheServe, CachingClient, ClientConfig, HttpRequest, ManualClock,
    ResponseOrigin,
};
use serde::Deserialize;
use url::Url;

use common::{MockTransport, ORIGIN, epoch};

struct Harness {
    transport: MockTransport,
    cache: Arc<ResponseCache>,
    clock: ManualClock,
    client: CachingClient<MockTransport>,
}

fn harness() -> Harness {
    common::init_tracing();
    let transport = MockTransport::new();
    let clock = ManualClock::new(epoch());
    let cache = Arc::new(ResponseCache::with_clock(
        CacheConfig::default(),
        Arc::new(clock.clone()),
    ));
    let config = ClientConfig::with_base(Url::parse(ORIGIN).expect("origin"));
    let client = CachingClient::with_config(transport.clone(), cache.clone(), config)
        .with_clock(Arc::new(clock.clone()));
    Harness {
        transport,
        cache,
        clock,
        client,
    }
}

fn key(path: &str) -> CacheKey {
    CacheKey::from_url(&Url::parse(ORIGIN).expect("origin").join(path).expect("path"))
}

#[tokio::test]
async fn test_fresh_entry_is_served_without_dispatch() {
    let h = harness();
    h.transport.respond(
        200,
        &[("etag", "\"v1\""), ("cache-control", "max-age=60")],
        "original",
    );

    let first = h.client.execute(HttpRequest::get("/res")).await.expect("first");
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.origin(), ResponseOrigin::Network);
    assert!(h.cache.contains(&key("/res")));

    h.clock.advance(Duration::from_secs(30));
    let second = h.client.execute(HttpRequest::get("/res")).await.expect("second");

    assert_eq!(h.transport.dispatches(), 1);
    assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(second.origin(), ResponseOrigin::Cache(CacheServe::Direct));
    assert_eq!(second.effective_url().as_str(), CACHE_ORIGIN);
    assert_eq!(second.body(), first.body());
}

#[tokio::test]
async fn test_stale_entry_is_revalidated_and_refreshed() {
    let h = harness();
    h.transport
        .respond(
            200,
            &[("etag", "\"v1\""), ("cache-control", "max-age=60")],
            "original",
        )
        .respond(304, &[("etag", "\"v1\""), ("cache-control", "max-age=60")], "");

    h.client.execute(HttpRequest::get("/res")).await.expect("first");
    h.clock.advance(Duration::from_secs(61));

    let second = h.client.execute(HttpRequest::get("/res")).await.expect("second");

    assert_eq!(h.transport.dispatches(), 2);
    let sent = h.transport.last_request().expect("revalidation request");
    assert_eq!(sent.headers()[IF_NONE_MATCH], "\"v1\"");

    assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(second.origin(), ResponseOrigin::Cache(CacheServe::Revalidated));
    assert_eq!(second.body().as_ref(), b"original");

    let refreshed = h.cache.peek(&key("/res")).expect("entry kept");
    assert_eq!(
        refreshed.expires_at(),
        Some(h.clock_now() + Duration::from_secs(60))
    );
    assert_eq!(h.cache.stats().snapshot().validations, 1);

    // Fresh again: no third dispatch
    h.clock.advance(Duration::from_secs(30));
    let third = h.client.execute(HttpRequest::get("/res")).await.expect("third");
    assert_eq!(h.transport.dispatches(), 2);
    assert_eq!(third.body().as_ref(), b"original");
}

#[tokio::test]
async fn test_private_not_modified_evicts_entry_but_serves_body() {
    let h = harness();
    h.transport
        .respond(200, &[("etag", "\"v1\""), ("cache-control", "max-age=60")], "original")
        .respond(304, &[("etag", "\"v1\""), ("cache-control", "private")], "");

    h.client.execute(HttpRequest::get("/res")).await.expect("first");
    h.clock.advance(Duration::from_secs(61));

    let second = h.client.execute(HttpRequest::get("/res")).await.expect("second");

    assert_eq!(h.transport.dispatches(), 2);
    assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(second.origin(), ResponseOrigin::Cache(CacheServe::Revalidated));
    assert_eq!(second.body().as_ref(), b"original");
    assert!(!h.cache.contains(&key("/res")));
    assert_eq!(h.cache.stats().snapshot().validations, 0);
}

impl Harness {
    fn clock_now(&self) -> std::time::SystemTime {
        use revalid_client::Clock;
        self.clock.now()
    }
}

#[tokio::test]
async fn test_private_response_is_never_stored() {
    let h = harness();
    h.transport
        .respond(
            200,
            &[("cache-control", "private, max-age=60"), ("etag", "\"v1\"")],
            "secret",
        )
        .respond(
            200,
            &[("cache-control", "private, max-age=60"), ("etag", "\"v1\"")],
            "secret",
        );

    h.client.execute(HttpRequest::get("/res")).await.expect("first");
    assert!(!h.cache.contains(&key("/res")));

    h.client.execute(HttpRequest::get("/res")).await.expect("second");
    assert_eq!(h.transport.dispatches(), 2);
    let sent = h.transport.last_request().expect("request");
    assert!(!sent.headers().contains_key(IF_NONE_MATCH));
}

#[tokio::test]
async fn test_post_never_consults_or_populates_cache() {
    let h = harness();
    h.transport
        .respond(
            200,
            &[("etag", "\"v1\""), ("cache-control", "max-age=60")],
            "created",
        )
        .respond(
            200,
            &[("etag", "\"v1\""), ("cache-control", "max-age=60")],
            "created",
        );

    let first = h
        .client
        .execute(HttpRequest::post("/res").body("payload"))
        .await
        .expect("first");
    assert_eq!(first.origin(), ResponseOrigin::Network);
    assert!(h.cache.is_empty());

    h.client
        .execute(HttpRequest::post("/res").body("payload"))
        .await
        .expect("second");
    assert_eq!(h.transport.dispatches(), 2);
    assert!(h.cache.is_empty());
}

#[tokio::test]
async fn test_post_is_not_augmented_even_with_an_entry() {
    let h = harness();
    h.transport
        .respond(200, &[("etag", "\"v1\"")], "body")
        .respond(200, &[], "posted");

    h.client.execute(HttpRequest::get("/res")).await.expect("get");
    h.client.execute(HttpRequest::post("/res")).await.expect("post");

    let sent = h.transport.last_request().expect("post request");
    assert!(sent.headers().is_empty());
    assert!(h.cache.contains(&key("/res")));
}

#[tokio::test]
async fn test_max_age_zero_forces_revalidation() {
    let h = harness();
    h.transport
        .respond(
            200,
            &[("cache-control", "max-age=0"), ("etag", "\"v1\"")],
            "body",
        )
        .respond(304, &[], "");

    h.client.execute(HttpRequest::get("/res")).await.expect("first");
    let second = h.client.execute(HttpRequest::get("/res")).await.expect("second");

    assert_eq!(h.transport.dispatches(), 2);
    assert_eq!(second.origin(), ResponseOrigin::Cache(CacheServe::Revalidated));
    assert_eq!(second.body().as_ref(), b"body");
}

#[tokio::test]
async fn test_validator_only_entry_is_always_revalidated() {
    let h = harness();
    h.transport
        .respond(
            200,
            &[("last-modified", "Sun, 06 Nov 1994 08:49:37 GMT")],
            "body",
        )
        .respond(304, &[], "");

    h.client.execute(HttpRequest::get("/res")).await.expect("first");
    let entry = h.cache.peek(&key("/res")).expect("stored");
    assert_eq!(entry.expires_at(), None);

    let second = h.client.execute(HttpRequest::get("/res")).await.expect("second");
    assert_eq!(h.transport.dispatches(), 2);
    let sent = h.transport.last_request().expect("request");
    assert_eq!(
        sent.headers()[IF_MODIFIED_SINCE],
        "Sun, 06 Nov 1994 08:49:37 GMT"
    );
    assert_eq!(second.body().as_ref(), b"body");
}

#[tokio::test]
async fn test_storing_same_response_twice_is_idempotent() {
    let h = harness();
    let headers = [("etag", "\"abc\""), ("expires", "Sun, 06 Nov 1994 09:49:37 GMT")];
    h.transport
        .respond(200, &headers, "same")
        .respond(200, &headers, "same");

    h.client.execute(HttpRequest::get("/res")).await.expect("first");
    let once = h.cache.peek(&key("/res")).expect("stored");
    let memory = h.cache.memory_usage();

    // Expires is absolute, so a later store computes the same expiration
    h.clock.advance(Duration::from_secs(3601));
    h.client.execute(HttpRequest::get("/res")).await.expect("second");
    let twice = h.cache.peek(&key("/res")).expect("stored");

    assert_eq!(once, twice);
    assert_eq!(h.cache.len(), 1);
    assert_eq!(h.cache.memory_usage(), memory);
}

#[tokio::test]
async fn test_transport_failure_propagates_without_stale_serve() {
    let h = harness();
    h.transport
        .respond(
            200,
            &[("etag", "\"v1\""), ("cache-control", "max-age=60")],
            "body",
        )
        .fail();

    h.client.execute(HttpRequest::get("/res")).await.expect("first");
    h.clock.advance(Duration::from_secs(120));

    let err = h
        .client
        .execute(HttpRequest::get("/res"))
        .await
        .expect_err("transport failure");
    assert!(err.is_connect());
    assert!(h.cache.contains(&key("/res")));
    assert_eq!(h.client.stats().snapshot().transport_errors, 1);
}

#[tokio::test]
async fn test_error_status_passes_through_and_keeps_entry() {
    let h = harness();
    h.transport
        .respond(200, &[("etag", "\"v1\"")], "body")
        .respond(503, &[("cache-control", "max-age=60")], "down");

    h.client.execute(HttpRequest::get("/res")).await.expect("first");
    let second = h.client.execute(HttpRequest::get("/res")).await.expect("second");

    assert_eq!(second.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(second.origin(), ResponseOrigin::Network);
    assert_eq!(second.body().as_ref(), b"down");
    assert_eq!(
        h.cache.peek(&key("/res")).expect("kept").body().as_ref(),
        b"body"
    );
}

#[tokio::test]
async fn test_response_turning_private_removes_entry() {
    let h = harness();
    h.transport
        .respond(200, &[("etag", "\"v1\"")], "public")
        .respond(200, &[("etag", "\"v2\""), ("cache-control", "private")], "mine");

    h.client.execute(HttpRequest::get("/res")).await.expect("first");
    assert!(h.cache.contains(&key("/res")));
    h.client.execute(HttpRequest::get("/res")).await.expect("second");
    assert!(!h.cache.contains(&key("/res")));
}

#[tokio::test]
async fn test_unsolicited_not_modified_passes_through() {
    let h = harness();
    h.transport.respond(304, &[], "");

    let response = h.client.execute(HttpRequest::get("/res")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(response.origin(), ResponseOrigin::Network);
    assert!(h.cache.is_empty());
}

#[tokio::test]
async fn test_query_order_maps_to_one_entry() {
    let h = harness();
    h.transport.respond(
        200,
        &[("cache-control", "max-age=60")],
        "page",
    );

    h.client
        .execute(HttpRequest::get("/shows").query("page", "2").query("sort", "name"))
        .await
        .expect("first");
    let second = h
        .client
        .execute(HttpRequest::get("/shows").query("sort", "name").query("page", "2"))
        .await
        .expect("second");

    assert_eq!(h.transport.dispatches(), 1);
    assert!(second.is_from_cache());
}

#[tokio::test]
async fn test_missing_base_address_is_a_builder_error() {
    let transport = MockTransport::new();
    let client = CachingClient::new(transport.clone(), Arc::new(ResponseCache::default()));

    let err = client
        .execute(HttpRequest::get("/res"))
        .await
        .expect_err("no base address");
    assert!(err.is_builder());
    assert_eq!(transport.dispatches(), 0);
}

#[tokio::test]
async fn test_peek_never_dispatches() {
    let h = harness();
    h.transport.respond(200, &[("cache-control", "max-age=60")], "body");

    assert!(h.client.peek(&HttpRequest::get("/res")).expect("peek").is_none());
    h.client.execute(HttpRequest::get("/res")).await.expect("fill");

    let peeked = h
        .client
        .peek(&HttpRequest::get("/res"))
        .expect("peek")
        .expect("fresh entry");
    assert_eq!(peeked.body().as_ref(), b"body");

    h.clock.advance(Duration::from_secs(61));
    assert!(h.client.peek(&HttpRequest::get("/res")).expect("peek").is_none());
    assert_eq!(h.transport.dispatches(), 1);
}

#[derive(Debug, Deserialize, PartialEq)]
struct Show {
    id: u64,
    name: String,
}

#[tokio::test]
async fn test_execute_json_decodes_network_and_cached_bodies() {
    let h = harness();
    h.transport.respond(
        200,
        &[
            ("content-type", "application/json"),
            ("cache-control", "max-age=60"),
        ],
        r#"{"id":7,"name":"Dark"}"#,
    );

    let expected = Show {
        id: 7,
        name: "Dark".into(),
    };
    let fetched: Show = h
        .client
        .execute_json(HttpRequest::get("/shows/7"))
        .await
        .expect("network");
    let cached: Show = h
        .client
        .execute_json(HttpRequest::get("/shows/7"))
        .await
        .expect("cache");

    assert_eq!(fetched, expected);
    assert_eq!(cached, expected);
    assert_eq!(h.transport.dispatches(), 1);
}

#[tokio::test]
async fn test_null_backend_always_dispatches() {
    let transport = MockTransport::new();
    transport
        .respond(200, &[("cache-control", "max-age=60")], "one")
        .respond(200, &[("cache-control", "max-age=60")], "two");
    let client = CachingClient::with_config(
        transport.clone(),
        Arc::new(NoCache),
        ClientConfig::with_base(Url::parse(ORIGIN).expect("origin")),
    );

    let first = client.execute(HttpRequest::get("/res")).await.expect("first");
    let second = client.execute(HttpRequest::get("/res")).await.expect("second");

    assert_eq!(transport.dispatches(), 2);
    assert_eq!(first.body().as_ref(), b"one");
    assert_eq!(second.body().as_ref(), b"two");
    assert!(!second.is_from_cache());
}

#[tokio::test]
async fn test_client_stats_track_outcomes() {
    let h = harness();
    h.transport
        .respond(200, &[("etag", "\"v1\""), ("cache-control", "max-age=10")], "body")
        .respond(304, &[("cache-control", "max-age=10")], "")
        .respond(404, &[], "missing");

    h.client.execute(HttpRequest::get("/res")).await.expect("store");
    h.client.execute(HttpRequest::get("/res")).await.expect("direct");
    h.clock.advance(Duration::from_secs(11));
    h.client.execute(HttpRequest::get("/res")).await.expect("revalidate");
    h.client.execute(HttpRequest::get("/missing")).await.expect("pass");

    let stats = h.client.stats().snapshot();
    assert_eq!(stats.requests_total, 4);
    assert_eq!(stats.stores, 1);
    assert_eq!(stats.direct_serves, 1);
    assert_eq!(stats.revalidations, 1);
    assert_eq!(stats.pass_throughs, 1);
}

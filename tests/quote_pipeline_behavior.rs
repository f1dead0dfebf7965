//! Behavior-driven tests for the quote pipeline
//!
//! These tests drive `QuoteService` end to end against a scripted transport,
//! checking what the user gets back and how many requests reach the wire.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use ferroquote_core::{
    parse_quote, HttpClient, HttpError, HttpRequest, HttpResponse, Market, QueryError,
    QueryErrorKind, QuoteClientConfig, QuoteFetcher, QuoteService, QuoteStatus, RetryPolicy,
};

// =============================================================================
// Test transport
// =============================================================================

#[derive(Default)]
struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("lock").clone()
    }

    fn call_count(&self) -> usize {
        self.requests.lock().expect("lock").len()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests.lock().expect("lock").push(request);
        let next = self
            .responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::other("no scripted response left")));
        Box::pin(async move { next })
    }
}

fn service_with(client: &Arc<ScriptedHttpClient>, retry: RetryPolicy) -> QuoteService {
    let config = QuoteClientConfig::default().with_retry(retry);
    QuoteService::new(QuoteFetcher::with_http_client(client.clone(), config))
}

/// Provider-shaped body: `v_<symbol>="f0~f1~...";` encoded as GBK.
fn provider_body(symbol: &str, fields: &[(usize, &str)], count: usize) -> Vec<u8> {
    let mut values = vec![String::new(); count];
    for &(offset, value) in fields {
        values[offset] = value.to_owned();
    }
    let line = format!("v_{symbol}=\"{}\";\n", values.join("~"));
    let (bytes, _, had_errors) = encoding_rs::GBK.encode(&line);
    assert!(!had_errors, "fixture must be GBK encodable");
    bytes.into_owned()
}

fn moutai_fields() -> Vec<(usize, &'static str)> {
    vec![
        (0, "1"),
        (1, "贵州茅台"),
        (2, "600519"),
        (3, "1688.00"),
        (4, "1675.50"),
        (5, "1680.00"),
        (6, "23456"),
        (30, "20240510150003"),
        (31, "12.50"),
        (32, "0.75"),
        (33, "1699.99"),
        (34, "1671.20"),
        (37, "395678.12"),
    ]
}

fn synthetic_line(name: &str, volume: &str, amount: &str) -> String {
    let mut fields = vec![""; 38];
    fields[1] = name;
    fields[3] = "1700.1";
    fields[6] = volume;
    fields[37] = amount;
    fields.join("~")
}

// =============================================================================
// Successful lookups
// =============================================================================

#[tokio::test]
async fn user_gets_a_share_quote_with_volume_in_shares_and_amount_in_yuan() {
    // Given: The provider knows Kweichow Moutai
    let body = provider_body("sh600519", &moutai_fields(), 50);
    let client = ScriptedHttpClient::new(vec![Ok(HttpResponse::new(200, body))]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    // When: The user asks for 600519 without a market
    let record = service.query("600519", None).await.expect("quote");

    // Then: The record is normalized and A-share units are converted
    assert_eq!(record.code, "600519");
    assert_eq!(record.name, "贵州茅台");
    assert_eq!(record.market, Market::Sh);
    assert_eq!(record.current_price, 1688.0);
    assert_eq!(record.prev_close, 1675.5);
    assert_eq!(record.open, 1680.0);
    assert_eq!(record.high, 1699.99);
    assert_eq!(record.low, 1671.2);
    assert_eq!(record.change, 12.5);
    assert_eq!(record.change_percent, 0.75);
    assert_eq!(record.volume, 2_345_600);
    assert!((record.amount - 3_956_781_200.0).abs() < 1e-3);
    assert_eq!(record.time, "20240510150003");
    assert_eq!(record.status, QuoteStatus::Success);

    // And: Exactly one request went to the provider symbol URL
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://qt.gtimg.cn/q=sh600519");
    assert_eq!(requests[0].timeout, Duration::from_secs(10));
}

#[tokio::test]
async fn prefixed_hong_kong_ticker_is_padded_for_request_and_display() {
    let body = provider_body(
        "hk00700",
        &[(1, "腾讯控股"), (3, "320.4"), (6, "15000000.0"), (37, "4800000000")],
        40,
    );
    let client = ScriptedHttpClient::new(vec![Ok(HttpResponse::new(200, body))]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    let record = service.query("hk700", None).await.expect("quote");

    assert_eq!(client.requests()[0].url, "https://qt.gtimg.cn/q=hk00700");
    assert_eq!(record.code, "00700");
    assert_eq!(record.market, Market::Hk);
    assert_eq!(record.volume, 15_000_000);
    assert_eq!(record.amount, 4_800_000_000.0);
}

#[tokio::test]
async fn explicit_market_overrides_detection() {
    let body = provider_body("usAAPL", &[(1, "Apple Inc."), (3, "182.4"), (6, "5000")], 40);
    let client = ScriptedHttpClient::new(vec![Ok(HttpResponse::new(200, body))]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    let record = service.query("aapl", Some("us")).await.expect("quote");

    assert_eq!(client.requests()[0].url, "https://qt.gtimg.cn/q=usAAPL");
    assert_eq!(record.code, "AAPL");
    assert_eq!(record.market, Market::Us);
    assert_eq!(record.volume, 5000);
}

// =============================================================================
// Unit conversion
// =============================================================================

#[test]
fn a_share_lines_are_scaled_from_lots_and_ten_thousands() {
    let raw = synthetic_line("Kweichow Moutai", "123", "456");

    let record = parse_quote(&raw, "600519", Market::Sh).expect("parse");

    assert_eq!(record.volume, 12_300);
    assert_eq!(record.amount, 4_560_000.0);
}

#[test]
fn us_lines_pass_volume_and_amount_through() {
    let raw = synthetic_line("Kweichow Moutai", "123", "456");

    let record = parse_quote(&raw, "600519", Market::Us).expect("parse");

    assert_eq!(record.volume, 123);
    assert_eq!(record.amount, 456.0);
}

#[test]
fn hong_kong_lines_pass_through_after_truncating_volume() {
    let raw = synthetic_line("Tencent", "123.9", "456");

    let record = parse_quote(&raw, "700", Market::Hk).expect("parse");

    assert_eq!(record.volume, 123);
    assert_eq!(record.amount, 456.0);
}

// =============================================================================
// Not found and malformed responses
// =============================================================================

#[test]
fn empty_name_is_not_found_whatever_the_other_fields_say() {
    let raw = synthetic_line("", "123", "456");

    let error = parse_quote(&raw, "SH600519", Market::Sh).expect_err("must fail");

    assert_eq!(error.kind(), QueryErrorKind::NotFound);
    assert!(error.to_string().contains("600519"));
    assert!(!error.to_string().contains("SH600519"));
}

#[test]
fn truncated_line_never_yields_a_partial_record() {
    let raw = vec!["x"; 34].join("~");

    let error = parse_quote(&raw, "600519", Market::Sh).expect_err("must fail");

    assert_eq!(error.kind(), QueryErrorKind::ParseFailure);
    assert!(error.to_string().contains("incomplete data"));
}

#[tokio::test]
async fn empty_provider_assignment_is_reported_as_not_found() {
    let client = ScriptedHttpClient::new(vec![Ok(HttpResponse::new(
        200,
        b"v_sh699999=\"\";\n".to_vec(),
    ))]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    let error = service.query("sh699999", None).await.expect_err("must fail");

    assert_eq!(error, QueryError::not_found("699999"));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn blank_body_is_reported_as_not_found() {
    let client = ScriptedHttpClient::new(vec![Ok(HttpResponse::new(200, b" \n".to_vec()))]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    let error = service.query("AAPL", None).await.expect_err("must fail");

    assert_eq!(error.kind(), QueryErrorKind::NotFound);
}

#[tokio::test]
async fn short_provider_line_is_a_parse_failure() {
    let body = provider_body("sz000001", &[(1, "平安银行")], 20);
    let client = ScriptedHttpClient::new(vec![Ok(HttpResponse::new(200, body))]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    let error = service.query("000001", None).await.expect_err("must fail");

    assert_eq!(error.kind(), QueryErrorKind::ParseFailure);
}

// =============================================================================
// Validation happens before the network
// =============================================================================

#[tokio::test]
async fn invalid_ticker_is_rejected_without_a_network_call() {
    let client = ScriptedHttpClient::new(Vec::new());
    let service = service_with(&client, RetryPolicy::immediate(1));

    let error = service.query("abc$%", None).await.expect_err("must fail");

    assert_eq!(error.kind(), QueryErrorKind::InputValidation);
    assert!(error.to_string().contains("abc$%"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn invalid_market_is_rejected_without_a_network_call() {
    let client = ScriptedHttpClient::new(Vec::new());
    let service = service_with(&client, RetryPolicy::immediate(1));

    let error = service.query("600519", Some("jp")).await.expect_err("must fail");

    assert_eq!(error.kind(), QueryErrorKind::InputValidation);
    assert!(error.to_string().contains("hk, sh, sz, us"));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn padded_or_uppercase_input_is_rejected_without_a_network_call() {
    let client = ScriptedHttpClient::new(Vec::new());
    let service = service_with(&client, RetryPolicy::immediate(1));

    for (ticker, market) in [(" 600519 ", None), ("600519", Some(" SH ")), ("600519", Some("SH"))] {
        let error = service.query(ticker, market).await.expect_err("must fail");
        assert_eq!(error.kind(), QueryErrorKind::InputValidation, "{ticker:?} {market:?}");
    }
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn unresolvable_ticker_fails_without_a_network_call() {
    let client = ScriptedHttpClient::new(Vec::new());
    let service = service_with(&client, RetryPolicy::immediate(1));

    let error = service.query("ABCDEFG", None).await.expect_err("must fail");

    assert_eq!(error.kind(), QueryErrorKind::MarketUnresolved);
    assert!(error.to_string().contains("ABCDEFG"));
    assert_eq!(client.call_count(), 0);
}

// =============================================================================
// Rate limiting and transport failures
// =============================================================================

#[tokio::test]
async fn rate_limited_request_is_retried_once_and_succeeds() {
    let body = provider_body("sh600519", &moutai_fields(), 50);
    let client = ScriptedHttpClient::new(vec![
        Ok(HttpResponse::new(429, Vec::new())),
        Ok(HttpResponse::new(200, body)),
    ]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    let record = service.query("600519", None).await.expect("quote after retry");

    assert_eq!(record.name, "贵州茅台");
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn second_rate_limit_is_surfaced_without_further_retries() {
    let client = ScriptedHttpClient::new(vec![
        Ok(HttpResponse::new(429, Vec::new())),
        Ok(HttpResponse::new(429, Vec::new())),
        Ok(HttpResponse::new(200, Vec::new())),
    ]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    let error = service.query("600519", None).await.expect_err("must fail");

    assert_eq!(error, QueryError::http(429, "Too Many Requests"));
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn retry_waits_for_the_configured_delay() {
    let body = provider_body("sh600519", &moutai_fields(), 50);
    let client = ScriptedHttpClient::new(vec![
        Ok(HttpResponse::new(429, Vec::new())),
        Ok(HttpResponse::new(200, body)),
    ]);
    let service = service_with(&client, RetryPolicy::fixed(Duration::from_millis(30), 1));

    let started = Instant::now();
    service.query("600519", None).await.expect("quote");

    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn server_error_is_reported_with_status_and_reason() {
    let client = ScriptedHttpClient::new(vec![Ok(HttpResponse::new(500, Vec::new()))]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    let error = service.query("600519", None).await.expect_err("must fail");

    assert_eq!(error.to_string(), "HTTP request failed: 500 Internal Server Error");
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn timeout_is_a_network_failure_and_not_retried() {
    let client = ScriptedHttpClient::new(vec![
        Err(HttpError::timeout("operation timed out")),
        Ok(HttpResponse::new(200, Vec::new())),
    ]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    let error = service.query("AAPL", None).await.expect_err("must fail");

    assert_eq!(error.kind(), QueryErrorKind::NetworkFailure);
    assert!(error.to_string().contains("request timeout: operation timed out"));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn connection_failure_is_named_in_the_network_error() {
    // Given: The provider host refuses the connection
    let client = ScriptedHttpClient::new(vec![Err(HttpError::connect("connection refused"))]);
    let service = service_with(&client, RetryPolicy::immediate(1));

    // When: Querying
    let error = service.query("600519", None).await.expect_err("must fail");

    // Then: The failure category is part of the message and nothing is retried
    assert_eq!(error.kind(), QueryErrorKind::NetworkFailure);
    assert!(error.to_string().contains("connection failed: connection refused"));
    assert_eq!(client.call_count(), 1);
}

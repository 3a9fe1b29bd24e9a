//! Tests for the aggregator
//!
//! Sources are played by one-shot local HTTP servers; the end-to-end case at
//! the bottom walks the merged set through the quality filter as well.

use std::net::SocketAddr;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::{Aggregator, AggregatorConfig, FilterPolicy, PipelineError, QualityFilter};
use subtrawl_sources::{FetcherConfig, SourceFetcher};

/// Serve one canned response per accepted connection, then stop
async fn serve_responses(responses: Vec<String>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    addr
}

fn http_ok(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

fn aggregator(workers: usize) -> Aggregator {
    let fetcher = SourceFetcher::new(
        FetcherConfig::default()
            .with_timeout(Duration::from_millis(300))
            .with_max_retry(0),
    )
    .unwrap();
    Aggregator::new(fetcher, AggregatorConfig::default().with_workers(workers))
}

fn vmess(json: &str) -> String {
    format!("vmess://{}", STANDARD.encode(json))
}

#[tokio::test]
async fn test_aggregate_merges_sources() {
    let addr_a = serve_responses(vec![http_ok("trojan://pw@a.example.com:443")]).await;
    let addr_b = serve_responses(vec![http_ok("trojan://pw@b.example.com:443")]).await;

    let result = aggregator(4)
        .aggregate(&[
            format!("http://{addr_a}/sub"),
            format!("http://{addr_b}/sub"),
        ])
        .await
        .unwrap();

    assert_eq!(result.nodes.len(), 2);
    assert_eq!(result.summary.sources_succeeded, 2);
    assert_eq!(result.summary.sources_failed, 0);
}

#[tokio::test]
async fn test_aggregate_no_exact_duplicates_survive() {
    let body = "trojan://pw@same.example.com:443";
    let addr_a = serve_responses(vec![http_ok(body)]).await;
    let addr_b = serve_responses(vec![http_ok(body)]).await;

    let result = aggregator(4)
        .aggregate(&[
            format!("http://{addr_a}/sub"),
            format!("http://{addr_b}/sub"),
        ])
        .await
        .unwrap();

    assert_eq!(result.nodes.len(), 1);
    assert_eq!(result.summary.raw_duplicates, 1);
}

#[tokio::test]
async fn test_aggregate_empty_source_counts_failed_but_does_not_block() {
    let addr_ok = serve_responses(vec![http_ok("trojan://pw@a.example.com:443")]).await;
    let addr_empty = serve_responses(vec![http_ok("no nodes in here")]).await;

    let result = aggregator(4)
        .aggregate(&[
            format!("http://{addr_ok}/sub"),
            format!("http://{addr_empty}/sub"),
        ])
        .await
        .unwrap();

    assert_eq!(result.nodes.len(), 1);
    assert_eq!(result.summary.sources_succeeded, 1);
    assert_eq!(result.summary.sources_failed, 1);
}

#[tokio::test]
async fn test_aggregate_total_failure_is_the_only_error() {
    let addr = serve_responses(vec![http_ok("nothing useful")]).await;

    let err = aggregator(2)
        .aggregate(&[format!("http://{addr}/sub")])
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::NoNodes { sources: 1 }));
}

#[tokio::test]
async fn test_aggregate_no_sources() {
    let err = aggregator(2).aggregate(&[]).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoNodes { sources: 0 }));
}

#[tokio::test]
async fn test_sequential_tier_fetches_all_sources() {
    let addr_a = serve_responses(vec![http_ok("trojan://pw@a.example.com:443")]).await;
    let addr_b = serve_responses(vec![http_ok("trojan://pw@b.example.com:443")]).await;

    let results = aggregator(4)
        .fetch_sequential(&[
            format!("http://{addr_a}/sub"),
            format!("http://{addr_b}/sub"),
        ])
        .await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.is_productive()));
}

#[tokio::test]
async fn test_concurrent_tier_bounded_by_one_worker() {
    // With a single worker the fan-out degenerates to sequential order but
    // must still return one result per source.
    let addr_a = serve_responses(vec![http_ok("trojan://pw@a.example.com:443")]).await;
    let addr_b = serve_responses(vec![http_ok("trojan://pw@b.example.com:443")]).await;

    let results = aggregator(1)
        .fetch_concurrent(&[
            format!("http://{addr_a}/sub"),
            format!("http://{addr_b}/sub"),
        ])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_end_to_end_merge_and_filter() {
    // Source A: three valid descriptors plus one extractable-but-malformed
    // vmess (payload is Base64 of non-JSON).
    let valid_vmess = vmess(r#"{"add":"1.2.3.4","port":443,"ps":"original"}"#);
    let malformed_vmess = format!("vmess://{}", STANDARD.encode("this is not json at all"));
    let body_a = format!(
        "{valid_vmess}\ntrojan://pw@relay.example.com:443\nss://YWVzLTI1Ni1nY206cHc=@10.0.0.1:8388\n{malformed_vmess}"
    );

    // Source B: Base64-encoded payload, two valid descriptors, one of which
    // duplicates a source-A node by identity (same host/port, new name).
    let duplicate_vmess = vmess(r#"{"add":"1.2.3.4","port":443,"ps":"renamed"}"#);
    let body_b = STANDARD.encode(format!(
        "{duplicate_vmess}\ntrojan://pw@other.example.com:443"
    ));

    let addr_a = serve_responses(vec![http_ok(&body_a)]).await;
    let addr_b = serve_responses(vec![http_ok(&body_b)]).await;

    let result = aggregator(4)
        .aggregate(&[
            format!("http://{addr_a}/sub"),
            format!("http://{addr_b}/sub"),
        ])
        .await
        .unwrap();

    // 4 + 2 extracted, minus the identity duplicate.
    assert_eq!(result.summary.nodes_extracted, 6);
    assert_eq!(result.summary.identity_duplicates, 1);
    assert_eq!(result.nodes.len(), 5);

    // The quality filter then drops the malformed vmess: 3 + 2 - 1 - 1 = 4.
    let filter = QualityFilter::new(FilterPolicy::default());
    let kept = filter.apply(result.nodes);
    assert_eq!(kept.len(), 4);
}

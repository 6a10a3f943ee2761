//! Remote source fetching.
//!
//! Downloads every configured source sequentially over one reused HTTP
//! client and merges the results into a single ordered line sequence.
//! Base64 sources are decoded before line splitting. A failing source is
//! logged and skipped; it never aborts the run or affects lines gathered
//! from other sources.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::models::{Source, SourceKind};

/// Per-source counters for the end-of-run summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchReport {
    pub sources_ok: usize,
    pub sources_skipped: usize,
}

/// Build the shared HTTP client with the configured request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch every source in declared order and merge their lines.
///
/// Sources are fetched one at a time over `client`; the caller controls the
/// ordering (plain sources first, then base64 sources). Lines keep their
/// original document order, and duplicates across sources are retained.
pub async fn fetch_all(client: &reqwest::Client, sources: &[Source]) -> (Vec<String>, FetchReport) {
    let mut lines = Vec::new();
    let mut report = FetchReport::default();

    for source in sources {
        let body = match fetch_source(client, source).await {
            Ok(body) => body,
            Err(e) => {
                eprintln!("Warning: failed to fetch {}: {:#}", source.url, e);
                report.sources_skipped += 1;
                continue;
            }
        };

        let before = lines.len();
        lines.extend(split_lines(&body));
        println!("fetched {} ({} lines)", source.url, lines.len() - before);
        report.sources_ok += 1;
    }

    (lines, report)
}

/// Download one source and return its text body, decoding base64 sources.
async fn fetch_source(client: &reqwest::Client, source: &Source) -> Result<String> {
    let response = client.get(&source.url).send().await?;

    let status = response.status();
    if !status.is_success() {
        bail!("HTTP status {}", status);
    }

    let body = response
        .text()
        .await
        .context("failed to read response body")?;

    match source.kind {
        SourceKind::Plain => Ok(body),
        SourceKind::Base64 => decode_base64_body(&body),
    }
}

/// Decode a base64 response body into UTF-8 text.
fn decode_base64_body(body: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(body.trim())
        .context("invalid base64 payload")?;
    String::from_utf8(bytes).context("decoded payload is not valid UTF-8")
}

/// Split a body on line boundaries, trimming whitespace and dropping blank
/// lines.
fn split_lines(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn plain(url: String) -> Source {
        Source {
            url,
            kind: SourceKind::Plain,
        }
    }

    fn base64_source(url: String) -> Source {
        Source {
            url,
            kind: SourceKind::Base64,
        }
    }

    async fn mount_body(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[test]
    fn split_lines_trims_and_drops_blanks() {
        let body = "  alpha  \n\n\tbeta\n   \ngamma\n";
        assert_eq!(split_lines(body), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn split_lines_handles_crlf() {
        let body = "one\r\ntwo\r\n";
        assert_eq!(split_lines(body), vec!["one", "two"]);
    }

    #[test]
    fn split_lines_empty_body_yields_nothing() {
        assert!(split_lines("").is_empty());
        assert!(split_lines("\n\n  \n").is_empty());
    }

    #[test]
    fn decode_base64_round_trip() {
        let encoded = STANDARD.encode("first\nsecond");
        assert_eq!(decode_base64_body(&encoded).unwrap(), "first\nsecond");
    }

    #[test]
    fn decode_base64_tolerates_surrounding_whitespace() {
        let encoded = format!("  {}\n", STANDARD.encode("entry"));
        assert_eq!(decode_base64_body(&encoded).unwrap(), "entry");
    }

    #[test]
    fn decode_base64_rejects_malformed_input() {
        let err = decode_base64_body("this is not base64!!!").unwrap_err();
        assert!(err.to_string().contains("invalid base64"));
    }

    #[test]
    fn decode_base64_rejects_non_utf8_payload() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0xfd]);
        let err = decode_base64_body(&encoded).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[tokio::test]
    async fn fetches_plain_then_base64_in_order() {
        let server = MockServer::start().await;
        mount_body(&server, "/plain", "p1\np2\n").await;
        mount_body(&server, "/enc", &STANDARD.encode("b1\nb2")).await;

        let sources = vec![
            plain(format!("{}/plain", server.uri())),
            base64_source(format!("{}/enc", server.uri())),
        ];
        let client = build_client(Duration::from_secs(5)).unwrap();
        let (lines, report) = fetch_all(&client, &sources).await;

        assert_eq!(lines, vec!["p1", "p2", "b1", "b2"]);
        assert_eq!(report.sources_ok, 2);
        assert_eq!(report.sources_skipped, 0);
    }

    #[tokio::test]
    async fn non_success_status_skips_only_that_source() {
        let server = MockServer::start().await;
        mount_body(&server, "/good", "kept\n").await;
        Mock::given(method("GET"))
            .and(path("/bad"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let sources = vec![
            plain(format!("{}/bad", server.uri())),
            plain(format!("{}/good", server.uri())),
        ];
        let client = build_client(Duration::from_secs(5)).unwrap();
        let (lines, report) = fetch_all(&client, &sources).await;

        assert_eq!(lines, vec!["kept"]);
        assert_eq!(report.sources_ok, 1);
        assert_eq!(report.sources_skipped, 1);
    }

    #[tokio::test]
    async fn malformed_base64_source_skips_only_that_source() {
        let server = MockServer::start().await;
        mount_body(&server, "/broken", "%%% not base64 %%%").await;
        mount_body(&server, "/ok", &STANDARD.encode("survivor")).await;

        let sources = vec![
            base64_source(format!("{}/broken", server.uri())),
            base64_source(format!("{}/ok", server.uri())),
        ];
        let client = build_client(Duration::from_secs(5)).unwrap();
        let (lines, report) = fetch_all(&client, &sources).await;

        assert_eq!(lines, vec!["survivor"]);
        assert_eq!(report.sources_ok, 1);
        assert_eq!(report.sources_skipped, 1);
    }

    #[tokio::test]
    async fn unreachable_host_skips_without_aborting() {
        // Nothing listens on the mock server once it is dropped.
        let dead_uri = {
            let server = MockServer::start().await;
            server.uri()
        };

        let server = MockServer::start().await;
        mount_body(&server, "/live", "alive\n").await;

        let sources = vec![
            plain(format!("{}/gone", dead_uri)),
            plain(format!("{}/live", server.uri())),
        ];
        let client = build_client(Duration::from_secs(5)).unwrap();
        let (lines, report) = fetch_all(&client, &sources).await;

        assert_eq!(lines, vec!["alive"]);
        assert_eq!(report.sources_skipped, 1);
    }

    #[tokio::test]
    async fn all_sources_failing_yields_empty_lines() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let sources = vec![plain(format!("{}/missing", server.uri()))];
        let client = build_client(Duration::from_secs(5)).unwrap();
        let (lines, report) = fetch_all(&client, &sources).await;

        assert!(lines.is_empty());
        assert_eq!(report.sources_ok, 0);
        assert_eq!(report.sources_skipped, 1);
    }

    #[tokio::test]
    async fn duplicate_lines_across_sources_are_retained() {
        let server = MockServer::start().await;
        mount_body(&server, "/a", "same\nunique-a\n").await;
        mount_body(&server, "/b", "same\nunique-b\n").await;

        let sources = vec![
            plain(format!("{}/a", server.uri())),
            plain(format!("{}/b", server.uri())),
        ];
        let client = build_client(Duration::from_secs(5)).unwrap();
        let (lines, _) = fetch_all(&client, &sources).await;

        assert_eq!(lines, vec!["same", "unique-a", "same", "unique-b"]);
    }
}

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, SyncError};
use crate::models::{NewStationRecord, PageResponse, RawStationRecord, RecordPage};

/// Transport for one page of the collection.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<RecordPage>;
}

/// Transport for creating records, used by the bulk import.
#[allow(async_fn_in_trait)]
pub trait RecordSink {
    async fn create(&self, record: &NewStationRecord) -> Result<()>;
}

/// Produces the `t` query value: wall-clock millis, bumped so that no two
/// requests from this process ever share a value.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(previous + 1);
            match self.last.compare_exchange_weak(
                previous,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}

/// PocketBase-style REST collection reached over HTTP.
pub struct HttpRecordSource {
    client: reqwest::Client,
    records_url: String,
    cache_buster: CacheBuster,
}

impl HttpRecordSource {
    pub fn new(base_url: &str, collection: &str, request_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            records_url: records_url(base_url, collection),
            cache_buster: CacheBuster::new(),
        })
    }

    pub fn records_url(&self) -> &str {
        &self.records_url
    }
}

pub fn records_url(base_url: &str, collection: &str) -> String {
    format!(
        "{}/api/collections/{}/records",
        base_url.trim_end_matches('/'),
        collection
    )
}

/// Turn a non-2xx response into `SyncError::Http`, keeping whatever body came back.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SyncError::Http {
        status: status.as_u16(),
        body,
    })
}

impl PageSource for HttpRecordSource {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<RecordPage> {
        let cache_buster = self.cache_buster.next();
        let response = self
            .client
            .get(&self.records_url)
            .query(&[
                ("perPage", per_page.to_string()),
                ("page", page.to_string()),
                ("t", cache_buster.to_string()),
            ])
            .send()
            .await?;

        let body = ensure_success(response).await?.text().await?;
        let parsed: PageResponse = serde_json::from_str(&body)
            .map_err(|e| SyncError::MalformedResponse(format!("page {}: {}", page, e)))?;

        parsed.into_page(page)
    }
}

impl RecordSink for HttpRecordSource {
    async fn create(&self, record: &NewStationRecord) -> Result<()> {
        let response = self
            .client
            .post(&self.records_url)
            .json(record)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Walks every page of a collection in order and concatenates the items.
pub struct RecordFetcher<S> {
    source: S,
    page_size: u32,
    max_pages: u32,
}

impl<S: PageSource> RecordFetcher<S> {
    pub fn new(source: S, page_size: u32, max_pages: u32) -> Self {
        Self {
            source,
            page_size,
            max_pages,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch pages `1..=totalPages`, re-reading `totalPages` from every response.
    ///
    /// Any failing page abandons the whole retrieval; callers never see a
    /// truncated record set.
    pub async fn fetch_all(&self) -> Result<Vec<RawStationRecord>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.source.fetch_page(page, self.page_size).await?;

            if batch.total_pages > self.max_pages {
                return Err(SyncError::PageLimitExceeded {
                    total_pages: batch.total_pages,
                    limit: self.max_pages,
                });
            }

            debug!(
                page,
                total_pages = batch.total_pages,
                items = batch.items.len(),
                "fetched page"
            );

            all_items.extend(batch.items);
            page += 1;

            if page > batch.total_pages {
                break;
            }
        }

        Ok(all_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    enum Step {
        Page { total_pages: u32, items: usize },
        Status(u16),
    }

    struct ScriptedSource {
        steps: Mutex<VecDeque<Step>>,
        requests: Mutex<Vec<(u32, u32)>>,
    }

    impl ScriptedSource {
        fn new(steps: Vec<Step>) -> Self {
            Self {
                steps: Mutex::new(steps.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requested_pages(&self) -> Vec<u32> {
            self.requests.lock().unwrap().iter().map(|(p, _)| *p).collect()
        }
    }

    impl PageSource for ScriptedSource {
        async fn fetch_page(&self, page: u32, per_page: u32) -> Result<RecordPage> {
            self.requests.lock().unwrap().push((page, per_page));
            match self.steps.lock().unwrap().pop_front() {
                Some(Step::Page { total_pages, items }) => {
                    let items = (0..items)
                        .map(|i| RawStationRecord {
                            id: Some(format!("p{}-{}", page, i)),
                            lat: Some(45.0),
                            lon: Some(9.0),
                            ..Default::default()
                        })
                        .collect();
                    Ok(RecordPage::new(page, total_pages, items))
                }
                Some(Step::Status(status)) => Err(SyncError::Http {
                    status,
                    body: String::new(),
                }),
                None => panic!("unexpected request for page {}", page),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_all_concatenates_pages() {
        let source = ScriptedSource::new(vec![
            Step::Page { total_pages: 3, items: 500 },
            Step::Page { total_pages: 3, items: 500 },
            Step::Page { total_pages: 3, items: 10 },
        ]);
        let fetcher = RecordFetcher::new(source, 500, 100);

        let records = fetcher.fetch_all().await.unwrap();

        assert_eq!(records.len(), 1010);
        assert_eq!(fetcher.source().requested_pages(), vec![1, 2, 3]);
        assert!(fetcher
            .source()
            .requests
            .lock()
            .unwrap()
            .iter()
            .all(|(_, per_page)| *per_page == 500));

        let mut ids: Vec<_> = records.iter().filter_map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 1010);
    }

    #[tokio::test]
    async fn test_empty_collection_requests_one_page() {
        let source = ScriptedSource::new(vec![Step::Page { total_pages: 0, items: 0 }]);
        let fetcher = RecordFetcher::new(source, 500, 100);

        let records = fetcher.fetch_all().await.unwrap();

        assert!(records.is_empty());
        assert_eq!(fetcher.source().requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_follows_latest_total_pages() {
        // The collection grows from 2 to 3 pages while we are reading it
        let source = ScriptedSource::new(vec![
            Step::Page { total_pages: 2, items: 2 },
            Step::Page { total_pages: 3, items: 2 },
            Step::Page { total_pages: 3, items: 1 },
        ]);
        let fetcher = RecordFetcher::new(source, 2, 100);

        let records = fetcher.fetch_all().await.unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(fetcher.source().requested_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_shrinking_collection_stops_early() {
        let source = ScriptedSource::new(vec![
            Step::Page { total_pages: 3, items: 2 },
            Step::Page { total_pages: 2, items: 2 },
        ]);
        let fetcher = RecordFetcher::new(source, 2, 100);

        let records = fetcher.fetch_all().await.unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(fetcher.source().requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_http_error_abandons_retrieval() {
        let source = ScriptedSource::new(vec![
            Step::Page { total_pages: 3, items: 500 },
            Step::Status(500),
        ]);
        let fetcher = RecordFetcher::new(source, 500, 100);

        let result = fetcher.fetch_all().await;

        assert!(matches!(result, Err(SyncError::Http { status: 500, .. })));
        assert_eq!(fetcher.source().requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_page_limit() {
        let source = ScriptedSource::new(vec![Step::Page { total_pages: 1_000_000, items: 1 }]);
        let fetcher = RecordFetcher::new(source, 500, 1000);

        let result = fetcher.fetch_all().await;

        assert!(matches!(
            result,
            Err(SyncError::PageLimitExceeded {
                total_pages: 1_000_000,
                limit: 1000
            })
        ));
    }

    #[test]
    fn test_cache_buster_strictly_increases() {
        let buster = CacheBuster::new();
        let mut previous = buster.next();
        for _ in 0..1000 {
            let next = buster.next();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_records_url() {
        assert_eq!(
            records_url("http://127.0.0.1:8090/", "stations"),
            "http://127.0.0.1:8090/api/collections/stations/records"
        );
    }

    /// Minimal HTTP/1.1 responder: answers one connection per canned
    /// `(status line, body)` pair and records each request line.
    async fn serve_canned(
        responses: Vec<(&'static str, String)>,
    ) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let request_lines = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&request_lines);

        tokio::spawn(async move {
            for (status_line, body) in responses {
                let (mut stream, _) = listener.accept().await.unwrap();

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                let head = String::from_utf8_lossy(&head);
                let first_line = head.lines().next().unwrap_or_default().to_string();
                recorded.lock().unwrap().push(first_line);

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
        });

        (base_url, request_lines)
    }

    fn page_body(page: u32, total_pages: u32) -> String {
        format!(
            r#"{{"page":{page},"perPage":2,"totalItems":3,"totalPages":{total_pages},"items":[{{"id":"r{page}","lat":45.0,"lon":9.0,"parameter":"pm25","value":12.5}}]}}"#
        )
    }

    fn query_value<'a>(request_line: &'a str, key: &str) -> Option<&'a str> {
        let target = request_line.split_whitespace().nth(1)?;
        let (_, query) = target.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    #[tokio::test]
    async fn test_http_pages_carry_query_and_distinct_cache_buster() {
        let (base_url, request_lines) =
            serve_canned(vec![("200 OK", page_body(1, 2)), ("200 OK", page_body(2, 2))]).await;
        let source =
            HttpRecordSource::new(&base_url, "stations", Some(Duration::from_secs(5))).unwrap();
        let fetcher = RecordFetcher::new(source, 2, 100);

        let records = fetcher.fetch_all().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id.as_deref(), Some("r2"));

        let lines = request_lines.lock().unwrap().clone();
        assert_eq!(lines.len(), 2);
        for (i, line) in lines.iter().enumerate() {
            assert!(line.starts_with("GET /api/collections/stations/records?"), "{}", line);
            assert_eq!(query_value(line, "perPage"), Some("2"));
            assert_eq!(query_value(line, "page"), Some((i + 1).to_string().as_str()));
        }

        let first_t: u64 = query_value(&lines[0], "t").unwrap().parse().unwrap();
        let second_t: u64 = query_value(&lines[1], "t").unwrap().parse().unwrap();
        assert!(second_t > first_t);
    }

    #[tokio::test]
    async fn test_http_error_status_keeps_body() {
        let (base_url, _) =
            serve_canned(vec![("503 Service Unavailable", "maintenance".to_string())]).await;
        let source =
            HttpRecordSource::new(&base_url, "stations", Some(Duration::from_secs(5))).unwrap();

        let result = source.fetch_page(1, 500).await;

        match result {
            Err(SyncError::Http { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let (base_url, _) = serve_canned(vec![("200 OK", "<html>login</html>".to_string())]).await;
        let source =
            HttpRecordSource::new(&base_url, "stations", Some(Duration::from_secs(5))).unwrap();

        let result = source.fetch_page(1, 500).await;

        assert!(matches!(result, Err(SyncError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_network_error() {
        // Bind then release a port so nothing is listening on it
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let base_url = format!("http://127.0.0.1:{}", port);
        let source =
            HttpRecordSource::new(&base_url, "stations", Some(Duration::from_secs(2))).unwrap();

        let result = source.fetch_page(1, 500).await;

        assert!(matches!(result, Err(SyncError::Network(_))));
    }
}

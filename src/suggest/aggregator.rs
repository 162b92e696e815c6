//! Dual-source suggestion fetch and merge

use super::live::LiveSuggestions;
use super::models::{SourceRole, SuggestionRecord, SuggestionSet};
use super::source::SuggestionSource;
use super::sources::{BoundarySource, GeocoderSource};
use crate::config::Settings;
use crate::error::SuggestError;
use crate::network::{FetchOptions, HttpClient};
use futures::future::try_join;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Combines the geocoder and boundary sources into one ordered suggestion set
pub struct SuggestionAggregator {
    /// HTTP client shared by both sources
    client: HttpClient,
    /// Fills the geocoder slot
    geocoder: Arc<dyn SuggestionSource>,
    /// Fills the boundary slot
    boundary: Arc<dyn SuggestionSource>,
    /// Set observed by live viewers
    live: LiveSuggestions,
}

impl SuggestionAggregator {
    /// Create an aggregator over the configured geocoder and boundary services
    pub fn new(client: HttpClient, settings: &Settings) -> Result<Self, SuggestError> {
        Ok(Self::with_sources(
            client,
            Arc::new(GeocoderSource::from_settings(settings)),
            Arc::new(BoundarySource::from_settings(settings)?),
        ))
    }

    /// Create an aggregator over arbitrary sources
    pub fn with_sources(
        client: HttpClient,
        geocoder: Arc<dyn SuggestionSource>,
        boundary: Arc<dyn SuggestionSource>,
    ) -> Self {
        Self {
            client,
            geocoder,
            boundary,
            live: LiveSuggestions::new(),
        }
    }

    /// Live-bound view of the most recent query's suggestions
    pub fn live(&self) -> &LiveSuggestions {
        &self.live
    }

    /// Fetch suggestions for a query from both sources concurrently.
    ///
    /// Succeeds only if both sources succeed; the result holds the geocoder
    /// records followed by the boundary records. The first source failure
    /// fails the whole call, and the other request is dropped.
    ///
    /// Each source's records are merged into [`Self::live`] as soon as they
    /// arrive. A source that succeeded before the other failed stays merged.
    pub async fn fetch(
        &self,
        query: &str,
        options: &FetchOptions,
    ) -> Result<SuggestionSet, SuggestError> {
        if query.trim().is_empty() {
            self.live.reset();
            return Ok(SuggestionSet::default());
        }

        let generation = self.live.begin();
        info!("Fetching suggestions for '{}'", query);

        let geocoder = self.fetch_source(self.geocoder.as_ref(), generation, query, options);
        let boundary = self.fetch_source(self.boundary.as_ref(), generation, query, options);

        match try_join(geocoder, boundary).await {
            Ok((geocoder, boundary)) => {
                let set = SuggestionSet::new(geocoder, boundary);
                info!("Found {} suggestions for '{}'", set.len(), query);
                Ok(set)
            }
            Err(e) => {
                warn!("Suggestion fetch for '{}' failed: {}", query, e);
                Err(e)
            }
        }
    }

    /// Fetch one source and merge its records into the live set
    async fn fetch_source(
        &self,
        source: &dyn SuggestionSource,
        generation: u64,
        query: &str,
        options: &FetchOptions,
    ) -> Result<Vec<SuggestionRecord>, SuggestError> {
        let start = Instant::now();
        let role: SourceRole = source.role();

        match source.fetch(&self.client, query, options).await {
            Ok(records) => {
                debug!(
                    "Source {} returned {} suggestions in {:?}",
                    source.name(),
                    records.len(),
                    start.elapsed()
                );
                if !self.live.merge(generation, role, records.clone()) {
                    debug!("Discarding stale {} suggestions for '{}'", source.name(), query);
                }
                Ok(records)
            }
            Err(e) => {
                warn!("Source {} failed after {:?}: {}", source.name(), start.elapsed(), e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{SourceRequest, SourceResponse};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Source answering from memory after a delay
    struct FakeSource {
        role: SourceRole,
        delay: Duration,
        outcome: Result<Vec<&'static str>, &'static str>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn ok(role: SourceRole, delay_ms: u64, labels: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                role,
                delay: Duration::from_millis(delay_ms),
                outcome: Ok(labels),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(role: SourceRole, delay_ms: u64) -> Arc<Self> {
            Arc::new(Self {
                role,
                delay: Duration::from_millis(delay_ms),
                outcome: Err("connection reset"),
                calls: AtomicUsize::new(0),
            })
        }

        fn record(&self, label: &str) -> SuggestionRecord {
            match self.role {
                SourceRole::Geocoder => {
                    SuggestionRecord::from_geocoder(json!({"text": label, "magicKey": label}), 18)
                }
                SourceRole::Boundary => {
                    SuggestionRecord::from_boundary(json!({"text": label, "id": label}))
                }
            }
            .unwrap()
        }
    }

    #[async_trait]
    impl SuggestionSource for FakeSource {
        fn name(&self) -> &str {
            self.role.name()
        }

        fn role(&self) -> SourceRole {
            self.role
        }

        fn request(&self, _query: &str) -> Result<SourceRequest, SuggestError> {
            unreachable!("fake sources never build requests")
        }

        fn response(
            &self,
            _response: SourceResponse,
        ) -> Result<Vec<SuggestionRecord>, SuggestError> {
            unreachable!("fake sources never parse responses")
        }

        async fn fetch(
            &self,
            _client: &HttpClient,
            _query: &str,
            _options: &FetchOptions,
        ) -> Result<Vec<SuggestionRecord>, SuggestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            match self.outcome {
                Ok(ref labels) => Ok(labels.iter().map(|l| self.record(l)).collect()),
                Err(message) => Err(SuggestError::Request {
                    origin: self.name().to_string(),
                    message: message.to_string(),
                }),
            }
        }
    }

    /// Source labelling its records with the query, slow for one query
    struct EchoSource {
        role: SourceRole,
        slow_query: &'static str,
    }

    #[async_trait]
    impl SuggestionSource for EchoSource {
        fn name(&self) -> &str {
            self.role.name()
        }

        fn role(&self) -> SourceRole {
            self.role
        }

        fn request(&self, _query: &str) -> Result<SourceRequest, SuggestError> {
            unreachable!("echo sources never build requests")
        }

        fn response(
            &self,
            _response: SourceResponse,
        ) -> Result<Vec<SuggestionRecord>, SuggestError> {
            unreachable!("echo sources never parse responses")
        }

        async fn fetch(
            &self,
            _client: &HttpClient,
            query: &str,
            _options: &FetchOptions,
        ) -> Result<Vec<SuggestionRecord>, SuggestError> {
            if query == self.slow_query {
                tokio::time::sleep(Duration::from_millis(100)).await;
            } else {
                tokio::task::yield_now().await;
            }
            let label = format!("{}:{}", self.role, query);
            let record = match self.role {
                SourceRole::Geocoder => {
                    SuggestionRecord::from_geocoder(json!({"text": label, "magicKey": label}), 18)
                }
                SourceRole::Boundary => {
                    SuggestionRecord::from_boundary(json!({"text": label, "id": label}))
                }
            };
            record
                .map(|r| vec![r])
                .map_err(|e| SuggestError::parse(self.name(), e))
        }
    }

    fn aggregator(geocoder: Arc<FakeSource>, boundary: Arc<FakeSource>) -> SuggestionAggregator {
        SuggestionAggregator::with_sources(HttpClient::new().unwrap(), geocoder, boundary)
    }

    #[tokio::test]
    async fn test_geocoder_records_come_first() {
        let agg = aggregator(
            FakeSource::ok(SourceRole::Geocoder, 0, vec!["geo1", "geo2"]),
            FakeSource::ok(SourceRole::Boundary, 0, vec!["boundary1"]),
        );

        let set = agg.fetch("Philadelphia", &FetchOptions::new()).await.unwrap();
        assert_eq!(set.labels(), vec!["geo1", "geo2", "boundary1"]);
        assert_eq!(agg.live().snapshot(), set);
    }

    #[tokio::test]
    async fn test_order_ignores_arrival_order() {
        // Boundary answers long before the geocoder
        let agg = aggregator(
            FakeSource::ok(SourceRole::Geocoder, 50, vec!["geo1"]),
            FakeSource::ok(SourceRole::Boundary, 0, vec!["boundary1", "boundary2"]),
        );

        let set = agg.fetch("Philadelphia", &FetchOptions::new()).await.unwrap();
        assert_eq!(set.labels(), vec!["geo1", "boundary1", "boundary2"]);
    }

    #[tokio::test]
    async fn test_live_set_updates_per_source() {
        let agg = aggregator(
            FakeSource::ok(SourceRole::Geocoder, 60, vec!["geo1"]),
            FakeSource::ok(SourceRole::Boundary, 0, vec!["boundary1"]),
        );
        let mut rx = agg.live().subscribe();
        let options = FetchOptions::new();

        let (result, seen) = tokio::join!(agg.fetch("Phila", &options), async {
            let mut seen = Vec::new();
            while seen.len() < 2 {
                if rx.changed().await.is_err() {
                    break;
                }
                let labels: Vec<String> = rx
                    .borrow_and_update()
                    .suggestions()
                    .labels()
                    .into_iter()
                    .map(String::from)
                    .collect();
                if !labels.is_empty() {
                    seen.push(labels);
                }
            }
            seen
        });

        assert!(result.is_ok());
        assert_eq!(seen[0], vec!["boundary1"]);
        assert_eq!(seen[1], vec!["geo1", "boundary1"]);
    }

    #[tokio::test]
    async fn test_superseded_fetch_never_reaches_live_set() {
        let agg = SuggestionAggregator::with_sources(
            HttpClient::new().unwrap(),
            Arc::new(EchoSource {
                role: SourceRole::Geocoder,
                slow_query: "Phila",
            }),
            Arc::new(EchoSource {
                role: SourceRole::Boundary,
                slow_query: "Phila",
            }),
        );
        let mut rx = agg.live().subscribe();
        let options = FetchOptions::new();

        // The slow first query is overtaken by the second one
        let (first, second) = tokio::join!(agg.fetch("Phila", &options), async {
            let second = agg.fetch("Philadelphia", &options).await;
            let _ = rx.borrow_and_update();
            second
        });

        assert_eq!(
            first.unwrap().labels(),
            vec!["geocoder:Phila", "boundary:Phila"]
        );
        assert_eq!(
            second.unwrap().labels(),
            vec!["geocoder:Philadelphia", "boundary:Philadelphia"]
        );

        let live = agg.live().snapshot();
        assert_eq!(
            live.labels(),
            vec!["geocoder:Philadelphia", "boundary:Philadelphia"]
        );
        assert_eq!(agg.live().generation(), 2);
        // The first fetch resolved afterwards without publishing anything
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_boundary_failure_rejects() {
        let agg = aggregator(
            FakeSource::ok(SourceRole::Geocoder, 0, vec!["geo1"]),
            FakeSource::failing(SourceRole::Boundary, 20),
        );

        let err = agg.fetch("Philadelphia", &FetchOptions::new()).await.unwrap_err();
        assert_eq!(err.origin(), Some("boundary"));
        assert!(err.is_fetch_error());

        // The geocoder's records were merged before the failure and remain visible
        assert_eq!(agg.live().snapshot().labels(), vec!["geo1"]);
    }

    #[tokio::test]
    async fn test_geocoder_failure_rejects() {
        let agg = aggregator(
            FakeSource::failing(SourceRole::Geocoder, 0),
            FakeSource::ok(SourceRole::Boundary, 20, vec!["boundary1"]),
        );

        let err = agg.fetch("Philadelphia", &FetchOptions::new()).await.unwrap_err();
        assert_eq!(err.origin(), Some("geocoder"));
    }

    #[tokio::test]
    async fn test_both_failing_reports_first_failure_once() {
        let agg = aggregator(
            FakeSource::failing(SourceRole::Geocoder, 30),
            FakeSource::failing(SourceRole::Boundary, 0),
        );

        let result = agg.fetch("Philadelphia", &FetchOptions::new()).await;
        let err = result.unwrap_err();
        assert_eq!(err.origin(), Some("boundary"));
        assert!(agg.live().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_skips_sources() {
        let geocoder = FakeSource::ok(SourceRole::Geocoder, 0, vec!["geo1"]);
        let boundary = FakeSource::ok(SourceRole::Boundary, 0, vec!["boundary1"]);
        let agg = aggregator(geocoder.clone(), boundary.clone());

        agg.fetch("Phila", &FetchOptions::new()).await.unwrap();
        assert_eq!(agg.live().len(), 2);

        let set = agg.fetch("   ", &FetchOptions::new()).await.unwrap();
        assert!(set.is_empty());
        assert!(agg.live().is_empty());
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(boundary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_new_query_replaces_previous_set() {
        let agg = aggregator(
            FakeSource::ok(SourceRole::Geocoder, 0, vec!["geo1"]),
            FakeSource::ok(SourceRole::Boundary, 0, vec!["boundary1"]),
        );

        agg.fetch("Phila", &FetchOptions::new()).await.unwrap();
        let first = agg.live().generation();
        agg.fetch("Philadelphia", &FetchOptions::new()).await.unwrap();

        assert_eq!(agg.live().generation(), first + 1);
        assert_eq!(agg.live().len(), 2);
    }

    #[tokio::test]
    async fn test_new_from_settings() {
        let settings = Settings::default();
        let agg = SuggestionAggregator::new(HttpClient::new().unwrap(), &settings);
        assert!(agg.is_ok());
    }
}

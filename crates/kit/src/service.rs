//! REST calls against the current region's OBA server.
//!
//! The service builds the request URL, hands it to the caller's
//! [`DataFetcher`], and schedules a [`ModelOperation`] on the shared queue
//! for the response. Decode failures do not fail the call: they are
//! reported through the returned operation's `error()`.

use std::sync::Arc;

use geo::Point;
use oba_transit::prelude::{
    AgenciesWithCoverageModelOperation, DataFetcher, ModelOperation, OperationQueue,
    RefreshError, RegionProvider, RestModel, RouteIdentifier, RoutesModelOperation,
    SelectionError, StopIdentifier, StopsModelOperation, TransitError, TripIdentifier,
    TripModelOperation,
};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::KitConfig;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("no region selected")]
    NoRegion,

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("endpoint path is empty")]
    EmptyPath,

    #[error("region base URL cannot take a path: {0}")]
    BaseUrl(Arc<str>),

    #[error("request failed: {0}")]
    Fetch(#[source] TransitError),

    #[error("response is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("operation did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

pub struct ModelService {
    api_key: Arc<str>,
    provider: Arc<dyn RegionProvider>,
    fetcher: Arc<dyn DataFetcher>,
    queue: OperationQueue,
}

impl ModelService {
    pub fn new(
        config: &KitConfig,
        provider: Arc<dyn RegionProvider>,
        fetcher: Arc<dyn DataFetcher>,
    ) -> Self {
        Self {
            api_key: config.api_key.as_str().into(),
            provider,
            fetcher,
            queue: OperationQueue::new(config.queue.clone()),
        }
    }

    pub fn queue(&self) -> &OperationQueue {
        &self.queue
    }

    /// `{obaBaseUrl}/api/where/{path...}.json?key=...&params`
    ///
    /// Each element of `path` is one percent-encoded segment, so ids may
    /// contain `/`, `?` or `#`.
    pub fn endpoint_url(&self, path: &[&str], params: &[(&str, String)]) -> Result<Url, ServiceError> {
        let region = self.provider.current_region().ok_or(ServiceError::NoRegion)?;
        let Some((last, parents)) = path.split_last() else {
            return Err(ServiceError::EmptyPath);
        };

        let mut url = Url::parse(&region.oba_base_url)?;
        url.path_segments_mut()
            .map_err(|()| ServiceError::BaseUrl(region.oba_base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "where"])
            .extend(parents)
            .push(&format!("{last}.json"));
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .extend_pairs(params);
        Ok(url)
    }

    /// Fetch the endpoint at `path` and decode it as a list of `M`.
    pub async fn fetch_models<M: RestModel>(
        &self,
        path: &[&str],
        params: &[(&str, String)],
    ) -> Result<Arc<ModelOperation<M>>, ServiceError> {
        let url = self.endpoint_url(path, params)?;
        debug!(endpoint = %url.path(), model = M::NAME, "requesting");

        let bytes = self
            .fetcher
            .fetch(url.as_str())
            .await
            .map_err(ServiceError::Fetch)?;
        let payload: Value = serde_json::from_slice(&bytes)?;

        let operation = Arc::new(ModelOperation::<M>::new(payload));
        self.queue.enqueue(operation.clone()).await?;
        Ok(operation)
    }

    pub async fn agencies_with_coverage(
        &self,
    ) -> Result<Arc<AgenciesWithCoverageModelOperation>, ServiceError> {
        self.fetch_models(&["agencies-with-coverage"], &[]).await
    }

    /// Stops within `radius_m` meters of `location`.
    pub async fn stops_for_location(
        &self,
        location: Point,
        radius_m: f64,
    ) -> Result<Arc<StopsModelOperation>, ServiceError> {
        let params = [
            ("lat", location.y().to_string()),
            ("lon", location.x().to_string()),
            ("radius", radius_m.round().to_string()),
        ];
        self.fetch_models(&["stops-for-location"], &params).await
    }

    pub async fn stop(&self, id: &StopIdentifier) -> Result<Arc<StopsModelOperation>, ServiceError> {
        self.fetch_models(&["stop", id.as_str()], &[]).await
    }

    pub async fn route(&self, id: &RouteIdentifier) -> Result<Arc<RoutesModelOperation>, ServiceError> {
        self.fetch_models(&["route", id.as_str()], &[]).await
    }

    pub async fn trip(&self, id: &TripIdentifier) -> Result<Arc<TripModelOperation>, ServiceError> {
        self.fetch_models(&["trip", id.as_str()], &[]).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use oba_transit::prelude::{
        DecodeError, OperationError, OperationState, RegionProviderConfig, StaticRegionProvider,
    };
    use serde_json::json;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    /// Serves canned bodies by URL path and records what was requested.
    #[derive(Default)]
    pub(crate) struct CannedFetcher {
        pub(crate) routes: Mutex<Vec<(String, Vec<u8>)>>,
        pub(crate) requested: Mutex<Vec<String>>,
    }

    impl CannedFetcher {
        pub(crate) fn serve(&self, path_suffix: &str, body: Value) {
            self.routes
                .lock()
                .unwrap()
                .push((path_suffix.to_owned(), serde_json::to_vec(&body).unwrap()));
        }
    }

    impl DataFetcher for CannedFetcher {
        fn fetch<'a>(
            &'a self,
            url: &'a str,
        ) -> Pin<Box<dyn Future<Output = oba_transit::Result<Vec<u8>>> + Send + 'a>> {
            self.requested.lock().unwrap().push(url.to_owned());
            let path = Url::parse(url).map(|u| u.path().to_owned()).unwrap_or_default();
            let body = self
                .routes
                .lock()
                .unwrap()
                .iter()
                .find(|(suffix, _)| path.ends_with(suffix.as_str()))
                .map(|(_, body)| body.clone());
            Box::pin(async move {
                body.ok_or_else(|| TransitError::Network(format!("404 {path}")))
            })
        }
    }

    pub(crate) fn region_directory() -> Value {
        json!({
            "code": 200,
            "data": {
                "list": [{
                    "id": 1,
                    "regionName": "Puget Sound",
                    "obaBaseUrl": "https://api.pugetsound.onebusaway.org",
                    "active": true,
                    "bounds": [{"lat": 47.56, "lon": -122.15, "latSpan": 0.92, "lonSpan": 0.85}]
                }]
            }
        })
    }

    async fn service(fetcher: Arc<CannedFetcher>) -> ModelService {
        fetcher.serve("regions-v3.json", region_directory());
        let provider = Arc::new(StaticRegionProvider::new(
            RegionProviderConfig::default(),
            fetcher.clone(),
        ));
        provider.refresh_regions().await.unwrap();
        provider
            .set_current_region(provider.regions()[0].clone())
            .await
            .unwrap();

        let config = KitConfig {
            api_key: "TEST".into(),
            ..Default::default()
        };
        ModelService::new(&config, provider, fetcher)
    }

    #[tokio::test]
    async fn test_endpoint_url() {
        let service = service(Arc::new(CannedFetcher::default())).await;
        let url = service
            .endpoint_url(&["stops-for-location"], &[("lat", "47.6".into()), ("lon", "-122.3".into())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.pugetsound.onebusaway.org/api/where/stops-for-location.json?key=TEST&lat=47.6&lon=-122.3"
        );
    }

    #[tokio::test]
    async fn test_endpoint_url_escapes_ids() {
        let service = service(Arc::new(CannedFetcher::default())).await;
        let url = service.endpoint_url(&["stop", "1_754#03?x/y"], &[]).unwrap();

        assert_eq!(url.path(), "/api/where/stop/1_754%2303%3Fx%2Fy.json");
        assert_eq!(url.query(), Some("key=TEST"));
        assert!(url.fragment().is_none());

        assert!(matches!(
            service.endpoint_url(&[], &[]),
            Err(ServiceError::EmptyPath)
        ));
    }

    #[tokio::test]
    async fn test_endpoint_url_keeps_base_path() {
        let fetcher = Arc::new(CannedFetcher::default());
        let mut directory = region_directory();
        directory["data"]["list"][0]["obaBaseUrl"] = json!("https://oba.example.org/onebusaway-api-webapp");
        fetcher.serve("regions-v3.json", directory);
        let provider = Arc::new(StaticRegionProvider::new(
            RegionProviderConfig::default(),
            fetcher.clone(),
        ));
        provider.refresh_regions().await.unwrap();
        provider
            .set_current_region(provider.regions()[0].clone())
            .await
            .unwrap();
        let config = KitConfig {
            api_key: "TEST".into(),
            ..Default::default()
        };
        let service = ModelService::new(&config, provider, fetcher);

        let url = service.endpoint_url(&["route", "1_100224"], &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://oba.example.org/onebusaway-api-webapp/api/where/route/1_100224.json?key=TEST"
        );
    }

    #[tokio::test]
    async fn test_no_region_selected() {
        let fetcher = Arc::new(CannedFetcher::default());
        let provider = Arc::new(StaticRegionProvider::new(
            RegionProviderConfig::default(),
            fetcher.clone(),
        ));
        let service = ModelService::new(&KitConfig::default(), provider, fetcher);

        assert!(matches!(
            service.agencies_with_coverage().await,
            Err(ServiceError::NoRegion)
        ));
    }

    #[tokio::test]
    async fn test_agencies_with_coverage() {
        let fetcher = Arc::new(CannedFetcher::default());
        fetcher.serve(
            "agencies-with-coverage.json",
            json!({
                "code": 200,
                "data": {
                    "limitExceeded": false,
                    "list": [{"agencyId": "1", "lat": 47.53, "latSpan": 0.7, "lon": -122.11, "lonSpan": 0.8}],
                    "references": {
                        "agencies": [{"id": "1", "name": "Metro Transit", "url": "https://kingcounty.gov/metro", "timezone": "America/Los_Angeles"}],
                        "routes": [], "situations": [], "stops": [], "trips": []
                    }
                }
            }),
        );
        let service = service(fetcher).await;

        let operation = service.agencies_with_coverage().await.unwrap();
        assert_eq!(operation.state(), OperationState::Finished);
        assert_eq!(operation.agencies_with_coverage().len(), 1);
    }

    #[tokio::test]
    async fn test_decode_failure_is_reported_on_the_operation() {
        let fetcher = Arc::new(CannedFetcher::default());
        fetcher.serve(
            "stop/1_75403.json",
            json!({"code": 200, "data": {"entry": {"id": "1_75403"}}}),
        );
        let service = service(fetcher).await;

        let operation = service.stop(&StopIdentifier::new("1_75403")).await.unwrap();
        assert_eq!(operation.state(), OperationState::Failed);
        assert!(operation.models().is_empty());
        assert!(matches!(
            operation.error(),
            Some(OperationError::Decode(DecodeError::Model { model: "stop", .. }))
        ));
    }

    #[tokio::test]
    async fn test_transport_errors() {
        let fetcher = Arc::new(CannedFetcher::default());
        fetcher.serve("route/1_100224.json", json!("not an envelope"));
        let service = service(fetcher.clone()).await;

        assert!(matches!(
            service.trip(&TripIdentifier::new("1_1")).await,
            Err(ServiceError::Fetch(TransitError::Network(_)))
        ));

        let operation = service.route(&RouteIdentifier::new("1_100224")).await.unwrap();
        assert!(matches!(
            operation.error(),
            Some(OperationError::Decode(DecodeError::NotAnObject))
        ));

        let requested = fetcher.requested.lock().unwrap();
        assert!(requested.iter().any(|u| u.contains("/api/where/trip/1_1.json?key=TEST")));
    }
}

use std::future::Future;

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ReportError;
use crate::options::ParserOptions;
use crate::payloads::FightsResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Casts,
    Buffs,
    DamageTaken,
    Healing,
    Deaths,
    Interrupts,
    Summary,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Casts => "report/events/casts",
            Endpoint::Buffs => "report/tables/buffs",
            Endpoint::DamageTaken => "report/events/damage-taken",
            Endpoint::Healing => "report/events/healing",
            Endpoint::Deaths => "report/tables/deaths",
            Endpoint::Interrupts => "report/events/interrupts",
            Endpoint::Summary => "report/tables/summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub report_id: String,
    pub start: i64,
    pub end: i64,
    pub source_id: Option<i64>,
    pub fight: Option<i64>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint, report_id: &str, start: i64, end: i64) -> Self {
        Self {
            endpoint,
            report_id: report_id.to_string(),
            start,
            end,
            source_id: None,
            fight: None,
        }
    }

    pub fn source(mut self, source_id: i64) -> Self {
        self.source_id = Some(source_id);
        self
    }

    pub fn fight(mut self, fight: i64) -> Self {
        self.fight = Some(fight);
        self
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.endpoint.path(), self.report_id)
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("start", self.start.to_string()), ("end", self.end.to_string())];

        if let Some(source_id) = self.source_id {
            query.push(("sourceid", source_id.to_string()));
        }

        if let Some(fight) = self.fight {
            query.push(("fight", fight.to_string()));
        }

        query
    }

    /// Path and query without the api key, for logging.
    pub fn describe(&self) -> String {
        let query = self
            .query()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.path(), query)
    }
}

/// Outcome of a sub-fetch. `NoData` means the call failed softly and its
/// contribution should be skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Data(T),
    NoData,
}

impl<T> Fetched<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Data(data) => Some(data),
            Fetched::NoData => None,
        }
    }
}

pub trait ReportApi: Send + Sync + 'static {
    /// Bootstrap call. The only request whose failure aborts a report.
    fn get_fights(&self, report_id: &str) -> impl Future<Output = Result<FightsResponse, ReportError>> + Send;
    fn get(&self, request: &ApiRequest) -> impl Future<Output = Fetched<Value>> + Send;
}

pub async fn fetch<T, RA>(api: &RA, request: &ApiRequest) -> Fetched<T>
where
    T: DeserializeOwned,
    RA: ReportApi,
{
    match api.get(request).await {
        Fetched::Data(value) => match serde_json::from_value(value) {
            Ok(payload) => Fetched::Data(payload),
            Err(err) => {
                warn!("unexpected payload from {}: {:?}", request.describe(), err);
                Fetched::NoData
            }
        },
        Fetched::NoData => Fetched::NoData,
    }
}

pub struct DefaultReportApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ReportApi for DefaultReportApi {
    async fn get_fights(&self, report_id: &str) -> Result<FightsResponse, ReportError> {
        let url = format!("{}/report/fights/{report_id}", self.base_url);

        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| ReportError::Upstream(format!("{err:?}")))?;

        let status = response.status();
        debug!("report/fights/{report_id} ({status})");

        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            return Err(ReportError::NotFound(report_id.to_string()));
        }

        if !status.is_success() {
            return Err(ReportError::Upstream(format!("report/fights/{report_id} returned {status}")));
        }

        response
            .json::<FightsResponse>()
            .await
            .map_err(|err| ReportError::Upstream(format!("{err:?}")))
    }

    async fn get(&self, request: &ApiRequest) -> Fetched<Value> {
        let url = format!("{}/{}", self.base_url, request.path());

        let response = match self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(&request.query())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!("failed to get {}: {:?}", request.describe(), err);
                return Fetched::NoData;
            }
        };

        let status = response.status();
        debug!("{} ({status})", request.describe());

        if !status.is_success() {
            warn!("unexpected status {status} from {}", request.describe());
            return Fetched::NoData;
        }

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if !is_json {
            let body = response.text().await.unwrap_or_default();
            warn!("unexpected content type from {} - {}", request.describe(), body);
            return Fetched::NoData;
        }

        match response.json::<Value>().await {
            Ok(value) => Fetched::Data(value),
            Err(err) => {
                warn!("failed to parse {}: {:?}", request.describe(), err);
                Fetched::NoData
            }
        }
    }
}

impl DefaultReportApi {
    pub fn new(options: &ParserOptions) -> Self {
        Self {
            client: Client::new(),
            base_url: options.base_url.trim_end_matches('/').to_string(),
            api_key: options.api_key.clone(),
        }
    }
}

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use hashbrown::HashMap;
use serde_json::Value;

use crate::abstractions::*;
use crate::error::ReportError;
use crate::payloads::FightsResponse;

use super::*;

type RequestKey = (Endpoint, Option<i64>, Option<i64>);
type DelayFn = Box<dyn Fn(usize) -> Duration + Send + Sync>;

fn key(request: &ApiRequest) -> RequestKey {
    (request.endpoint, request.source_id, request.fight)
}

/// In-memory upstream. Responses are matched on endpoint, source and fight;
/// anything unmatched comes back as `NoData`.
pub struct FakeReportApi {
    fights: Option<FightsResponse>,
    responses: HashMap<RequestKey, Value>,
    delay: Option<DelayFn>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ReportApi for FakeReportApi {
    async fn get_fights(&self, report_id: &str) -> Result<FightsResponse, ReportError> {
        self.fights
            .clone()
            .ok_or_else(|| ReportError::NotFound(report_id.to_string()))
    }

    async fn get(&self, request: &ApiRequest) -> Fetched<Value> {
        let index = {
            let mut requests = self.requests.lock().unwrap_or_else(PoisonError::into_inner);
            requests.push(request.clone());
            requests.len() - 1
        };

        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(index)).await;
        }

        match self.responses.get(&key(request)) {
            Some(value) => Fetched::Data(value.clone()),
            None => Fetched::NoData,
        }
    }
}

impl FakeReportApi {
    pub fn new() -> Self {
        Self {
            fights: Some(create_fights_response()),
            responses: HashMap::new(),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            fights: None,
            ..Self::new()
        }
    }

    pub fn with_response(mut self, request: &ApiRequest, value: Value) -> Self {
        self.responses.insert(key(request), value);
        self
    }

    pub fn with_delays(mut self, delay: impl Fn(usize) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn remove_responses(&mut self, endpoint: Endpoint) {
        self.responses.retain(|(kind, _, _), _| *kind != endpoint);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Upstream serving every fixture for the Karazhan report.
pub fn create_report_api() -> FakeReportApi {
    let request = |endpoint| ApiRequest::new(endpoint, REPORT_ID, 0, 15000);
    let encounter_summary = |fight, start, end| ApiRequest::new(Endpoint::Summary, REPORT_ID, start, end).fight(fight);

    FakeReportApi::new()
        .with_response(&request(Endpoint::Deaths), deaths_json())
        .with_response(&request(Endpoint::Interrupts), interrupts_json())
        .with_response(&request(Endpoint::Summary), summary_json())
        .with_response(&encounter_summary(2, 2000, 4000), encounter_summary_json())
        .with_response(&encounter_summary(4, 7000, 11000), healer_summary_json())
        .with_response(&encounter_summary(5, 12000, 15000), healer_summary_json())
        .with_response(&request(Endpoint::Casts).source(10), casts_json())
        .with_response(&request(Endpoint::Buffs).source(10), buffs_json())
        .with_response(&request(Endpoint::Healing).source(11), healing_json())
        .with_response(&request(Endpoint::DamageTaken).source(10), serde_json::json!({ "events": [] }))
}

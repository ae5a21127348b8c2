mod on_buffs;
mod on_casts;
mod on_damage_taken;
mod on_deaths;
mod on_healing;
mod on_interrupts;
mod on_summary;

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, error, info};
use serde::de::DeserializeOwned;
use tokio::task::JoinSet;

use crate::abstractions::*;
use crate::constants::SUMMARY_ENCOUNTER_ID;
use crate::error::ReportError;
use crate::item_catalog::ItemCatalog;
use crate::models::*;
use crate::payloads::*;
use crate::rate_limiter::RateLimiter;
use crate::stat_tree::StatTree;

pub use on_buffs::uptime_ratio;

/// Everything a sub-fetch needs to merge its payload. Shared read-only
/// between tasks apart from `stats`, which does its own locking.
pub struct ReportContext {
    pub report_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub encounters: BTreeMap<i64, Encounter>,
    pub pets: BTreeMap<i64, Pet>,
    pub catalog: Arc<ItemCatalog>,
    pub stats: StatTree,
}

impl ReportContext {
    pub fn new(report: &Report, catalog: Arc<ItemCatalog>) -> Self {
        Self {
            report_id: report.report_id.clone(),
            start_time: report.start_time,
            end_time: report.end_time,
            encounters: report.encounters.clone(),
            pets: report.pets.clone(),
            catalog,
            stats: StatTree::new(report.characters.values()),
        }
    }

    fn request(&self, endpoint: Endpoint) -> ApiRequest {
        ApiRequest::new(endpoint, &self.report_id, self.start_time, self.end_time)
    }
}

/// Builds the report skeleton from the bootstrap call: encounters, seeded
/// characters, pets and the report window.
pub fn load_roster(report_id: &str, fights: &FightsResponse) -> Result<Report, ReportError> {
    let (Some(first), Some(last)) = (fights.fights.first(), fights.fights.last()) else {
        return Err(ReportError::EmptyReport(report_id.to_string()));
    };

    let encounters: BTreeMap<i64, Encounter> = fights
        .fights
        .iter()
        .map(|fight| (fight.id, Encounter::from(fight)))
        .collect();

    let characters: BTreeMap<i64, Character> = fights
        .friendlies
        .iter()
        .filter(|friendly| is_raid_member(friendly))
        .map(|friendly| {
            let character = Character::new(friendly, &encounters);
            debug!("{} - {} fights", character.name, character.boss_encounter_count());
            (character.id, character)
        })
        .collect();

    let pets = fights.friendly_pets.iter().map(|pet| (pet.id, Pet::from(pet))).collect();

    info!("{} encounters, {} characters", encounters.len(), characters.len());

    Ok(Report {
        report_id: report_id.to_string(),
        title: fights.title.clone(),
        start_timestamp: fights.start,
        end_timestamp: fights.end,
        start_time: first.start_time,
        end_time: last.end_time,
        encounters,
        characters,
        pets,
    })
}

pub struct ReportParser<RA: ReportApi> {
    api: Arc<RA>,
    catalog: Arc<ItemCatalog>,
    limiter: Arc<RateLimiter>,
}

impl<RA: ReportApi> ReportParser<RA> {
    pub fn new(api: Arc<RA>, catalog: Arc<ItemCatalog>, limiter: Arc<RateLimiter>) -> Self {
        Self { api, catalog, limiter }
    }

    pub async fn parse_report(&self, report_id: &str) -> Result<Report, ReportError> {
        let fights = self.api.get_fights(report_id).await?;
        let mut report = load_roster(report_id, &fights)?;

        let context = Arc::new(ReportContext::new(&report, self.catalog.clone()));
        let mut tasks = JoinSet::new();
        self.schedule(&mut tasks, &context, report.characters.keys().copied());

        info!("running {} sub-fetches for {}", tasks.len(), report_id);

        while let Some(result) = tasks.join_next().await {
            if let Err(err) = result {
                error!("sub-fetch for {} did not complete: {}", report_id, err);
            }
        }

        for character in report.characters.values_mut() {
            if let Some(nodes) = context.stats.snapshot(character.id) {
                character.per_encounter = nodes;
            }
        }

        Ok(report)
    }

    fn schedule(&self, tasks: &mut JoinSet<()>, context: &Arc<ReportContext>, character_ids: impl Iterator<Item = i64>) {
        self.spawn::<DeathsResponse, _>(tasks, context, context.request(Endpoint::Deaths), ReportContext::on_deaths);
        self.spawn::<InterruptsResponse, _>(tasks, context, context.request(Endpoint::Interrupts), ReportContext::on_interrupts);
        self.spawn::<SummaryResponse, _>(tasks, context, context.request(Endpoint::Summary), |context, payload| {
            context.on_summary(SUMMARY_ENCOUNTER_ID, payload)
        });

        for encounter in context.encounters.values().filter(|encounter| encounter.is_boss()) {
            let encounter_id = encounter.id;
            let request = ApiRequest::new(Endpoint::Summary, &context.report_id, encounter.start_time, encounter.end_time)
                .fight(encounter_id);

            self.spawn::<SummaryResponse, _>(tasks, context, request, move |context, payload| {
                context.on_summary(encounter_id, payload)
            });
        }

        for character_id in character_ids {
            self.spawn::<CastsResponse, _>(tasks, context, context.request(Endpoint::Casts).source(character_id), move |context, payload| {
                context.on_casts(character_id, payload)
            });
            self.spawn::<BuffsResponse, _>(tasks, context, context.request(Endpoint::Buffs).source(character_id), move |context, payload| {
                context.on_buffs(character_id, payload)
            });
            self.spawn::<DamageTakenResponse, _>(tasks, context, context.request(Endpoint::DamageTaken).source(character_id), move |context, payload| {
                context.on_damage_taken(character_id, payload)
            });
            self.spawn::<HealingResponse, _>(tasks, context, context.request(Endpoint::Healing).source(character_id), move |context, payload| {
                context.on_healing(character_id, payload)
            });
        }
    }

    fn spawn<T, F>(&self, tasks: &mut JoinSet<()>, context: &Arc<ReportContext>, request: ApiRequest, merge: F)
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(&ReportContext, T) + Send + 'static,
    {
        let api = self.api.clone();
        let limiter = self.limiter.clone();
        let context = context.clone();

        tasks.spawn(async move {
            limiter.acquire().await;

            if let Some(payload) = fetch::<T, RA>(api.as_ref(), &request).await.into_option() {
                merge(context.as_ref(), payload);
            }
        });
    }
}

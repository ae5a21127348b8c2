use crate::constants::{RESISTANCE_BUFFS, SUMMARY_ENCOUNTER_ID};
use crate::gear::add_resistances;
use crate::models::Encounter;
use crate::payloads::{Aura, Band, BuffsResponse};
use crate::stat_tree::{Category, ListEntry, StatKey, StatValue};

use super::ReportContext;

/// Share of `encounter` covered by `bands`, rounded to three decimals.
pub fn uptime_ratio(encounter: &Encounter, bands: &[Band]) -> f64 {
    let duration = encounter.duration();

    if duration <= 0 {
        return 0.0;
    }

    let covered: i64 = bands
        .iter()
        .map(|band| encounter.overlap(band.start_time, band.end_time))
        .sum();

    (covered as f64 / duration as f64 * 1000.0).round() / 1000.0
}

fn buff_template() -> StatValue {
    StatValue::record([
        ("percentage", StatValue::Counter(0.0)),
        ("prebuff", StatValue::List(Vec::new())),
    ])
}

impl ReportContext {
    pub fn on_buffs(&self, character_id: i64, payload: BuffsResponse) {
        for aura in &payload.auras {
            for encounter in self.encounters.values() {
                self.merge_aura(character_id, encounter, aura);
            }
        }
    }

    fn merge_aura(&self, character_id: i64, encounter: &Encounter, aura: &Aura) {
        let bands: Vec<Band> = aura
            .bands
            .iter()
            .filter(|band| band.end_time > encounter.start_time && band.start_time < encounter.end_time)
            .copied()
            .collect();

        if bands.is_empty() {
            return;
        }

        let uptime = uptime_ratio(encounter, &bands);
        let prebuff = aura.bands.iter().any(|band| band.start_time == encounter.start_time);
        let path = [StatKey::Id(aura.guid)];

        for target in [encounter.id, SUMMARY_ENCOUNTER_ID] {
            self.stats.apply(character_id, target, |node| {
                node.set_once(Category::Buffs, &path, buff_template())?;
                node.increment(Category::Buffs, &[StatKey::Id(aura.guid), "percentage".into()], uptime)?;

                if prebuff {
                    node.append_unique(
                        Category::Buffs,
                        &[StatKey::Id(aura.guid), "prebuff".into()],
                        ListEntry::Id(encounter.id),
                    )?;
                }

                Ok(())
            });
        }

        if let Some(resistances) = RESISTANCE_BUFFS.get(&aura.guid) {
            self.stats.apply(character_id, encounter.id, |node| add_resistances(node, Some(resistances)));
        }
    }
}

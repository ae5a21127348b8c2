use log::*;

use crate::constants::SUMMARY_ENCOUNTER_ID;
use crate::payloads::CastsResponse;
use crate::stat_tree::{Category, StatKey, StatValue};

use super::ReportContext;

impl ReportContext {
    /// Counts finished casts per ability, split by boss and trash time.
    pub fn on_casts(&self, character_id: i64, payload: CastsResponse) {
        for event in payload.events.iter().filter(|event| event.kind == "cast") {
            let Some(encounter) = self.encounters.get(&event.fight) else {
                debug!("cast of {} in unknown fight {}", event.ability.guid, event.fight);
                continue;
            };

            let bucket = if encounter.is_boss() { "boss" } else { "trash" };
            let path = [StatKey::Id(event.ability.guid)];

            for target in [event.fight, SUMMARY_ENCOUNTER_ID] {
                self.stats.apply(character_id, target, |node| {
                    let template = StatValue::record([
                        ("boss", StatValue::Counter(0.0)),
                        ("trash", StatValue::Counter(0.0)),
                        ("first_event", StatValue::Counter(event.timestamp as f64)),
                    ]);

                    node.set_once(Category::Casts, &path, template)?;
                    node.increment(Category::Casts, &[StatKey::Id(event.ability.guid), bucket.into()], 1.0)
                });
            }
        }
    }
}

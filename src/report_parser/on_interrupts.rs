use log::*;

use crate::constants::SUMMARY_ENCOUNTER_ID;
use crate::payloads::InterruptsResponse;
use crate::stat_tree::{Category, StatKey};

use super::ReportContext;

impl ReportContext {
    /// Interrupts by a pet count for its owner.
    pub fn on_interrupts(&self, payload: InterruptsResponse) {
        for event in &payload.events {
            let Some(character_id) = self.resolve_source(event.source_id) else {
                debug!("ignoring interrupt from unknown source {}", event.source_id);
                continue;
            };

            let path = [StatKey::Id(event.ability.guid)];
            self.stats.increment_at(character_id, event.fight, Category::Interrupts, &path, 1.0);
            self.stats.increment_at(character_id, SUMMARY_ENCOUNTER_ID, Category::Interrupts, &path, 1.0);
        }
    }

    fn resolve_source(&self, source_id: i64) -> Option<i64> {
        if self.stats.contains_character(source_id) {
            return Some(source_id);
        }

        self.pets.get(&source_id).map(|pet| pet.owner_id)
    }
}

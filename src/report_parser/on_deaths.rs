use log::*;

use crate::constants::SUMMARY_ENCOUNTER_ID;
use crate::payloads::DeathsResponse;
use crate::stat_tree::Category;

use super::ReportContext;

impl ReportContext {
    pub fn on_deaths(&self, payload: DeathsResponse) {
        for entry in &payload.entries {
            if !self.stats.contains_character(entry.id) {
                debug!("ignoring death of non-member {}", entry.id);
                continue;
            }

            self.stats.increment_at(entry.id, entry.fight, Category::Deaths, &[], 1.0);
            self.stats.increment_at(entry.id, SUMMARY_ENCOUNTER_ID, Category::Deaths, &[], 1.0);
        }
    }
}

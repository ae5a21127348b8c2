use log::*;

use crate::gear::GearResistanceResolver;
use crate::payloads::{PlayerDetail, SummaryResponse};
use crate::stat_tree::{Category, ListEntry};

use super::ReportContext;

impl ReportContext {
    /// Roles, specs and gear for `encounter_id`, which is either a boss
    /// encounter or the whole report.
    pub fn on_summary(&self, encounter_id: i64, payload: SummaryResponse) {
        let Some(details) = payload.player_details else {
            debug!("summary for {} carried no player details", encounter_id);
            return;
        };

        let resolver = GearResistanceResolver::new(&self.catalog);

        for (role, players) in [("tank", &details.tanks), ("healer", &details.healers), ("dps", &details.dps)] {
            for player in players {
                self.merge_player(&resolver, encounter_id, role, player);
            }
        }
    }

    fn merge_player(&self, resolver: &GearResistanceResolver, encounter_id: i64, role: &str, player: &PlayerDetail) {
        if let Some(info) = &player.combatant_info {
            for gear in &info.gear {
                self.stats.apply(player.id, encounter_id, |node| resolver.apply(node, gear));
            }
        }

        self.stats.append_unique_at(player.id, encounter_id, Category::Roles, &[], ListEntry::Text(role.to_string()));

        for spec in &player.specs {
            self.stats.append_unique_at(player.id, encounter_id, Category::Specs, &[], ListEntry::Spec(spec.clone()));
        }
    }
}

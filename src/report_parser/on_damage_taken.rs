use log::*;

use crate::payloads::DamageTakenResponse;

use super::ReportContext;

impl ReportContext {
    /// Damage taken is fetched but not reduced into the stat tree.
    pub fn on_damage_taken(&self, character_id: i64, payload: DamageTakenResponse) {
        let total: f64 = payload.events.iter().map(|event| event.amount).sum();
        debug!("{} damage taken events ({}) for {}", payload.events.len(), total, character_id);
    }
}

use crate::constants::SUMMARY_ENCOUNTER_ID;
use crate::payloads::HealingResponse;
use crate::stat_tree::{Category, StatKey, StatValue};

use super::ReportContext;

impl ReportContext {
    pub fn on_healing(&self, character_id: i64, payload: HealingResponse) {
        for event in &payload.events {
            let ability = StatKey::Id(event.ability.guid);

            for target in [event.fight, SUMMARY_ENCOUNTER_ID] {
                self.stats.apply(character_id, target, |node| {
                    let template = StatValue::record([
                        ("count", StatValue::Counter(0.0)),
                        ("amount", StatValue::Counter(0.0)),
                        ("first_event", StatValue::Counter(event.timestamp as f64)),
                    ]);

                    node.set_once(Category::Healing, &[ability.clone()], template)?;
                    node.increment(Category::Healing, &[ability.clone(), "count".into()], 1.0)?;
                    node.increment(Category::Healing, &[ability.clone(), "amount".into()], event.amount)
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::constants::*;
    use crate::stat_tree::{Category, StatKey};
    use crate::test_utils::*;

    fn heal(field: &str) -> Vec<StatKey> {
        vec![StatKey::Id(ABILITY_GREATER_HEAL), field.into()]
    }

    #[test]
    fn should_sum_count_and_amount_per_ability() {
        let context = create_context();

        context.on_healing(11, create_healing_response());

        let nodes = context.stats.snapshot(11).unwrap();
        assert_eq!(nodes[&4].counter(Category::Healing, &heal("count")), Some(2.0));
        assert_eq!(nodes[&4].counter(Category::Healing, &heal("amount")), Some(5200.0));
        assert_eq!(nodes[&4].counter(Category::Healing, &heal("first_event")), Some(7100.0));

        let summary = &nodes[&SUMMARY_ENCOUNTER_ID];
        assert_eq!(summary.counter(Category::Healing, &heal("count")), Some(3.0));
        assert_eq!(summary.counter(Category::Healing, &heal("amount")), Some(6200.0));
        assert_eq!(summary.counter(Category::Healing, &heal("first_event")), Some(100.0));
    }

    #[test]
    fn should_fold_trash_healing_into_trash_node() {
        let context = create_context();

        context.on_healing(11, create_healing_response());

        let nodes = context.stats.snapshot(11).unwrap();
        assert_eq!(nodes[&TRASH_ENCOUNTER_ID].counter(Category::Healing, &heal("amount")), Some(1000.0));
    }
}

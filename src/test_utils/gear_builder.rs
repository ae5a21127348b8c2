use crate::payloads::{Gem, GearItem};

pub struct GearBuilder {
    gear: GearItem,
}

impl GearBuilder {
    pub fn new(id: i64, slot: u32) -> Self {
        Self {
            gear: GearItem {
                id,
                slot,
                ..Default::default()
            },
        }
    }

    pub fn enchant(mut self, id: i64, name: &str) -> Self {
        self.gear.permanent_enchant = Some(id);
        self.gear.permanent_enchant_name = Some(name.to_string());
        self
    }

    pub fn gem(mut self, id: i64) -> Self {
        self.gear.gems.get_or_insert_with(Vec::new).push(Gem { id });
        self
    }

    pub fn item_level(mut self, item_level: u32) -> Self {
        self.gear.item_level = Some(item_level);
        self
    }

    pub fn imbue(mut self, id: i64) -> Self {
        self.gear.temporary_enchant = Some(id);
        self
    }

    pub fn build(self) -> GearItem {
        self.gear
    }
}

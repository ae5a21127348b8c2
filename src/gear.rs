use log::warn;

use crate::constants::*;
use crate::error::StatError;
use crate::item_catalog::{ItemCatalog, ItemCatalogEntry};
use crate::models::Element;
use crate::payloads::GearItem;
use crate::stat_tree::{Category, EnchantRecord, ListEntry, StatKey, StatNode};

/// Turns one equipped item into resistance, enchant, imbue and gem bookkeeping.
///
/// Catalog-derived bonuses (base resistances, random enchantments, empty
/// sockets) need the item to be known; everything read off the gear payload
/// itself is recorded either way.
pub struct GearResistanceResolver<'a> {
    catalog: &'a ItemCatalog,
}

impl<'a> GearResistanceResolver<'a> {
    pub fn new(catalog: &'a ItemCatalog) -> Self {
        Self { catalog }
    }

    pub fn lookup(&self, gear: &GearItem) -> Option<&'a ItemCatalogEntry> {
        if gear.slot == SLOT_SHIRT || gear.slot == SLOT_TABARD || gear.id == 0 {
            return None;
        }

        let entry = self.catalog.get(gear.id);

        if entry.is_none() {
            warn!("could not find item {} ({})", gear.id, gear.name.as_deref().unwrap_or("Unknown"));
        }

        entry
    }

    pub fn apply(&self, node: &mut StatNode, gear: &GearItem) -> Result<(), StatError> {
        let item = self.lookup(gear);

        if let Some(item) = item {
            for element in Element::ALL {
                if let Some(amount) = item.resistance(element) {
                    node.increment(Category::Resistances, &[element.into()], amount as f64)?;
                }
            }

            let random_enchantment = gear
                .item_level
                .filter(|_| item.random_enchantment)
                .and_then(|item_level| random_enchant_resistance(gear.slot, item_level));

            if let Some(amount) = random_enchantment {
                node.increment(Category::Resistances, &["random_enchantment".into()], amount as f64)?;
            }
        }

        if is_enchantable(gear, item) {
            self.apply_enchant(node, gear)?;
        }

        if let Some(imbue) = gear.temporary_enchant {
            let hand = match gear.slot {
                SLOT_MAIN_HAND => Some("main_hand"),
                SLOT_OFF_HAND => Some("off_hand"),
                _ => None,
            };

            if let Some(hand) = hand {
                node.append_unique_to_sub(Category::Imbues, &[], hand.into(), ListEntry::Id(imbue))?;
            }
        }

        let gems = gear.gems.as_deref().unwrap_or_default();

        for gem in gems {
            node.increment(Category::Gems, &[StatKey::Id(gem.id)], 1.0)?;
            add_resistances(node, RESISTANCE_GEMS.get(&gem.id))?;
        }

        let sockets = item.and_then(|item| item.sockets).unwrap_or(0) as usize;

        if sockets > gems.len() {
            node.increment(Category::Gems, &[StatKey::Id(EMPTY_SOCKET_GEM_ID)], (sockets - gems.len()) as f64)?;
        }

        Ok(())
    }

    fn apply_enchant(&self, node: &mut StatNode, gear: &GearItem) -> Result<(), StatError> {
        let record = EnchantRecord {
            enchant_id: gear.permanent_enchant,
            item_id: gear.id,
            enchant_name: gear.permanent_enchant_name.clone(),
            slot: gear.slot,
        };

        node.append_unique(Category::Enchants, &[], ListEntry::Enchant(record))?;

        if let Some(enchant_id) = gear.permanent_enchant {
            add_resistances(node, RESISTANCE_ENCHANTS.get(&enchant_id))?;
        }

        Ok(())
    }
}

/// Unenchantable slots still count when something is enchanted there anyway.
fn is_enchantable(gear: &GearItem, item: Option<&ItemCatalogEntry>) -> bool {
    gear.id != 0
        && !item.is_some_and(|item| item.not_enchantable)
        && (!UNENCHANTABLE_SLOTS.contains(&gear.slot) || gear.permanent_enchant.is_some())
}

pub fn add_resistances(node: &mut StatNode, resistances: Option<&Vec<(Element, u32)>>) -> Result<(), StatError> {
    for (element, amount) in resistances.into_iter().flatten() {
        node.increment(Category::Resistances, &[(*element).into()], *amount as f64)?;
    }

    Ok(())
}

use anyhow::Result;
use hashbrown::HashMap;
use log::info;

use crate::abstractions::{CatalogItem, CatalogSource};
use crate::models::Element;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemCatalogEntry {
    pub id: i64,
    pub name: String,
    pub slot: Option<u32>,
    pub random_enchantment: bool,
    pub not_enchantable: bool,
    pub resistances: [Option<u32>; 5],
    pub sockets: Option<u32>,
}

impl ItemCatalogEntry {
    pub fn resistance(&self, element: Element) -> Option<u32> {
        self.resistances[element as usize]
    }
}

impl From<CatalogItem> for ItemCatalogEntry {
    fn from(item: CatalogItem) -> Self {
        let mut resistances = [None; 5];

        if let Some(values) = &item.resistances {
            for element in Element::ALL {
                resistances[element as usize] = values.get(element.catalog_key()).copied();
            }
        }

        Self {
            id: item.id,
            name: item.name,
            slot: item.slot,
            random_enchantment: item.random_enchantment.unwrap_or(false),
            not_enchantable: item.not_enchantable.unwrap_or(false),
            resistances,
            sockets: item.sockets,
        }
    }
}

/// Read-only item lookup, loaded once before any gear is processed.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<i64, ItemCatalogEntry>,
}

impl ItemCatalog {
    pub fn load<CS: CatalogSource>(source: &CS) -> Result<Self> {
        let catalog = Self::from_entries(source.read_items()?.into_iter().map(ItemCatalogEntry::from));
        info!("item catalog ready with {} items", catalog.len());
        Ok(catalog)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ItemCatalogEntry>) -> Self {
        let items = entries.into_iter().map(|entry| (entry.id, entry)).collect();
        Self { items }
    }

    pub fn get(&self, id: i64) -> Option<&ItemCatalogEntry> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

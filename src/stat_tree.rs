use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use hashbrown::HashMap;
use log::warn;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::constants::TRASH_ENCOUNTER_ID;
use crate::error::StatError;
use crate::models::{Character, Element};
use crate::payloads::PlayerSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Casts,
    Healing,
    Buffs,
    Resistances,
    Deaths,
    Interrupts,
    Gems,
    Enchants,
    Imbues,
    Roles,
    Specs,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Casts => "casts",
            Category::Healing => "healing",
            Category::Buffs => "buffs",
            Category::Resistances => "resistances",
            Category::Deaths => "deaths",
            Category::Interrupts => "interrupts",
            Category::Gems => "gems",
            Category::Enchants => "enchants",
            Category::Imbues => "imbues",
            Category::Roles => "roles",
            Category::Specs => "specs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatKey {
    Category(Category),
    Id(i64),
    Name(String),
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatKey::Category(category) => f.write_str(category.as_str()),
            StatKey::Id(id) => write!(f, "{id}"),
            StatKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<Category> for StatKey {
    fn from(category: Category) -> Self {
        StatKey::Category(category)
    }
}

impl From<i64> for StatKey {
    fn from(id: i64) -> Self {
        StatKey::Id(id)
    }
}

impl From<&str> for StatKey {
    fn from(name: &str) -> Self {
        StatKey::Name(name.to_string())
    }
}

impl From<Element> for StatKey {
    fn from(element: Element) -> Self {
        StatKey::Name(element.as_str().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnchantRecord {
    #[serde(rename = "id")]
    pub enchant_id: Option<i64>,
    #[serde(rename = "gearId")]
    pub item_id: i64,
    #[serde(rename = "name")]
    pub enchant_name: Option<String>,
    pub slot: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListEntry {
    Id(i64),
    Text(String),
    Enchant(EnchantRecord),
    Spec(PlayerSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Counter(f64),
    List(Vec<ListEntry>),
    Map(BTreeMap<StatKey, StatValue>),
}

impl StatValue {
    pub fn map() -> Self {
        StatValue::Map(BTreeMap::new())
    }

    /// Builds a map value from named fields, used as set-once templates.
    pub fn record<const N: usize>(fields: [(&str, StatValue); N]) -> Self {
        StatValue::Map(
            fields
                .into_iter()
                .map(|(name, value)| (StatKey::from(name), value))
                .collect(),
        )
    }

    pub fn as_counter(&self) -> Option<f64> {
        match self {
            StatValue::Counter(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ListEntry]> {
        match self {
            StatValue::List(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn get(&self, key: &StatKey) -> Option<&StatValue> {
        match self {
            StatValue::Map(children) => children.get(key),
            _ => None,
        }
    }
}

fn serialize_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatValue::Counter(value) => serialize_number(*value, serializer),
            StatValue::List(entries) => entries.serialize(serializer),
            StatValue::Map(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, value) in children {
                    map.serialize_entry(&key.to_string(), value)?;
                }
                map.end()
            }
        }
    }
}

fn full_path(category: Category, path: &[StatKey]) -> Vec<StatKey> {
    let mut keys = Vec::with_capacity(path.len() + 1);
    keys.push(StatKey::Category(category));
    keys.extend_from_slice(path);
    keys
}

fn mismatch(keys: &[StatKey], expected: &'static str) -> StatError {
    let path = keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(".");
    StatError::ShapeMismatch { path, expected }
}

fn walk_mut<'a>(
    mut map: &'a mut BTreeMap<StatKey, StatValue>,
    keys: &[StatKey],
) -> Result<&'a mut BTreeMap<StatKey, StatValue>, StatError> {
    for (index, key) in keys.iter().enumerate() {
        map = match map.entry(key.clone()).or_insert_with(StatValue::map) {
            StatValue::Map(children) => children,
            _ => return Err(mismatch(&keys[..=index], "map")),
        };
    }

    Ok(map)
}

/// Statistics for one character in one encounter.
///
/// Every write is addressed by a category plus a path of keys below it;
/// intermediate maps are created on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct StatNode {
    id: i64,
    root: BTreeMap<StatKey, StatValue>,
}

impl StatNode {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            root: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn get(&self, category: Category, path: &[StatKey]) -> Option<&StatValue> {
        let mut value = self.root.get(&StatKey::Category(category))?;

        for key in path {
            value = value.get(key)?;
        }

        Some(value)
    }

    pub fn counter(&self, category: Category, path: &[StatKey]) -> Option<f64> {
        self.get(category, path).and_then(StatValue::as_counter)
    }

    pub fn increment(&mut self, category: Category, path: &[StatKey], amount: f64) -> Result<(), StatError> {
        let keys = full_path(category, path);
        let Some((leaf, parents)) = keys.split_last() else {
            return Ok(());
        };

        match walk_mut(&mut self.root, parents)?.entry(leaf.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(StatValue::Counter(amount));
            }
            Entry::Occupied(entry) => match entry.into_mut() {
                StatValue::Counter(value) => *value += amount,
                _ => return Err(mismatch(&keys, "counter")),
            },
        }

        Ok(())
    }

    /// First write wins. Returns whatever now lives at the path.
    pub fn set_once(&mut self, category: Category, path: &[StatKey], value: StatValue) -> Result<&mut StatValue, StatError> {
        let keys = full_path(category, path);
        let Some((leaf, parents)) = keys.split_last() else {
            return Err(mismatch(&keys, "path"));
        };

        Ok(walk_mut(&mut self.root, parents)?.entry(leaf.clone()).or_insert(value))
    }

    /// Returns `true` when the entry was not already present.
    pub fn append_unique(&mut self, category: Category, path: &[StatKey], entry: ListEntry) -> Result<bool, StatError> {
        let keys = full_path(category, path);
        let Some((leaf, parents)) = keys.split_last() else {
            return Ok(false);
        };

        let list = walk_mut(&mut self.root, parents)?
            .entry(leaf.clone())
            .or_insert_with(|| StatValue::List(Vec::new()));

        match list {
            StatValue::List(entries) => {
                if entries.contains(&entry) {
                    return Ok(false);
                }
                entries.push(entry);
                Ok(true)
            }
            _ => Err(mismatch(&keys, "list")),
        }
    }

    pub fn append_unique_to_sub(
        &mut self,
        category: Category,
        path: &[StatKey],
        sub_key: StatKey,
        entry: ListEntry,
    ) -> Result<bool, StatError> {
        let mut keys = path.to_vec();
        keys.push(sub_key);
        self.append_unique(category, &keys, entry)
    }
}

impl Serialize for StatNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.root.len() + 1))?;
        map.serialize_entry("id", &self.id)?;
        for (key, value) in &self.root {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

type EncounterNodes = BTreeMap<i64, StatNode>;

/// Shared per-character store written by concurrently running sub-fetches.
///
/// The set of characters and each character's encounter ids are fixed at
/// construction. Each character sits behind its own lock, so writers for
/// different characters never contend and a node is only ever mutated by
/// one writer at a time.
pub struct StatTree {
    characters: HashMap<i64, Mutex<EncounterNodes>>,
}

impl StatTree {
    pub fn new<'a>(characters: impl IntoIterator<Item = &'a Character>) -> Self {
        let characters = characters
            .into_iter()
            .map(|character| (character.id, Mutex::new(character.per_encounter.clone())))
            .collect();

        Self { characters }
    }

    pub fn contains_character(&self, character_id: i64) -> bool {
        self.characters.contains_key(&character_id)
    }

    /// Runs `f` against the node for `encounter_id`, or the trash node when the
    /// character has no node of its own for that encounter. Unknown characters
    /// yield `None`.
    pub fn update<R>(&self, character_id: i64, encounter_id: i64, f: impl FnOnce(&mut StatNode) -> R) -> Option<R> {
        let nodes = self.characters.get(&character_id)?;
        let mut nodes = nodes.lock().unwrap_or_else(PoisonError::into_inner);

        let key = if nodes.contains_key(&encounter_id) {
            encounter_id
        } else {
            TRASH_ENCOUNTER_ID
        };

        nodes.get_mut(&key).map(f)
    }

    /// Like [`StatTree::update`], logging shape mismatches instead of returning them.
    pub fn apply(&self, character_id: i64, encounter_id: i64, f: impl FnOnce(&mut StatNode) -> Result<(), StatError>) {
        if let Some(Err(err)) = self.update(character_id, encounter_id, f) {
            warn!("skipped write for {character_id} in {encounter_id}: {err}");
        }
    }

    pub fn increment_at(&self, character_id: i64, encounter_id: i64, category: Category, path: &[StatKey], amount: f64) {
        self.apply(character_id, encounter_id, |node| node.increment(category, path, amount));
    }

    pub fn set_once_at(&self, character_id: i64, encounter_id: i64, category: Category, path: &[StatKey], value: StatValue) {
        self.apply(character_id, encounter_id, |node| node.set_once(category, path, value).map(|_| ()));
    }

    pub fn append_unique_at(&self, character_id: i64, encounter_id: i64, category: Category, path: &[StatKey], entry: ListEntry) {
        self.apply(character_id, encounter_id, |node| node.append_unique(category, path, entry).map(|_| ()));
    }

    pub fn append_unique_to_sub_at(
        &self,
        character_id: i64,
        encounter_id: i64,
        category: Category,
        path: &[StatKey],
        sub_key: StatKey,
        entry: ListEntry,
    ) {
        self.apply(character_id, encounter_id, |node| {
            node.append_unique_to_sub(category, path, sub_key, entry).map(|_| ())
        });
    }

    pub fn snapshot(&self, character_id: i64) -> Option<EncounterNodes> {
        let nodes = self.characters.get(&character_id)?;
        let nodes = nodes.lock().unwrap_or_else(PoisonError::into_inner);
        Some(nodes.clone())
    }
}

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{SUMMARY_ENCOUNTER_ID, TRASH_ENCOUNTER_ID};
use crate::payloads::{FightDto, FriendlyDto, PetDto};
use crate::stat_tree::StatNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Arcane,
    Fire,
    Frost,
    Nature,
    Shadow,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Arcane,
        Element::Fire,
        Element::Frost,
        Element::Nature,
        Element::Shadow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Arcane => "arcane",
            Element::Fire => "fire",
            Element::Frost => "frost",
            Element::Nature => "nature",
            Element::Shadow => "shadow",
        }
    }

    /// Key used by the item data files, e.g. `"Frost"`.
    pub fn catalog_key(&self) -> &'static str {
        match self {
            Element::Arcane => "Arcane",
            Element::Fire => "Fire",
            Element::Frost => "Frost",
            Element::Nature => "Nature",
            Element::Shadow => "Shadow",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterKind {
    Boss,
    Trash,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Encounter {
    pub id: i64,
    #[serde(rename = "boss")]
    pub boss_id: i64,
    pub kill: Option<bool>,
    pub fight_percentage: Option<f64>,
    #[serde(rename = "fight_type")]
    pub kind: EncounterKind,
    pub start_time: i64,
    pub end_time: i64,
    pub name: String,
}

impl Encounter {
    pub fn is_boss(&self) -> bool {
        self.kind == EncounterKind::Boss
    }

    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Length of `[start, end)` that falls inside this encounter.
    pub fn overlap(&self, start: i64, end: i64) -> i64 {
        (end.min(self.end_time) - start.max(self.start_time)).max(0)
    }
}

impl From<&FightDto> for Encounter {
    fn from(fight: &FightDto) -> Self {
        Self {
            id: fight.id,
            boss_id: fight.boss,
            kill: fight.kill,
            fight_percentage: fight.fight_percentage,
            kind: if fight.boss > 0 { EncounterKind::Boss } else { EncounterKind::Trash },
            start_time: fight.start_time,
            end_time: fight.end_time,
            name: fight.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub class: String,
    pub per_encounter: BTreeMap<i64, StatNode>,
}

impl Character {
    /// Seeds one node per attended boss encounter plus the summary and trash nodes.
    pub fn new(friendly: &FriendlyDto, encounters: &BTreeMap<i64, Encounter>) -> Self {
        let mut per_encounter: BTreeMap<i64, StatNode> = friendly
            .fights
            .iter()
            .filter(|fight| encounters.get(&fight.id).is_some_and(Encounter::is_boss))
            .map(|fight| (fight.id, StatNode::new(fight.id)))
            .collect();

        per_encounter.insert(TRASH_ENCOUNTER_ID, StatNode::new(TRASH_ENCOUNTER_ID));
        per_encounter.insert(SUMMARY_ENCOUNTER_ID, StatNode::new(SUMMARY_ENCOUNTER_ID));

        Self {
            id: friendly.id,
            name: friendly.name.clone(),
            class: friendly.kind.clone(),
            per_encounter,
        }
    }

    pub fn boss_encounter_count(&self) -> usize {
        self.per_encounter.len() - 2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[serde(rename = "pet_owner")]
    pub owner_id: i64,
}

impl From<&PetDto> for Pet {
    fn from(pet: &PetDto) -> Self {
        Self {
            id: pet.id,
            name: pet.name.clone(),
            owner_id: pet.pet_owner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_id: String,
    pub title: String,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub encounters: BTreeMap<i64, Encounter>,
    pub characters: BTreeMap<i64, Character>,
    pub pets: BTreeMap<i64, Pet>,
}

impl Report {
    pub fn started_on(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.start_timestamp)
    }

    pub fn ended_on(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.end_timestamp)
    }

    pub fn boss_encounters(&self) -> impl Iterator<Item = &Encounter> {
        self.encounters.values().filter(|encounter| encounter.is_boss())
    }
}

/// NPCs, pets and bosses show up among friendlies but are not raid members.
pub fn is_raid_member(friendly: &FriendlyDto) -> bool {
    !matches!(friendly.kind.as_str(), "NPC" | "Pet" | "Boss")
}

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::item_catalog::{ItemCatalog, ItemCatalogEntry};
use crate::models::{Character, Element};
use crate::payloads::*;
use crate::report_parser::{load_roster, ReportContext};

use super::*;

fn decode<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

/// Five fights: trash, Attumen, trash, Moroes, Maiden. Aelric (warrior)
/// attends Attumen and Moroes, Brunhild (priest) everything.
pub fn fights_json() -> Value {
    json!({
        "title": "Karazhan",
        "start": REPORT_START,
        "end": REPORT_END,
        "fights": [
            { "id": 1, "boss": 0, "start_time": 0, "end_time": 1000, "name": "Trash" },
            { "id": 2, "boss": 652, "kill": true, "fightPercentage": 0.0, "start_time": 2000, "end_time": 4000, "name": "Attumen the Huntsman" },
            { "id": 3, "boss": 0, "start_time": 5000, "end_time": 6000, "name": "Trash" },
            { "id": 4, "boss": 653, "kill": false, "fightPercentage": 42.5, "start_time": 7000, "end_time": 11000, "name": "Moroes" },
            { "id": 5, "boss": 654, "kill": true, "fightPercentage": 0.0, "start_time": 12000, "end_time": 15000, "name": "Maiden of Virtue" }
        ],
        "friendlies": [
            { "id": 10, "name": "Aelric", "type": "Warrior", "fights": [{ "id": 1 }, { "id": 2 }, { "id": 4 }] },
            { "id": 11, "name": "Brunhild", "type": "Priest", "fights": [{ "id": 1 }, { "id": 2 }, { "id": 3 }, { "id": 4 }, { "id": 5 }] },
            { "id": 12, "name": "Guard", "type": "NPC", "fights": [{ "id": 2 }] },
            { "id": 13, "name": "Wolf", "type": "Pet", "fights": [{ "id": 2 }] }
        ],
        "friendlyPets": [
            { "id": 20, "name": "Cat", "petOwner": 10 }
        ]
    })
}

pub fn create_fights_response() -> FightsResponse {
    decode(fights_json())
}

pub fn create_characters() -> Vec<Character> {
    load_roster(REPORT_ID, &create_fights_response())
        .unwrap()
        .characters
        .into_values()
        .collect()
}

pub fn create_context() -> ReportContext {
    let report = load_roster(REPORT_ID, &create_fights_response()).unwrap();
    ReportContext::new(&report, Arc::new(create_catalog()))
}

fn resistances(values: &[(Element, u32)]) -> [Option<u32>; 5] {
    let mut resistances = [None; 5];
    for (element, amount) in values {
        resistances[*element as usize] = Some(*amount);
    }
    resistances
}

pub fn create_catalog() -> ItemCatalog {
    ItemCatalog::from_entries([
        ItemCatalogEntry {
            id: ITEM_FROSTWOLF_CLOAK,
            name: "Frostwolf Cloak".to_string(),
            slot: Some(14),
            resistances: resistances(&[(Element::Frost, 10)]),
            sockets: Some(1),
            ..Default::default()
        },
        ItemCatalogEntry {
            id: ITEM_SOCKETED_CHEST,
            name: "Socketed Chestguard".to_string(),
            slot: Some(4),
            sockets: Some(2),
            ..Default::default()
        },
        ItemCatalogEntry {
            id: ITEM_RANDOM_HELM,
            name: "Helm of the Wild".to_string(),
            slot: Some(0),
            random_enchantment: true,
            ..Default::default()
        },
        ItemCatalogEntry {
            id: ITEM_RANDOM_RING,
            name: "Band of the Wild".to_string(),
            slot: Some(10),
            random_enchantment: true,
            ..Default::default()
        },
        ItemCatalogEntry {
            id: ITEM_FIRE_SHIRT,
            name: "Flameweave Shirt".to_string(),
            slot: Some(3),
            resistances: resistances(&[(Element::Fire, 50)]),
            ..Default::default()
        },
        ItemCatalogEntry {
            id: ITEM_UNENCHANTABLE_OFF_HAND,
            name: "Tome of Frost".to_string(),
            slot: Some(16),
            not_enchantable: true,
            ..Default::default()
        },
    ])
}

pub fn deaths_json() -> Value {
    json!({
        "entries": [
            { "id": 10, "name": "Aelric", "fight": 2 },
            { "id": 11, "name": "Brunhild", "fight": 3 },
            { "id": 11, "name": "Brunhild", "fight": 4 }
        ]
    })
}

pub fn create_deaths_response() -> DeathsResponse {
    decode(deaths_json())
}

pub fn interrupts_json() -> Value {
    json!({
        "events": [
            { "type": "interrupt", "timestamp": 600, "sourceID": 10, "fight": 1, "ability": { "guid": ABILITY_PUMMEL } },
            { "type": "interrupt", "timestamp": 2400, "sourceID": 10, "fight": 2, "ability": { "guid": ABILITY_PUMMEL } },
            { "type": "interrupt", "timestamp": 5500, "sourceID": 20, "fight": 3, "ability": { "guid": ABILITY_PET_INTERRUPT } },
            { "type": "interrupt", "timestamp": 5600, "sourceID": 12, "fight": 3, "ability": { "guid": ABILITY_PUMMEL } }
        ]
    })
}

pub fn create_interrupts_response() -> InterruptsResponse {
    decode(interrupts_json())
}

pub fn casts_json() -> Value {
    json!({
        "events": [
            { "type": "cast", "timestamp": 500, "fight": 1, "ability": { "guid": ABILITY_HEROIC_STRIKE } },
            { "type": "begincast", "timestamp": 2050, "fight": 2, "ability": { "guid": ABILITY_HEROIC_STRIKE } },
            { "type": "cast", "timestamp": 2100, "fight": 2, "ability": { "guid": ABILITY_HEROIC_STRIKE } },
            { "type": "cast", "timestamp": 2500, "fight": 2, "ability": { "guid": ABILITY_HEROIC_STRIKE } },
            { "type": "cast", "timestamp": 16000, "fight": 99, "ability": { "guid": ABILITY_HEROIC_STRIKE } }
        ]
    })
}

pub fn create_casts_response() -> CastsResponse {
    decode(casts_json())
}

pub fn healing_json() -> Value {
    json!({
        "events": [
            { "type": "heal", "timestamp": 100, "fight": 1, "ability": { "guid": ABILITY_GREATER_HEAL }, "amount": 1000 },
            { "type": "heal", "timestamp": 7100, "fight": 4, "ability": { "guid": ABILITY_GREATER_HEAL }, "amount": 2600 },
            { "type": "heal", "timestamp": 7500, "fight": 4, "ability": { "guid": ABILITY_GREATER_HEAL }, "amount": 2600 }
        ]
    })
}

pub fn create_healing_response() -> HealingResponse {
    decode(healing_json())
}

pub fn buffs_json() -> Value {
    json!({
        "auras": [
            {
                "guid": BUFF_FORTITUDE,
                "name": "Power Word: Fortitude",
                "bands": [{ "startTime": 0, "endTime": 3000 }, { "startTime": 7000, "endTime": 11000 }]
            },
            {
                "guid": BUFF_SHADOW_PROTECTION,
                "name": "Shadow Protection",
                "bands": [{ "startTime": 8000, "endTime": 9000 }]
            }
        ]
    })
}

pub fn create_buffs_response() -> BuffsResponse {
    decode(buffs_json())
}

fn frostwolf_cloak_json() -> Value {
    json!({
        "id": ITEM_FROSTWOLF_CLOAK,
        "slot": 14,
        "name": "Frostwolf Cloak",
        "itemLevel": 70,
        "permanentEnchant": ENCHANT_FROST_GUARD,
        "permanentEnchantName": "Frost Guard",
        "gems": [{ "id": GEM_CHROMATIC_THREE }]
    })
}

pub fn summary_json() -> Value {
    json!({
        "playerDetails": {
            "tanks": [
                { "id": 10, "specs": ["Protection"], "combatantInfo": { "gear": [frostwolf_cloak_json()] } }
            ],
            "healers": [
                { "id": 11, "specs": [{ "spec": "Holy", "role": "healer" }], "combatantInfo": [] }
            ]
        }
    })
}

pub fn create_summary_response() -> SummaryResponse {
    decode(summary_json())
}

/// Attumen only: Aelric tanks in the cloak, Brunhild heals.
pub fn encounter_summary_json() -> Value {
    json!({
        "playerDetails": {
            "tanks": [
                { "id": 10, "specs": ["Protection"], "combatantInfo": { "gear": [frostwolf_cloak_json()] } }
            ],
            "healers": [
                { "id": 11, "specs": ["Holy"] }
            ]
        }
    })
}

pub fn create_encounter_summary_response() -> SummaryResponse {
    decode(encounter_summary_json())
}

pub fn healer_summary_json() -> Value {
    json!({
        "playerDetails": {
            "healers": [{ "id": 11, "specs": ["Holy"] }]
        }
    })
}

use log::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Upstream encodes empty objects as `[]`, which maps to `None` here.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;

    match &value {
        Value::Null => return Ok(None),
        Value::Array(items) if items.is_empty() => return Ok(None),
        _ => {}
    }

    match serde_json::from_value(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(err) => {
            warn!("dropping malformed {}: {}", std::any::type_name::<T>(), err);
            Ok(None)
        }
    }
}

/// Decodes each element on its own, skipping rows that do not fit `T`.
fn rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!("expected a list of {}, got {}", std::any::type_name::<T>(), other);
            return Ok(Vec::new());
        }
    };

    let mut decoded = Vec::with_capacity(items.len());

    for item in items {
        match serde_json::from_value(item) {
            Ok(row) => decoded.push(row),
            Err(err) => warn!("skipping malformed {} row: {}", std::any::type_name::<T>(), err),
        }
    }

    Ok(decoded)
}

#[derive(Debug, Clone, Deserialize)]
pub struct FightsResponse {
    #[serde(default)]
    pub title: String,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub fights: Vec<FightDto>,
    #[serde(default)]
    pub friendlies: Vec<FriendlyDto>,
    #[serde(default, rename = "friendlyPets")]
    pub friendly_pets: Vec<PetDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FightDto {
    pub id: i64,
    #[serde(default)]
    pub boss: i64,
    #[serde(default)]
    pub kill: Option<bool>,
    #[serde(default, rename = "fightPercentage")]
    pub fight_percentage: Option<f64>,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FightRef {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FriendlyDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub fights: Vec<FightRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PetDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "petOwner")]
    pub pet_owner: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ability {
    pub guid: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastsResponse {
    #[serde(default)]
    pub events: Vec<CastEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: i64,
    pub fight: i64,
    pub ability: Ability,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealingResponse {
    #[serde(default)]
    pub events: Vec<HealingEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealingEvent {
    pub timestamp: i64,
    pub fight: i64,
    pub ability: Ability,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DamageTakenResponse {
    #[serde(default)]
    pub events: Vec<DamageTakenEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DamageTakenEvent {
    #[serde(default)]
    pub fight: i64,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuffsResponse {
    #[serde(default)]
    pub auras: Vec<Aura>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aura {
    pub guid: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bands: Vec<Band>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Band {
    #[serde(rename = "startTime")]
    pub start_time: i64,
    #[serde(rename = "endTime")]
    pub end_time: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeathsResponse {
    #[serde(default)]
    pub entries: Vec<DeathEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeathEntry {
    pub id: i64,
    pub fight: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterruptsResponse {
    #[serde(default)]
    pub events: Vec<InterruptEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterruptEvent {
    #[serde(rename = "sourceID")]
    pub source_id: i64,
    pub fight: i64,
    pub ability: Ability,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    #[serde(default, rename = "playerDetails", deserialize_with = "lenient")]
    pub player_details: Option<PlayerDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerDetails {
    #[serde(default, deserialize_with = "rows")]
    pub tanks: Vec<PlayerDetail>,
    #[serde(default, deserialize_with = "rows")]
    pub healers: Vec<PlayerDetail>,
    #[serde(default, deserialize_with = "rows")]
    pub dps: Vec<PlayerDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerDetail {
    pub id: i64,
    #[serde(default, deserialize_with = "rows")]
    pub specs: Vec<PlayerSpec>,
    #[serde(default, rename = "combatantInfo", deserialize_with = "lenient")]
    pub combatant_info: Option<CombatantInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerSpec {
    Named(String),
    Detailed {
        spec: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        role: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CombatantInfo {
    #[serde(default, deserialize_with = "rows")]
    pub gear: Vec<GearItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GearItem {
    pub id: i64,
    pub slot: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub item_level: Option<u32>,
    #[serde(default)]
    pub permanent_enchant: Option<i64>,
    #[serde(default)]
    pub permanent_enchant_name: Option<String>,
    #[serde(default)]
    pub temporary_enchant: Option<i64>,
    #[serde(default)]
    pub gems: Option<Vec<Gem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gem {
    pub id: i64,
}

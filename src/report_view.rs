use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::{SUMMARY_ENCOUNTER_ID, TRASH_ENCOUNTER_ID};
use crate::models::{Encounter, Pet, Report};
use crate::stat_tree::StatNode;

#[derive(Debug, Clone, Serialize)]
pub struct CharacterView<'a> {
    pub id: i64,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub class: &'a str,
    pub data: &'a StatNode,
}

/// A report narrowed to one encounter id. Characters that did not take part
/// in the encounter are left out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView<'a> {
    pub title: &'a str,
    pub report_id: &'a str,
    pub start_time: i64,
    pub end_time: i64,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub encounters: Vec<&'a Encounter>,
    pub characters: BTreeMap<i64, CharacterView<'a>>,
    pub pets: &'a BTreeMap<i64, Pet>,
    #[serde(skip)]
    pub encounter_id: i64,
}

impl ReportView<'_> {
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl Report {
    pub fn view(&self, encounter_id: i64) -> ReportView<'_> {
        let characters = self
            .characters
            .values()
            .filter_map(|character| {
                let data = character.per_encounter.get(&encounter_id)?;

                Some((
                    character.id,
                    CharacterView {
                        id: character.id,
                        name: &character.name,
                        class: &character.class,
                        data,
                    },
                ))
            })
            .collect();

        ReportView {
            title: &self.title,
            report_id: &self.report_id,
            start_time: self.start_time,
            end_time: self.end_time,
            start_timestamp: self.start_timestamp,
            end_timestamp: self.end_timestamp,
            encounters: self.encounters.values().collect(),
            characters,
            pets: &self.pets,
            encounter_id,
        }
    }

    /// Boss encounters in order, then the whole report, then trash.
    pub fn view_ids(&self) -> Vec<i64> {
        self.boss_encounters()
            .map(|encounter| encounter.id)
            .chain([SUMMARY_ENCOUNTER_ID, TRASH_ENCOUNTER_ID])
            .collect()
    }

    pub fn views(&self) -> impl Iterator<Item = ReportView<'_>> {
        self.view_ids().into_iter().map(move |encounter_id| self.view(encounter_id))
    }
}

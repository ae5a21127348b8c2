use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hashbrown::HashMap;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;

#[cfg(test)]
use mockall::automock;

/// One item as stored in the item data files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slot: Option<u32>,
    #[serde(default)]
    pub random_enchantment: Option<bool>,
    #[serde(default)]
    pub not_enchantable: Option<bool>,
    #[serde(default)]
    pub resistances: Option<HashMap<String, u32>>,
    #[serde(default)]
    pub sockets: Option<u32>,
}

#[cfg_attr(test, automock)]
pub trait CatalogSource {
    fn read_items(&self) -> Result<Vec<CatalogItem>>;
}

/// Reads every `*.json` file below `root`. Each file holds a JSON array;
/// elements without an `id` are not items and are skipped.
pub struct DirectoryCatalogSource {
    root: PathBuf,
}

impl CatalogSource for DirectoryCatalogSource {
    fn read_items(&self) -> Result<Vec<CatalogItem>> {
        let mut files = Vec::new();
        collect_json_files(&self.root, &mut files)?;
        files.sort();

        let mut items = Vec::new();

        for path in &files {
            let file = File::open(path).with_context(|| format!("Could not open file: {:?}", path))?;
            let data: Value = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Could not parse file: {:?}", path))?;

            let Value::Array(entries) = data else {
                warn!("skipping {:?}, expected an array of items", path);
                continue;
            };

            for entry in entries.into_iter().filter(|entry| entry.get("id").is_some()) {
                match serde_json::from_value::<CatalogItem>(entry) {
                    Ok(item) => items.push(item),
                    Err(err) => warn!("skipping malformed item in {:?}: {}", path, err),
                }
            }
        }

        info!("read {} items from {} files", items.len(), files.len());

        Ok(items)
    }
}

impl DirectoryCatalogSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

fn collect_json_files(directory: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(directory).with_context(|| format!("Could not read directory: {:?}", directory))?;

    for entry in entries {
        let path = entry?.path();

        if path.is_dir() {
            collect_json_files(&path, files)?;
        } else if path.extension().is_some_and(|extension| extension == "json") {
            files.push(path);
        }
    }

    Ok(())
}

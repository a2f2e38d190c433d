use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};


/// everything extracted from one report, under the field names used in the
/// persisted JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "Successful Job completion")]
    pub success: bool,

    #[serde(rename = "Stationary Point Coordinates")]
    pub coordinates: Vec<[f64; 3]>,

    #[serde(rename = "# Imaginary Frequencies")]
    pub imaginary_count: usize,

    #[serde(rename = "Imaginary Frequencies (cm**-1)")]
    pub imaginary: Vec<f64>,

    #[serde(rename = "Electronic Energy (Ha)")]
    pub electronic: f64,

    #[serde(rename = "G (Ha)")]
    pub gibbs: f64,

    #[serde(rename = "H (Ha)")]
    pub enthalpy: f64,

    #[serde(rename = "TS (Ha)")]
    pub entropy_term: f64,
}

/// one on-disk document of records keyed by caller-supplied species names
pub type ResultStore = BTreeMap<String, ResultRecord>;

/// load the whole store at `path`. fails with [Error::StoreCorrupt] if the
/// file exists but does not hold valid JSON
pub fn load(path: impl AsRef<Path>) -> Result<ResultStore> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| Error::StoreCorrupt {
        path: path.display().to_string(),
        source,
    })
}

/// upsert `record` under `key` in the store at `path`, creating the store if
/// the path does not exist yet. the whole document is read, modified, and
/// written back, so concurrent writers to one store can lose updates; one
/// writer per store at a time
pub fn merge_into(
    path: impl AsRef<Path>,
    key: &str,
    record: ResultRecord,
) -> Result<()> {
    let path = path.as_ref();
    let mut store = if path.exists() {
        load(path)?
    } else {
        ResultStore::new()
    };
    store.insert(key.to_string(), record);
    fs::write(path, serde_json::to_string_pretty(&store)?)?;
    Ok(())
}

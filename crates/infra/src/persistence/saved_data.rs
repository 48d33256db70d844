use std::path::{Path, PathBuf};

use log::{debug, warn};
use notecount_domain::{CountConfig, CountRecord, CountsByPath, NoteCountSettings, SessionCountRecord};
use notecount_shared_kernel::{InfrastructureError, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::{FileReader, FileWriter, migrate_saved_data};

/// Everything persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedData {
    pub cached_counts: CountsByPath,
    pub settings: NoteCountSettings,
}

/// Parses a saved-data blob, migrating older layouts first. Anything that
/// cannot be understood yields the defaults.
pub fn parse_saved_data(text: &str) -> SavedData {
    let mut raw: Value = match serde_json::from_str(text) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("discarding unreadable saved data: {err}");
            return SavedData::default();
        }
    };
    if !raw.is_object() {
        warn!("discarding saved data that is not an object");
        return SavedData::default();
    }
    migrate_saved_data(&mut raw);
    match serde_json::from_value(raw.clone()) {
        Ok(data) => data,
        Err(err) => {
            warn!("saved data does not match the current layout ({err}); keeping the readable parts");
            drop_unreadable_values(&mut raw);
            serde_json::from_value(raw).unwrap_or_else(|err| {
                warn!("discarding saved data: {err}");
                SavedData::default()
            })
        }
    }
}

/// Removes every value that would fail typed deserialisation so the
/// defaults apply to it alone. Cached records that are not objects are
/// dropped.
pub fn drop_unreadable_values(saved: &mut Value) {
    let Some(saved) = saved.as_object_mut() else {
        return;
    };

    match saved.get_mut("settings") {
        Some(Value::Object(settings)) => {
            for value in settings.values_mut() {
                if let Value::Object(config) = value {
                    retain_readable::<CountConfig>(config, "count config");
                }
            }
            retain_readable::<NoteCountSettings>(settings, "setting");
        }
        Some(_) => {
            warn!("ignoring settings that are not an object");
            saved.remove("settings");
        }
        None => {}
    }

    match saved.get_mut("cachedCounts") {
        Some(Value::Object(counts)) => counts.retain(|path, record| {
            let Value::Object(fields) = record else {
                warn!("dropping cached counts for {path}: not an object");
                return false;
            };
            if let Some(Value::Object(session)) = fields.get_mut("sessionStart") {
                retain_readable::<SessionCountRecord>(session, "session field");
            }
            retain_readable::<CountRecord>(fields, "count field");
            true
        }),
        Some(_) => {
            warn!("ignoring cached counts that are not an object");
            saved.remove("cachedCounts");
        }
        None => {}
    }
}

/// Keeps the fields of `object` that `T` can read on their own.
fn retain_readable<T: DeserializeOwned>(object: &mut Map<String, Value>, what: &str) {
    object.retain(|key, value| {
        let single = Map::from_iter([(key.clone(), value.clone())]);
        let readable = serde_json::from_value::<T>(Value::Object(single)).is_ok();
        if !readable {
            warn!("ignoring unreadable {what} {key}: {value}");
        }
        readable
    });
}

/// The JSON file holding [`SavedData`].
#[derive(Debug, Clone)]
pub struct SavedDataStore {
    path: PathBuf,
}

impl SavedDataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored data, or the defaults when the file is missing or unusable.
    pub fn load(&self) -> SavedData {
        match FileReader::read_text(&self.path) {
            Ok(text) => parse_saved_data(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no saved data at {}", self.path.display());
                SavedData::default()
            }
            Err(err) => {
                warn!("unable to read saved data at {}: {err}", self.path.display());
                SavedData::default()
            }
        }
    }

    pub fn save(&self, data: &SavedData) -> Result<()> {
        let json = serde_json::to_vec_pretty(data)?;
        FileWriter::atomic_write(&self.path, &json)
            .map_err(|source| InfrastructureError::FileWrite { path: self.path.clone(), source })?;
        debug!("saved {} cached counts to {}", data.cached_counts.len(), self.path.display());
        Ok(())
    }
}

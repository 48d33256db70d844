//! Upgrades of older saved-data layouts, applied to the raw JSON before it
//! is deserialised.

use log::debug;
use notecount_domain::CountType;
use serde_json::{Map, Number, Value};

type Migration = fn(&mut Map<String, Value>);

/// Applied to the `settings` object, in order.
const MIGRATIONS: [(&str, Migration); 3] = [
    ("coerce_numeric_knobs", coerce_numeric_knobs),
    ("overwrite_invalid_count_types", overwrite_invalid_count_types),
    ("migrate_to_count_configuration_object", migrate_to_count_configuration_object),
];

const NUMERIC_KNOBS: [&str; 4] = ["wordsPerPage", "charsPerPage", "wordsPerMinute", "charsPerMinute"];

const COUNT_TYPE_FIELDS: [&str; 9] = [
    "countType",
    "countType2",
    "countType3",
    "folderCountType",
    "folderCountType2",
    "folderCountType3",
    "rootCountType",
    "rootCountType2",
    "rootCountType3",
];

/// `(legacy key, config object, config field)`.
const LEGACY_CONFIG_KEYS: [(&str, &str, &str); 12] = [
    ("countTypeSuffix", "countConfig", "customSuffix"),
    ("frontmatterKey", "countConfig", "frontmatterKey"),
    ("countType2Suffix", "countConfig2", "customSuffix"),
    ("frontmatterKey2", "countConfig2", "frontmatterKey"),
    ("countType3Suffix", "countConfig3", "customSuffix"),
    ("frontmatterKey3", "countConfig3", "frontmatterKey"),
    ("folderCountTypeSuffix", "folderCountConfig", "customSuffix"),
    ("folderCountType2Suffix", "folderCountConfig2", "customSuffix"),
    ("folderCountType3Suffix", "folderCountConfig3", "customSuffix"),
    ("rootCountTypeSuffix", "rootCountConfig", "customSuffix"),
    ("rootCountType2Suffix", "rootCountConfig2", "customSuffix"),
    ("rootCountType3Suffix", "rootCountConfig3", "customSuffix"),
];

/// Runs every migration over `saved["settings"]`. Blobs without a settings
/// object are left alone.
pub fn migrate_saved_data(saved: &mut Value) {
    let Some(settings) = saved.get_mut("settings").and_then(Value::as_object_mut) else {
        return;
    };
    for (name, migrate) in MIGRATIONS {
        debug!("saved data migration: {name}");
        migrate(settings);
    }
}

/// Numeric strings become numbers; anything that is not a positive finite
/// number is dropped so the default applies.
pub fn coerce_numeric_knobs(settings: &mut Map<String, Value>) {
    for key in NUMERIC_KNOBS {
        let Some(value) = settings.get(key) else {
            continue;
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed.filter(|v| v.is_finite() && *v > 0.0).and_then(Number::from_f64) {
            Some(number) => {
                settings.insert(key.to_string(), Value::Number(number));
            }
            None => {
                debug!("dropping invalid {key}: {value}");
                settings.remove(key);
            }
        }
    }
}

/// Unknown count types fall back to `word` for the first note slot and
/// `none` everywhere else.
pub fn overwrite_invalid_count_types(settings: &mut Map<String, Value>) {
    for field in COUNT_TYPE_FIELDS {
        let Some(value) = settings.get(field) else {
            continue;
        };
        if value.as_str().is_some_and(CountType::is_known) {
            continue;
        }
        let replacement = if field == "countType" { CountType::Word } else { CountType::None };
        settings.insert(field.to_string(), Value::from(replacement.as_str()));
    }
}

/// Moves the flat suffix and front-matter keys into the nested
/// `*CountConfig*` objects.
pub fn migrate_to_count_configuration_object(settings: &mut Map<String, Value>) {
    for (legacy, config_key, field) in LEGACY_CONFIG_KEYS {
        let config = settings.entry(config_key).or_insert_with(|| Value::Object(Map::new()));
        if config.is_null() {
            *config = Value::Object(Map::new());
        }
        if !matches!(settings.get(legacy), Some(Value::String(_))) {
            continue;
        }
        let Some(value) = settings.remove(legacy) else {
            continue;
        };
        if let Some(config) = settings.get_mut(config_key).and_then(Value::as_object_mut) {
            config.insert(field.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut settings = object(json!({
            "wordsPerPage": "250",
            "charsPerPage": 1800,
            "wordsPerMinute": "fast",
            "charsPerMinute": -4,
        }));
        coerce_numeric_knobs(&mut settings);
        assert_eq!(settings["wordsPerPage"], json!(250.0));
        assert_eq!(settings["charsPerPage"], json!(1800.0));
        assert!(!settings.contains_key("wordsPerMinute"));
        assert!(!settings.contains_key("charsPerMinute"));
    }

    #[test]
    fn unknown_count_types_are_replaced() {
        let mut settings = object(json!({
            "countType": "syllables",
            "countType2": "word",
            "folderCountType": 7,
            "rootCountType3": "frontmatterKey",
        }));
        overwrite_invalid_count_types(&mut settings);
        assert_eq!(settings["countType"], json!("word"));
        assert_eq!(settings["countType2"], json!("word"));
        assert_eq!(settings["folderCountType"], json!("none"));
        assert_eq!(settings["rootCountType3"], json!("frontmatterKey"));
    }

    #[test]
    fn legacy_keys_move_into_config_objects() {
        let mut settings = object(json!({
            "countTypeSuffix": " wds",
            "frontmatterKey": "status",
            "rootCountType2Suffix": " notes",
            "folderCountTypeSuffix": 3,
            "countConfig2": {"customSuffix": " kept"},
        }));
        migrate_to_count_configuration_object(&mut settings);

        assert_eq!(settings["countConfig"], json!({"customSuffix": " wds", "frontmatterKey": "status"}));
        assert_eq!(settings["countConfig2"], json!({"customSuffix": " kept"}));
        assert_eq!(settings["rootCountConfig2"], json!({"customSuffix": " notes"}));
        assert_eq!(settings["folderCountConfig"], json!({}));
        assert_eq!(settings["folderCountTypeSuffix"], json!(3));
        assert!(!settings.contains_key("countTypeSuffix"));
        assert!(!settings.contains_key("frontmatterKey"));
    }

    #[test]
    fn blobs_without_settings_are_untouched() {
        let mut saved = json!({"cachedCounts": {}});
        migrate_saved_data(&mut saved);
        assert_eq!(saved, json!({"cachedCounts": {}}));
    }
}

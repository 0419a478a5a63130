//=========================================================================
// State Catalog
//=========================================================================
//
// Immutable, validated table of named state definitions plus the
// default state entered at bootstrap.
//
// Loaded once from a JSON configuration source. A catalog that fails
// validation is rejected wholesale; dangling transition targets only
// warn (they can never be entered, so the edge is merely unreachable).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde_json::Value;

//=== Internal Dependencies ===============================================

use super::{CatalogError, StateDefinition};

//=== Configuration Source ================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CatalogSource {
    states: HashMap<String, StateDefinition>,
    default_state: String,
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            default_state: String::new(),
        }
    }
}

//=== State Catalog =======================================================

/// Validated table of state definitions.
///
/// Immutable after construction; the director swaps in a whole new
/// catalog on reload rather than mutating this one.
#[derive(Debug, Clone)]
pub struct StateCatalog {
    states: HashMap<String, StateDefinition>,
    default_state: String,
    warnings: Vec<String>,
}

impl StateCatalog {
    //--- Construction -----------------------------------------------------

    /// Loads and validates a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::NotFound {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parses and validates a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let source: CatalogSource = serde_json::from_str(text)?;
        Self::from_source(source)
    }

    /// Validates a catalog from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let source: CatalogSource = serde_json::from_value(value)?;
        Self::from_source(source)
    }

    fn from_source(source: CatalogSource) -> Result<Self, CatalogError> {
        if source.states.is_empty() {
            return Err(CatalogError::Invalid("state table is empty".into()));
        }
        if source.default_state.is_empty() {
            return Err(CatalogError::Invalid("no default state named".into()));
        }
        if source.states.keys().any(|name| name.is_empty()) {
            return Err(CatalogError::Invalid(
                "state with an empty name is not allowed".into(),
            ));
        }
        if !source.states.contains_key(&source.default_state) {
            return Err(CatalogError::Invalid(format!(
                "default state {:?} is not defined",
                source.default_state
            )));
        }

        let mut warnings = Vec::new();
        for (name, def) in &source.states {
            for target in &def.allowed_transitions {
                if !source.states.contains_key(target) {
                    let message = format!(
                        "state {:?} allows transition to undefined state {:?}",
                        name, target
                    );
                    warn!("{}", message);
                    warnings.push(message);
                }
            }
        }

        Ok(Self {
            states: source.states,
            default_state: source.default_state,
            warnings,
        })
    }

    //--- Queries ----------------------------------------------------------

    /// The state entered at bootstrap.
    pub fn default_state(&self) -> &str {
        &self.default_state
    }

    /// True if `name` is a catalog member.
    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Looks up a state definition by name.
    pub fn get(&self, name: &str) -> Option<&StateDefinition> {
        self.states.get(name)
    }

    /// Number of defined states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when no states are defined (never true for a valid catalog).
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over the defined state names.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Soft validation findings collected at load time.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GAME_CATALOG: &str = r#"{
        "defaultState": "MENU",
        "states": {
            "MENU": { "allowedTransitions": ["PLAYING"] },
            "PLAYING": { "allowedTransitions": ["PAUSED", "MENU"] },
            "PAUSED": { "allowedTransitions": ["PLAYING"] }
        }
    }"#;

    #[test]
    fn loads_valid_catalog() {
        let catalog = StateCatalog::from_json(GAME_CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.default_state(), "MENU");
        assert!(catalog.contains("PAUSED"));
        assert!(catalog.warnings().is_empty());
    }

    #[test]
    fn empty_state_table_is_rejected() {
        let result = StateCatalog::from_json(r#"{"defaultState": "A", "states": {}}"#);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn missing_default_state_is_rejected() {
        let result = StateCatalog::from_json(r#"{"states": {"A": {}}}"#);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn undefined_default_state_is_rejected() {
        let result =
            StateCatalog::from_json(r#"{"defaultState": "MISSING", "states": {"A": {}}}"#);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn empty_state_name_is_rejected() {
        let result = StateCatalog::from_json(r#"{"defaultState": "A", "states": {"A": {}, "": {}}}"#);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = StateCatalog::from_json("{ not json");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn dangling_transition_target_only_warns() {
        let catalog = StateCatalog::from_json(
            r#"{
                "defaultState": "A",
                "states": { "A": { "allowedTransitions": ["GHOST"] } }
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.warnings().len(), 1);
        assert!(catalog.warnings()[0].contains("GHOST"));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = StateCatalog::load("/no/such/catalog.json");
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn load_reads_catalog_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GAME_CATALOG.as_bytes()).unwrap();

        let catalog = StateCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.default_state(), "MENU");
    }

    #[test]
    fn from_value_accepts_parsed_config() {
        let value: Value = serde_json::from_str(GAME_CATALOG).unwrap();
        let catalog = StateCatalog::from_value(value).unwrap();
        assert!(catalog.contains("PLAYING"));
    }
}

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::nav::Location;
use crate::practice::drafts::DraftStore;

/// Draft blob file name, the fixed storage key of the persistence contract.
pub const DRAFTS_FILE: &str = "star-practice-drafts.json";
const SESSION_FILE: &str = "session.json";

/// Per-install session state: which section was open last.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub last_section: Option<String>,
}

#[derive(Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("starcard");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing file means no drafts yet; an unreadable or unparsable file is
    /// logged and treated the same, never propagated.
    pub fn load_drafts(&self) -> DraftStore {
        self.load(DRAFTS_FILE)
    }

    pub fn save_drafts(&self, drafts: &DraftStore) -> Result<()> {
        self.save(DRAFTS_FILE, drafts)
    }

    pub fn load_session(&self) -> SessionState {
        self.load(SESSION_FILE)
    }

    pub fn save_session(&self, state: &SessionState) -> Result<()> {
        self.save(SESSION_FILE, state)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("discarding malformed {}: {e}", path.display());
                    T::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {e}", path.display());
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// The production [`Location`]: mirrors the active section into
/// `session.json` so the next launch reopens it. Replace-style only; there
/// is no history to push onto.
pub struct StoredLocation {
    state: SessionState,
    store: Option<JsonStore>,
}

impl StoredLocation {
    pub fn new(store: Option<&JsonStore>) -> Self {
        let state = store.map(JsonStore::load_session).unwrap_or_default();
        Self {
            state,
            store: store.cloned(),
        }
    }

    /// Variant for `--section` overrides: reads as the given id but still
    /// persists later changes through the store.
    pub fn with_override(store: Option<&JsonStore>, id: &str) -> Self {
        let mut location = Self::new(store);
        location.state.last_section = Some(id.to_string());
        location
    }
}

impl Location for StoredLocation {
    fn read(&self) -> Option<String> {
        self.state.last_section.clone()
    }

    fn replace(&mut self, id: &str) {
        if self.state.last_section.as_deref() == Some(id) {
            return;
        }
        self.state.last_section = Some(id.to_string());
        if let Some(ref store) = self.store
            && let Err(e) = store.save_session(&self.state)
        {
            log::warn!("failed to persist session state: {e}");
        }
    }
}

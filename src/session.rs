use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionMetadata {
    created_at: SystemTime,
    last_used: SystemTime,
}

impl Default for SessionMetadata {
    fn default() -> Self {
        let now = SystemTime::now();
        Self {
            created_at: now,
            last_used: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionEntry<T> {
    data: T,
    metadata: SessionMetadata,
}

impl<T> SessionEntry<T> {
    fn touch(&mut self) {
        self.metadata.last_used = SystemTime::now();
    }
}

/// Per-session data, optionally persisted as json after every change
#[derive(Debug, Clone)]
pub struct SessionStore<T> {
    sessions: Arc<RwLock<HashMap<String, SessionEntry<T>>>>,
    storage_path: Option<PathBuf>,
}

impl<T> SessionStore<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Clone + Default,
{
    pub fn new(storage_path: Option<PathBuf>) -> Result<Self> {
        if let Some(storage_path) = &storage_path {
            if let Some(parent) = storage_path.parent() {
                fs::create_dir_all(parent)?;
            }

            OpenOptions::new()
                .append(true)
                .create(true)
                .open(storage_path)
                .map_err(|_| anyhow!("could not open {}", storage_path.to_string_lossy()))?;
        }

        let store = Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            storage_path,
        };

        store.load()?;

        Ok(store)
    }

    /// Get session data, creating the session if it doesn't exist
    pub fn get_or_create(&self, session_id: &str) -> Result<T> {
        let data = {
            let mut sessions = self.write()?;
            let entry = sessions
                .entry(session_id.to_string())
                .and_modify(SessionEntry::touch)
                .or_default();
            entry.data.clone()
        };

        self.save()?;
        Ok(data)
    }

    pub fn update<R>(&self, session_id: &str, fun: impl FnOnce(&mut T) -> R) -> Result<R> {
        let result = {
            let mut sessions = self.write()?;
            let entry = sessions
                .entry(session_id.to_string())
                .and_modify(SessionEntry::touch)
                .or_default();
            fun(&mut entry.data)
        };

        self.save()?;
        Ok(result)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, SessionEntry<T>>>> {
        self.sessions
            .read()
            .map_err(|_| anyhow!("session store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, SessionEntry<T>>>> {
        self.sessions
            .write()
            .map_err(|_| anyhow!("session store lock poisoned"))
    }

    fn load(&self) -> Result<()> {
        if let Some(storage_path) = &self.storage_path {
            let contents = fs::read_to_string(storage_path)?;
            // an empty or corrupt file starts a fresh store
            match serde_json::from_str(&contents) {
                Ok(sessions) => *self.write()? = sessions,
                Err(e) if !contents.trim().is_empty() => {
                    log::warn!("ignoring unreadable session file: {e}");
                }
                Err(_) => {}
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(storage_path) = &self.storage_path {
            let contents = serde_json::to_string_pretty(&*self.read()?)?;
            fs::write(storage_path, &contents)?;
        }
        Ok(())
    }
}

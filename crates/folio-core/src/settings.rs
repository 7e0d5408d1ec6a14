use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const SETTINGS_VERSION: u32 = 1;

/// Longest accepted visitor id, in bytes.
pub const MAX_VISITOR_ID_LEN: usize = 64;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    #[default]
    System,
}

/// Visitor preferences, stored as one versioned JSON document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub version: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub splash_seen_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub typing_best_wpm: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            theme: Theme::System,
            splash_seen_at: None,
            typing_best_wpm: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings version {found} is newer than supported version {SETTINGS_VERSION}")]
    UnsupportedVersion { found: u64 },
    #[error("settings document must be a JSON object")]
    NotAnObject,
    #[error("invalid settings document: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("invalid visitor id {0:?}")]
    InvalidVisitor(String),
    #[error("settings io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Settings {
    /// Parses a stored document, migrating older layouts forward.
    /// A missing `version` marks the v0 layout: loose string keys
    /// `prefers-dark`, `splash-seen-at` and `typing-best-wpm`.
    pub fn from_value(value: Value) -> Result<Self, SettingsError> {
        let Value::Object(map) = &value else {
            return Err(SettingsError::NotAnObject);
        };

        match map.get("version").and_then(Value::as_u64) {
            None | Some(0) => Ok(migrate_v0(map)),
            Some(v) if v > u64::from(SETTINGS_VERSION) => {
                Err(SettingsError::UnsupportedVersion { found: v })
            }
            Some(_) => {
                let mut settings: Settings = serde_json::from_value(value)?;
                settings.version = SETTINGS_VERSION;
                Ok(settings)
            }
        }
    }
}

fn migrate_v0(map: &serde_json::Map<String, Value>) -> Settings {
    let text = |key: &str| -> Option<String> {
        match map.get(key)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    };

    let theme = match text("prefers-dark").as_deref() {
        Some("true") => Theme::Dark,
        Some("false") => Theme::Light,
        _ => Theme::System,
    };

    let splash_seen_at = text("splash-seen-at").and_then(|raw| {
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                raw.parse::<i64>()
                    .ok()
                    .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            })
    });

    let typing_best_wpm = text("typing-best-wpm").and_then(|raw| raw.parse::<u32>().ok());

    Settings {
        version: SETTINGS_VERSION,
        theme,
        splash_seen_at,
        typing_best_wpm,
    }
}

/// Visitor ids name files, so only `[A-Za-z0-9_-]` is accepted.
pub fn is_valid_visitor_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_VISITOR_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// One settings document per visitor, `{dir}/{visitor}.json`. Stores handed
/// out by the same directory share a write lock.
#[derive(Debug, Clone)]
pub struct SettingsDir {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl SettingsDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// `{root}/data/settings/`
    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join("data").join("settings"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn visitor(&self, id: &str) -> Result<SettingsStore, SettingsError> {
        if !is_valid_visitor_id(id) {
            return Err(SettingsError::InvalidVisitor(id.to_string()));
        }
        Ok(SettingsStore {
            path: self.dir.join(format!("{id}.json")),
            write_lock: self.write_lock.clone(),
        })
    }
}

/// File-backed settings. Writes replace the whole document through a temp
/// file in the same directory; the last writer wins.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file reads as defaults.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        Settings::from_value(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write_atomic(settings)
    }

    /// Read-modify-write under the store's write lock.
    pub fn update<F>(&self, apply: F) -> Result<Settings, SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut settings = self.load()?;
        apply(&mut settings);
        settings.version = SETTINGS_VERSION;
        self.write_atomic(&settings)?;
        Ok(settings)
    }

    pub fn theme(&self) -> Result<Theme, SettingsError> {
        Ok(self.load()?.theme)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Settings, SettingsError> {
        self.update(|s| s.theme = theme)
    }

    pub fn mark_splash_seen(&self, at: DateTime<Utc>) -> Result<Settings, SettingsError> {
        self.update(|s| s.splash_seen_at = Some(at))
    }

    /// Keeps the higher of the stored best and `wpm`; returns the best.
    pub fn record_typing_score(&self, wpm: u32) -> Result<u32, SettingsError> {
        let settings = self.update(|s| {
            if s.typing_best_wpm.map_or(true, |best| wpm > best) {
                s.typing_best_wpm = Some(wpm);
            }
        })?;
        Ok(settings.typing_best_wpm.unwrap_or(wpm))
    }

    fn write_atomic(&self, settings: &Settings) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(io_err)?;

        let body = serde_json::to_vec_pretty(settings)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(&body).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        tracing::debug!("Wrote settings to {}", self.path.display());
        Ok(())
    }
}

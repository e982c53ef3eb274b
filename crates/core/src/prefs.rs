//! Reader preferences: dark mode, accent color, and grid column count.
//!
//! Preferences are loaded once through a [`PreferenceStore`] and written back
//! on every change. The store speaks string keys and values so a browser-style
//! key/value backend and a JSON file behave the same way.

use crate::error::{BlogError, BlogResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Storage key for the light/dark flag (`"dark"` or `"light"`).
pub const THEME_KEY: &str = "theme";
/// Storage key for the accent color name.
pub const THEME_COLOR_KEY: &str = "themeColor";
/// Storage key for the list column count.
pub const COLUMNS_KEY: &str = "columns";

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u8 = 3;

/// Accent color choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Blue,
    Red,
    Green,
    Purple,
    Orange,
    Pink,
    Emerald,
    Slate,
}

/// The five shades injected for an accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub shade_50: &'static str,
    pub shade_100: &'static str,
    pub shade_500: &'static str,
    pub shade_600: &'static str,
    pub shade_700: &'static str,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 8] = [
        ThemeColor::Blue,
        ThemeColor::Red,
        ThemeColor::Green,
        ThemeColor::Purple,
        ThemeColor::Orange,
        ThemeColor::Pink,
        ThemeColor::Emerald,
        ThemeColor::Slate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Emerald => "emerald",
            Self::Slate => "slate",
        }
    }

    pub fn palette(self) -> Palette {
        let (shade_50, shade_100, shade_500, shade_600, shade_700) = match self {
            Self::Blue => ("#f0f9ff", "#e0f2fe", "#0ea5e9", "#0284c7", "#0369a1"),
            Self::Red => ("#fef2f2", "#fee2e2", "#ef4444", "#dc2626", "#b91c1c"),
            Self::Green => ("#f0fdf4", "#dcfce7", "#22c55e", "#16a34a", "#15803d"),
            Self::Purple => ("#faf5ff", "#f3e8ff", "#a855f7", "#9333ea", "#7e22ce"),
            Self::Orange => ("#fff7ed", "#ffedd5", "#f97316", "#ea580c", "#c2410c"),
            Self::Pink => ("#fdf2f8", "#fce7f3", "#ec4899", "#db2777", "#be185d"),
            Self::Emerald => ("#ecfdf5", "#d1fae5", "#10b981", "#059669", "#047857"),
            Self::Slate => ("#f8fafc", "#f1f5f9", "#64748b", "#475569", "#334155"),
        };
        Palette {
            shade_50,
            shade_100,
            shade_500,
            shade_600,
            shade_700,
        }
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeColor {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| BlogError::Config(format!("unknown theme color: {s}")))
    }
}

/// A snapshot of the reader's preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub dark_mode: bool,
    pub theme_color: ThemeColor,
    pub columns: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            theme_color: ThemeColor::default(),
            columns: DEFAULT_COLUMNS,
        }
    }
}

/// Validate a column count (1 to 3).
pub fn validate_columns(columns: u8) -> BlogResult<u8> {
    if (1..=3).contains(&columns) {
        Ok(columns)
    } else {
        Err(BlogError::Config(format!(
            "columns must be 1, 2 or 3 (got {columns})"
        )))
    }
}

/// Backend for persisted preference values.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> BlogResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> BlogResult<()>;
}

/// Volatile store, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> BlogResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> BlogResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// A missing file reads as empty; the file and its parent directory are
/// created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BlogResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    /// A corrupt file reads as empty so the reader still starts with defaults.
    fn get(&self, key: &str) -> BlogResult<Option<String>> {
        match self.read_all() {
            Ok(mut values) => Ok(values.remove(key)),
            Err(BlogError::Json(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring unreadable preference file"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Refuses to overwrite a file it cannot parse.
    fn set(&mut self, key: &str, value: &str) -> BlogResult<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Preferences plus the store they persist to.
///
/// Passed explicitly to whatever renders; there is no global preference state.
#[derive(Debug)]
pub struct PreferenceContext<S: PreferenceStore> {
    store: S,
    prefs: Preferences,
}

impl<S: PreferenceStore> PreferenceContext<S> {
    /// Load preferences from `store`.
    ///
    /// With no stored theme, `system_prefers_dark` decides dark mode.
    /// Unrecognized stored values fall back to the defaults.
    pub fn load(store: S, system_prefers_dark: bool) -> BlogResult<Self> {
        let dark_mode = match store.get(THEME_KEY)?.as_deref() {
            Some("dark") => true,
            Some(_) => false,
            None => system_prefers_dark,
        };

        let theme_color = match store.get(THEME_COLOR_KEY)? {
            Some(raw) => raw.parse::<ThemeColor>().unwrap_or_else(|_| {
                tracing::debug!(value = %raw, "ignoring unknown stored theme color");
                ThemeColor::default()
            }),
            None => ThemeColor::default(),
        };

        let columns = store
            .get(COLUMNS_KEY)?
            .and_then(|raw| raw.parse::<u8>().ok())
            .and_then(|n| validate_columns(n).ok())
            .unwrap_or(DEFAULT_COLUMNS);

        Ok(Self {
            store,
            prefs: Preferences {
                dark_mode,
                theme_color,
                columns,
            },
        })
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_dark_mode(&mut self, dark: bool) -> BlogResult<()> {
        self.store
            .set(THEME_KEY, if dark { "dark" } else { "light" })?;
        self.prefs.dark_mode = dark;
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) -> BlogResult<bool> {
        let dark = !self.prefs.dark_mode;
        self.set_dark_mode(dark)?;
        Ok(dark)
    }

    pub fn set_theme_color(&mut self, color: ThemeColor) -> BlogResult<()> {
        self.store.set(THEME_COLOR_KEY, color.name())?;
        self.prefs.theme_color = color;
        Ok(())
    }

    pub fn set_columns(&mut self, columns: u8) -> BlogResult<()> {
        let columns = validate_columns(columns)?;
        self.store.set(COLUMNS_KEY, &columns.to_string())?;
        self.prefs.columns = columns;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{ truncated").unwrap();

        let mut ctx = PreferenceContext::load(FileStore::new(&path), true).unwrap();
        assert_eq!(
            ctx.preferences(),
            Preferences {
                dark_mode: true,
                ..Preferences::default()
            }
        );

        assert!(matches!(ctx.set_columns(2), Err(BlogError::Json(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ truncated");
    }

    #[test]
    fn test_defaults_from_empty_store() {
        let ctx = PreferenceContext::load(MemoryStore::new(), false).unwrap();
        assert_eq!(ctx.preferences(), Preferences::default());
    }

    #[test]
    fn test_system_hint_only_without_stored_theme() {
        let ctx = PreferenceContext::load(MemoryStore::new(), true).unwrap();
        assert!(ctx.preferences().dark_mode);

        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "light").unwrap();
        let ctx = PreferenceContext::load(store, true).unwrap();
        assert!(!ctx.preferences().dark_mode);
    }

    #[test]
    fn test_writes_through() {
        let mut ctx = PreferenceContext::load(MemoryStore::new(), false).unwrap();
        ctx.set_dark_mode(true).unwrap();
        ctx.set_theme_color(ThemeColor::Emerald).unwrap();
        ctx.set_columns(2).unwrap();

        let store = ctx.store();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(
            store.get(THEME_COLOR_KEY).unwrap().as_deref(),
            Some("emerald")
        );
        assert_eq!(store.get(COLUMNS_KEY).unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_rejects_bad_columns() {
        let mut ctx = PreferenceContext::load(MemoryStore::new(), false).unwrap();
        assert!(matches!(ctx.set_columns(4), Err(BlogError::Config(_))));
        assert!(matches!(ctx.set_columns(0), Err(BlogError::Config(_))));
        assert_eq!(ctx.preferences().columns, DEFAULT_COLUMNS);
    }

    #[test]
    fn test_bad_stored_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(THEME_COLOR_KEY, "magenta").unwrap();
        store.set(COLUMNS_KEY, "9").unwrap();
        let ctx = PreferenceContext::load(store, false).unwrap();
        assert_eq!(ctx.preferences().theme_color, ThemeColor::Blue);
        assert_eq!(ctx.preferences().columns, DEFAULT_COLUMNS);
    }

    #[test]
    fn test_toggle() {
        let mut ctx = PreferenceContext::load(MemoryStore::new(), false).unwrap();
        assert!(ctx.toggle_dark_mode().unwrap());
        assert!(!ctx.toggle_dark_mode().unwrap());
    }

    #[test]
    fn test_theme_color_parse_and_palette() {
        assert_eq!("pink".parse::<ThemeColor>().unwrap(), ThemeColor::Pink);
        assert!("Pink".parse::<ThemeColor>().is_err());
        assert_eq!(ThemeColor::Blue.palette().shade_500, "#0ea5e9");
        assert_eq!(ThemeColor::Slate.palette().shade_700, "#334155");
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut ctx = PreferenceContext::load(FileStore::new(&path), false).unwrap();
        ctx.set_theme_color(ThemeColor::Orange).unwrap();
        ctx.set_dark_mode(true).unwrap();

        let reloaded = PreferenceContext::load(FileStore::new(&path), false).unwrap();
        assert_eq!(reloaded.preferences().theme_color, ThemeColor::Orange);
        assert!(reloaded.preferences().dark_mode);
    }

    #[test]
    fn test_file_store_garbage_reads_empty_but_blocks_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = FileStore::new(&path);
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        assert!(matches!(
            store.set(THEME_KEY, "dark"),
            Err(BlogError::Json(_))
        ));
    }
}

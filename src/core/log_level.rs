//! Log level definitions
//!
//! Levels are data, not an enum: a [`LevelRegistry`] maps case-insensitive keys
//! to [`LevelDescriptor`]s and can be extended at runtime. Callers select a level
//! either by key or with inline [`LogOptions`] through [`LevelSelector`].

use colored::Color;
use std::collections::HashMap;
use std::fmt;

/// Key of the seeded debug level
pub const DEBUG: &str = "debug";
/// Key of the seeded info level
pub const INFO: &str = "info";
/// Key of the seeded warn level
pub const WARN: &str = "warn";
/// Key of the seeded error level, used by the error path
pub const ERROR: &str = "error";
/// Key of the seeded fallback level for ad-hoc messages
pub const CUSTOM: &str = "custom";

/// Display metadata bound to a level key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDescriptor {
    key: String,
    display_name: String,
    color: Option<Color>,
    glyph: Option<String>,
}

impl LevelDescriptor {
    /// Build a descriptor the way `register` stores it: lowercase key, uppercase name.
    pub fn new(name: &str, color: Option<Color>, glyph: Option<&str>) -> Self {
        Self {
            key: name.to_lowercase(),
            display_name: name.to_uppercase(),
            color,
            glyph: glyph.map(str::to_string),
        }
    }

    /// Get the lowercase registry key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the name shown inside the level tag
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Get the tag color, if any
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Get the glyph printed before the tag, if any
    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }
}

impl fmt::Display for LevelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Case-insensitive mapping from level key to descriptor
///
/// # Example
///
/// ```
/// use errlog::core::LevelRegistry;
/// use colored::Color;
///
/// let mut levels = LevelRegistry::new();
/// levels.register("trace", Some(Color::Blue), None);
///
/// assert_eq!(levels.resolve("TRACE").unwrap().display_name(), "TRACE");
/// assert_eq!(levels.resolve("Error"), levels.resolve("error"));
/// ```
#[derive(Debug, Clone)]
pub struct LevelRegistry {
    levels: HashMap<String, LevelDescriptor>,
}

impl LevelRegistry {
    /// Create a registry seeded with the built-in levels
    pub fn new() -> Self {
        let mut registry = Self {
            levels: HashMap::new(),
        };
        registry.register(DEBUG, Some(Color::Cyan), None);
        registry.register(INFO, Some(Color::Green), Some("✔"));
        registry.register(WARN, Some(Color::Yellow), Some("⚠"));
        registry.register(ERROR, Some(Color::Red), Some("☠"));
        registry.register(CUSTOM, Some(Color::Magenta), None);
        registry
    }

    /// Look a level up by key, ignoring case
    pub fn resolve(&self, key: &str) -> Option<&LevelDescriptor> {
        self.levels.get(&key.to_lowercase())
    }

    /// Store a level under `lowercase(name)`, replacing any previous entry.
    pub fn register(&mut self, name: &str, color: Option<Color>, glyph: Option<&str>) {
        let descriptor = LevelDescriptor::new(name, color, glyph);
        self.levels.insert(descriptor.key.clone(), descriptor);
    }

    /// Get the number of registered levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check whether no level is registered
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One-off level supplied in [`LogOptions`] instead of via registration
///
/// If a level with the same name is registered, the registered descriptor wins.
/// Otherwise the name is displayed exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineLevel {
    pub name: String,
    pub color: Option<Color>,
}

impl InlineLevel {
    /// Create an uncolored inline level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    /// Set the tag color
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub(crate) fn to_descriptor(&self) -> LevelDescriptor {
        LevelDescriptor {
            key: self.name.to_lowercase(),
            display_name: self.name.clone(),
            color: self.color,
            glyph: None,
        }
    }
}

/// Per-call options, overriding the logger configuration for one call only
///
/// # Example
///
/// ```
/// use errlog::core::{InlineLevel, LogOptions};
///
/// let options = LogOptions::new()
///     .level(InlineLevel::new("audit"))
///     .timestamp(false);
/// assert_eq!(options.timestamp, Some(false));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub level: Option<InlineLevel>,
    /// `Some(false)` suppresses the timestamp; `Some(true)` cannot force it on.
    pub timestamp: Option<bool>,
    pub hide_level: bool,
}

impl LogOptions {
    /// Create options that change nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an inline level for this call
    #[must_use]
    pub fn level(mut self, level: InlineLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Override timestamp visibility for this call
    #[must_use]
    pub fn timestamp(mut self, show: bool) -> Self {
        self.timestamp = Some(show);
        self
    }

    /// Drop the level tag for this call
    #[must_use]
    pub fn hide_level(mut self, hide: bool) -> Self {
        self.hide_level = hide;
        self
    }
}

/// How a logging call names its level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSelector {
    /// Registry key, matched case-insensitively
    Key(String),
    /// Inline options, optionally carrying a one-off level
    Inline(LogOptions),
}

impl LevelSelector {
    /// Select a registered level by key
    pub fn key(key: impl Into<String>) -> Self {
        LevelSelector::Key(key.into())
    }

    pub(crate) fn options(&self) -> Option<&LogOptions> {
        match self {
            LevelSelector::Key(_) => None,
            LevelSelector::Inline(options) => Some(options),
        }
    }
}

impl From<&str> for LevelSelector {
    fn from(key: &str) -> Self {
        LevelSelector::Key(key.to_string())
    }
}

impl From<String> for LevelSelector {
    fn from(key: String) -> Self {
        LevelSelector::Key(key)
    }
}

impl From<LogOptions> for LevelSelector {
    fn from(options: LogOptions) -> Self {
        LevelSelector::Inline(options)
    }
}

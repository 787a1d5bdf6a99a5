//! Configuration types for parsing, filtering and windowing.
//!
//! These are plain serde structs with builder methods, usable without any CLI
//! framework. With the `config-file` feature, [`Settings`] can be loaded from
//! a TOML file.
//!
//! # Example
//!
//! ```rust
//! use weekpack::config::{SystemFilterConfig, SystemNoticeLocale, WindowConfig};
//!
//! let window = WindowConfig::new("mai ly").with_context_size(3);
//! let filter = SystemFilterConfig::new().with_locale(SystemNoticeLocale::English);
//!
//! assert_eq!(window.context_size, 3);
//! assert!(filter.phrases.iter().any(|p| p.contains("omitted")));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, WeekpackError};

/// Default number of messages taken on each side of a target message.
pub const DEFAULT_CONTEXT_SIZE: usize = 5;

/// Invisible marker that WhatsApp puts in front of protocol notices
/// (U+200E LEFT-TO-RIGHT MARK).
pub const SYSTEM_MARKER: char = '\u{200E}';

/// Locales with a built-in set of system notice phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemNoticeLocale {
    /// German exports.
    German,
    /// English exports.
    English,
}

impl SystemNoticeLocale {
    /// Returns the notice phrases this locale's exports contain.
    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            SystemNoticeLocale::German => &[
                "Nachrichten und Anrufe sind Ende-zu-Ende-verschlüsselt",
                "\u{200E}Audio weggelassen",
                "\u{200E}Video weggelassen",
                "\u{200E}Bild weggelassen",
                "\u{200E}Sticker weggelassen",
                "\u{200E}Dokument weggelassen",
                "\u{200E}GIF weggelassen",
                "\u{200E}Kontakt weggelassen",
                "Diese Nachricht wurde gelöscht",
                "\u{200E}<Diese Nachricht wurde bearbeitet.>",
            ],
            SystemNoticeLocale::English => &[
                "Messages and calls are end-to-end encrypted",
                "\u{200E}audio omitted",
                "\u{200E}video omitted",
                "\u{200E}image omitted",
                "\u{200E}sticker omitted",
                "\u{200E}document omitted",
                "\u{200E}GIF omitted",
                "\u{200E}Contact card omitted",
                "This message was deleted",
                "You deleted this message",
                "\u{200E}<This message was edited>",
            ],
        }
    }
}

/// What counts as a system notice rather than authored content.
///
/// A message is a notice when its text starts with [`marker`](Self::marker)
/// or contains any of [`phrases`](Self::phrases).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemFilterConfig {
    /// Leading character that flags protocol notices (default: U+200E)
    pub marker: char,

    /// Substrings that identify notices (default: German set)
    pub phrases: Vec<String>,
}

impl Default for SystemFilterConfig {
    fn default() -> Self {
        Self {
            marker: SYSTEM_MARKER,
            phrases: Vec::new(),
        }
        .with_locale(SystemNoticeLocale::German)
    }
}

impl SystemFilterConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with a marker but no phrases.
    pub fn empty() -> Self {
        Self {
            marker: SYSTEM_MARKER,
            phrases: Vec::new(),
        }
    }

    /// Adds every phrase of `locale` not already present.
    #[must_use]
    pub fn with_locale(mut self, locale: SystemNoticeLocale) -> Self {
        for phrase in locale.phrases() {
            if !self.phrases.iter().any(|p| p == phrase) {
                self.phrases.push((*phrase).to_string());
            }
        }
        self
    }

    /// Adds a single phrase.
    #[must_use]
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrases.push(phrase.into());
        self
    }

    /// Sets the marker character.
    #[must_use]
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }
}

/// Configuration for reading a transcript into messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Drop system notices after parsing (default: true)
    pub skip_system_messages: bool,

    /// Notice detection rules
    pub system_filter: SystemFilterConfig,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            skip_system_messages: true,
            system_filter: SystemFilterConfig::default(),
        }
    }
}

impl TranscriptConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip system messages.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Replaces the notice detection rules.
    #[must_use]
    pub fn with_system_filter(mut self, filter: SystemFilterConfig) -> Self {
        self.system_filter = filter;
        self
    }
}

/// Who the windows are built around and how wide they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Sender whose messages trigger windows
    pub target_user: String,

    /// Messages taken on each side of a trigger (default: 5)
    #[serde(default = "default_context_size")]
    pub context_size: usize,
}

fn default_context_size() -> usize {
    DEFAULT_CONTEXT_SIZE
}

impl WindowConfig {
    /// Creates a configuration for `target_user` with the default context size.
    pub fn new(target_user: impl Into<String>) -> Self {
        Self {
            target_user: target_user.into(),
            context_size: DEFAULT_CONTEXT_SIZE,
        }
    }

    /// Sets the number of messages taken on each side of a trigger.
    #[must_use]
    pub fn with_context_size(mut self, size: usize) -> Self {
        self.context_size = size;
        self
    }

    /// Rejects a blank target user, which would never match any sender.
    pub fn validate(&self) -> Result<()> {
        if self.target_user.trim().is_empty() {
            return Err(WeekpackError::invalid_config(
                "target user must not be empty",
            ));
        }
        Ok(())
    }
}

/// Everything a run needs, as stored in a settings file.
///
/// ```toml
/// target_user = "mai ly"
/// context_size = 5
///
/// [transcript]
/// skip_system_messages = true
///
/// [transcript.system_filter]
/// marker = "\u200E"
/// phrases = ["Diese Nachricht wurde gelöscht"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Window settings, flattened to the top level
    #[serde(flatten)]
    pub window: WindowConfig,

    /// Transcript settings
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

impl Settings {
    /// Creates settings for `target_user` with defaults everywhere else.
    pub fn new(target_user: impl Into<String>) -> Self {
        Self {
            window: WindowConfig::new(target_user),
            transcript: TranscriptConfig::default(),
        }
    }

    /// Parses settings from TOML text.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.window.validate()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file.
    #[cfg(feature = "config-file")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

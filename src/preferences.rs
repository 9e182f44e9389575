//! User preferences for the interactive chat session.
//!
//! Preferences live in a small YAML file that is read once at startup and
//! rewritten in full after every change. Only the CLI session owns this file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default display format for task listings.
pub const DEFAULT_DISPLAY_FORMAT: &str = "text";

/// Default text-to-speech voice identifier.
pub const DEFAULT_TTS_VOICE: &str = "alloy";

/// Settings for a single user's chat session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPreferences {
    /// Preferred language code (e.g. `es`). `None` means auto-detect.
    #[serde(default)]
    pub preferred_language: Option<String>,

    /// Whether spoken input is enabled.
    #[serde(default)]
    pub voice_input_enabled: bool,

    /// Whether spoken replies are enabled.
    #[serde(default)]
    pub voice_output_enabled: bool,

    /// How task listings are displayed. Not validated.
    #[serde(default = "default_display_format")]
    pub display_format: String,

    /// Voice used for spoken replies.
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
}

fn default_display_format() -> String {
    DEFAULT_DISPLAY_FORMAT.to_string()
}

fn default_tts_voice() -> String {
    DEFAULT_TTS_VOICE.to_string()
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            preferred_language: None,
            voice_input_enabled: false,
            voice_output_enabled: false,
            display_format: default_display_format(),
            tts_voice: default_tts_voice(),
        }
    }
}

impl UserPreferences {
    /// Load preferences from a file, returning defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let prefs: Self = serde_yaml::from_str(&content)?;
        Ok(prefs)
    }

    /// Save preferences to a file, replacing its previous contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Turn voice input and output on or off together.
    pub fn set_voice(&mut self, enabled: bool) {
        self.voice_input_enabled = enabled;
        self.voice_output_enabled = enabled;
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::conversation::TranscriptStore;
use crate::error::TutorError;
use crate::llm::gemini::{GeminiClient, DEFAULT_THINKING_BUDGET, MODEL_PRO};
use crate::storage::FileStore;
use crate::tutor::Tutor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub llm: LlmSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub model: String,
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub thinking_budget: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageSettings {
    /// Where chat transcripts live. Defaults to `~/.numcalc/history/`.
    pub history_dir: Option<PathBuf>,
    /// Where exported transcripts are written. Defaults to the current
    /// directory.
    pub export_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmSettings {
                model: MODEL_PRO.to_string(),
                api_key_env: "GEMINI_API_KEY".to_string(),
                base_url: None,
                thinking_budget: DEFAULT_THINKING_BUDGET,
            },
            storage: StorageSettings::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("numcalc")
            .join("config.toml")
    }

    /// Load settings, falling back to defaults when the file is absent or
    /// unreadable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Write settings to the default config path.
    pub fn save(&self) -> Result<(), TutorError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), TutorError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TutorError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// The API key from the environment variable named in settings.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    /// Build the tutor. A missing API key yields the disabled sentinel
    /// rather than a deferred runtime failure.
    pub fn build_tutor(&self) -> Tutor {
        match self.api_key() {
            Some(key) => {
                let mut client = GeminiClient::new(key)
                    .with_model(self.llm.model.clone())
                    .with_thinking_budget(self.llm.thinking_budget);
                if let Some(ref url) = self.llm.base_url {
                    client = client.with_base_url(url.clone());
                }
                Tutor::new(Box::new(client))
            }
            None => Tutor::disabled(),
        }
    }

    /// Build the on-disk transcript store.
    pub fn build_store(&self) -> Result<TranscriptStore<FileStore>, TutorError> {
        let storage = match self.storage.history_dir {
            Some(ref dir) => FileStore::with_dir(dir.clone())?,
            None => FileStore::new()?,
        };
        Ok(TranscriptStore::new(storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_pro_model() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, MODEL_PRO);
        assert_eq!(settings.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(settings.llm.thinking_budget, DEFAULT_THINKING_BUDGET);
    }

    #[test]
    fn settings_survive_toml_round_trip() {
        let mut settings = Settings::default();
        settings.storage.history_dir = Some(PathBuf::from("/tmp/numcalc-test"));

        let toml_text = toml::to_string_pretty(&settings).unwrap();
        let back: Settings = toml::from_str(&toml_text).unwrap();
        assert_eq!(back.llm.model, settings.llm.model);
        assert_eq!(back.storage.history_dir, settings.storage.history_dir);
    }

    #[test]
    fn save_writes_a_loadable_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numcalc").join("config.toml");

        let mut settings = Settings::default();
        settings.llm.model = "gemini-2.5-flash".to_string();
        settings.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: Settings = toml::from_str(&content).unwrap();
        assert_eq!(back.llm.model, "gemini-2.5-flash");
    }

    #[test]
    fn missing_key_env_builds_disabled_tutor() {
        let mut settings = Settings::default();
        settings.llm.api_key_env = "NUMCALC_TEST_KEY_THAT_IS_NOT_SET".to_string();
        let tutor = settings.build_tutor();
        assert!(!tutor.is_enabled());
    }
}

//! Journal context resolution
//!
//! Finds the config file and the journal a command should act on, so the
//! command bodies only ever see explicit paths.

use std::path::{Path, PathBuf};

use journal_core::{Error as CoreError, JournalConfig, JournalProfile};
use journal_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Overrides the config directory (tests, portable installs)
pub const CONFIG_DIR_ENV: &str = "JOURNAL_KIT_CONFIG_DIR";

const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "journal-kit";

/// Where the config lives and which journal was asked for
#[derive(Debug, Clone)]
pub struct Context {
    config_path: NormalizedPath,
    requested: Option<String>,
}

impl Context {
    pub fn new(config_dir: &Path, requested: Option<String>) -> Self {
        Self {
            config_path: NormalizedPath::new(config_dir).join(CONFIG_FILE),
            requested,
        }
    }

    /// Resolve the config directory from the environment or the platform default.
    pub fn from_env(requested: Option<String>) -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .ok_or_else(|| CliError::user("Could not determine the config directory"))?
                .join(APP_DIR),
        };
        tracing::debug!(config_dir = %config_dir.display(), "Resolved config directory");
        Ok(Self::new(&config_dir, requested))
    }

    pub fn config_path(&self) -> &NormalizedPath {
        &self.config_path
    }

    pub fn load_config(&self) -> Result<JournalConfig> {
        Ok(JournalConfig::load(&self.config_path)?)
    }

    pub fn save_config(&self, config: &JournalConfig) -> Result<()> {
        Ok(config.save(&self.config_path)?)
    }

    /// Name of the journal to act on.
    pub fn journal_name(&self, config: &JournalConfig) -> Result<String> {
        config
            .resolve_name(self.requested.as_deref())
            .map_err(|e| match e {
                CoreError::NoActiveJournal => {
                    CliError::user("Journal not set up. Run 'journal-kit setup' first.")
                }
                other => other.into(),
            })
    }

    /// Load the config and the profile to act on.
    pub fn active(&self) -> Result<(JournalConfig, JournalProfile)> {
        let config = self.load_config()?;
        let name = self.journal_name(&config)?;
        let profile = config.get(&name)?.clone();
        if !profile.location.is_dir() {
            return Err(CliError::user(format!(
                "Journal '{}' location doesn't exist: {}. Run 'journal-kit move' or set it up again.",
                profile.name,
                profile.location.display()
            )));
        }
        Ok((config, profile))
    }

    /// Store an updated profile back into the config.
    pub fn save_profile(&self, mut config: JournalConfig, profile: JournalProfile) -> Result<()> {
        let slot = config.get_mut(&profile.name)?;
        *slot = profile;
        self.save_config(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_templates::{Framework, Ide, Selection};
    use tempfile::TempDir;

    #[test]
    fn missing_config_means_not_set_up() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(dir.path(), None);
        let err = ctx.active().unwrap_err();
        assert!(err.to_string().contains("journal-kit setup"));
    }

    #[test]
    fn requested_journal_overrides_active() {
        let dir = TempDir::new().unwrap();
        let journals = TempDir::new().unwrap();
        let selection = Selection::new(Framework::Default, [Ide::Cursor]);
        let mut config = JournalConfig::default();
        for name in ["home", "work"] {
            let location = journals.path().join(name);
            std::fs::create_dir_all(&location).unwrap();
            config
                .add(JournalProfile::new(name, location, &selection, "0.1.0"))
                .unwrap();
        }
        Context::new(dir.path(), None).save_config(&config).unwrap();

        let (_, active) = Context::new(dir.path(), None).active().unwrap();
        assert_eq!(active.name, "home");
        let (_, chosen) = Context::new(dir.path(), Some("work".into())).active().unwrap();
        assert_eq!(chosen.name, "work");
    }
}

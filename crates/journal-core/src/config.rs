//! Multi-journal configuration
//!
//! One `config.json` lists every journal the user has set up and which one
//! is active. Where that file lives is the caller's business; nothing here
//! reads the environment.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use journal_fs::{ConfigStore, JournalPath, NormalizedPath};
use journal_templates::{Framework, Ide, Selection};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Settings for one journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalProfile {
    pub name: String,
    pub location: PathBuf,
    #[serde(default)]
    pub ides: BTreeSet<Ide>,
    #[serde(default = "default_framework")]
    pub framework: Framework,
    /// Tool version that last synced this journal
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

fn default_framework() -> Framework {
    Framework::Default
}

impl JournalProfile {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<PathBuf>,
        selection: &Selection,
        version: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            location: location.into(),
            ides: selection.ides.clone(),
            framework: selection.framework,
            version: version.into(),
            created_at: now,
            last_updated: now,
        }
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.framework, self.ides.iter().copied())
    }

    pub fn root(&self) -> NormalizedPath {
        NormalizedPath::new(&self.location)
    }

    pub fn manifest_path(&self) -> NormalizedPath {
        self.root().join(JournalPath::Manifest.as_str())
    }

    /// Record a successful sync by `version`.
    pub fn touch(&mut self, version: impl Into<String>) {
        self.version = version.into();
        self.last_updated = Utc::now();
    }
}

/// All configured journals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default)]
    pub active_journal: Option<String>,
    #[serde(default)]
    pub journals: BTreeMap<String, JournalProfile>,
}

impl JournalConfig {
    /// Load the config, treating a missing or unreadable file as empty.
    ///
    /// A corrupt file is logged and reported as not set up; it is not
    /// overwritten until the next save.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        match ConfigStore::new().load::<Self>(path) {
            Ok(config) => Ok(config),
            Err(e) if e.is_not_found() => Ok(Self::default()),
            Err(journal_fs::Error::ConfigParse { message, .. }) => {
                tracing::warn!(path = %path, error = %message, "Ignoring corrupt journal config");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.journals.is_empty()
    }

    /// Add a profile. The first profile added becomes active.
    pub fn add(&mut self, profile: JournalProfile) -> Result<()> {
        if self.journals.contains_key(&profile.name) {
            return Err(Error::ProfileExists { name: profile.name });
        }
        if self.active_journal.is_none() {
            self.active_journal = Some(profile.name.clone());
        }
        self.journals.insert(profile.name.clone(), profile);
        Ok(())
    }

    /// Remove a profile. If it was active, the first remaining one becomes active.
    pub fn remove(&mut self, name: &str) -> Result<JournalProfile> {
        let profile = self
            .journals
            .remove(name)
            .ok_or_else(|| Error::ProfileNotFound {
                name: name.to_string(),
            })?;
        if self.active_journal.as_deref() == Some(name) {
            self.active_journal = self.journals.keys().next().cloned();
        }
        Ok(profile)
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        if !self.journals.contains_key(name) {
            return Err(Error::ProfileNotFound {
                name: name.to_string(),
            });
        }
        self.active_journal = Some(name.to_string());
        Ok(())
    }

    /// Name of the journal to operate on: `requested` if given, otherwise
    /// the active one.
    pub fn resolve_name(&self, requested: Option<&str>) -> Result<String> {
        match requested {
            Some(name) if self.journals.contains_key(name) => Ok(name.to_string()),
            Some(name) => Err(Error::ProfileNotFound {
                name: name.to_string(),
            }),
            None => self
                .active_journal
                .clone()
                .filter(|name| self.journals.contains_key(name))
                .ok_or(Error::NoActiveJournal),
        }
    }

    pub fn get(&self, name: &str) -> Result<&JournalProfile> {
        self.journals.get(name).ok_or_else(|| Error::ProfileNotFound {
            name: name.to_string(),
        })
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut JournalProfile> {
        self.journals
            .get_mut(name)
            .ok_or_else(|| Error::ProfileNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> JournalProfile {
        let selection = Selection::new(Framework::Gtd, [Ide::Cursor]);
        JournalProfile::new(name, format!("/journals/{name}"), &selection, "0.1.0")
    }

    #[test]
    fn first_profile_becomes_active() {
        let mut config = JournalConfig::default();
        config.add(profile("work")).unwrap();
        config.add(profile("home")).unwrap();
        assert_eq!(config.active_journal.as_deref(), Some("work"));
        assert!(matches!(
            config.add(profile("home")),
            Err(Error::ProfileExists { .. })
        ));
    }

    #[test]
    fn removing_active_switches_to_remaining() {
        let mut config = JournalConfig::default();
        config.add(profile("work")).unwrap();
        config.add(profile("home")).unwrap();
        config.remove("work").unwrap();
        assert_eq!(config.active_journal.as_deref(), Some("home"));
        config.remove("home").unwrap();
        assert_eq!(config.active_journal, None);
    }

    #[test]
    fn explicit_name_wins_over_active() {
        let mut config = JournalConfig::default();
        config.add(profile("work")).unwrap();
        config.add(profile("home")).unwrap();
        assert_eq!(config.resolve_name(None).unwrap(), "work");
        assert_eq!(config.resolve_name(Some("home")).unwrap(), "home");
        assert!(matches!(
            config.resolve_name(Some("travel")),
            Err(Error::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn empty_config_has_no_active_journal() {
        assert!(matches!(
            JournalConfig::default().resolve_name(None),
            Err(Error::NoActiveJournal)
        ));
    }

    #[test]
    fn profile_round_trips_selection() {
        let p = profile("work");
        assert_eq!(p.selection(), Selection::new(Framework::Gtd, [Ide::Cursor]));
        assert!(p.manifest_path().as_str().ends_with("/work/.system-manifest.json"));
    }
}

//! Framework and IDE identifiers.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A journaling methodology preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    Default,
    Gtd,
    Para,
    BulletJournal,
    Zettelkasten,
}

impl Framework {
    pub const ALL: [Framework; 5] = [
        Framework::Default,
        Framework::Gtd,
        Framework::Para,
        Framework::BulletJournal,
        Framework::Zettelkasten,
    ];

    /// Identifier used on the command line and in persisted documents.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Gtd => "gtd",
            Self::Para => "para",
            Self::BulletJournal => "bullet-journal",
            Self::Zettelkasten => "zettelkasten",
        }
    }

    /// Human-readable label substituted for `{framework}`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default (flexible)",
            Self::Gtd => "GTD (Getting Things Done)",
            Self::Para => "PARA (Projects, Areas, Resources, Archive)",
            Self::BulletJournal => "Bullet Journal",
            Self::Zettelkasten => "Zettelkasten",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.id() == wanted)
            .ok_or_else(|| Error::InvalidSelection {
                kind: "framework",
                value: s.to_string(),
                allowed: Self::ALL.map(|f| f.id()).join(", "),
            })
    }
}

/// An AI editor whose configuration snippets the journal carries.
///
/// Declaration order is the canonical catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ide {
    Cursor,
    Windsurf,
    ClaudeCode,
    Copilot,
}

impl Ide {
    pub const ALL: [Ide; 4] = [Ide::Cursor, Ide::Windsurf, Ide::ClaudeCode, Ide::Copilot];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Windsurf => "windsurf",
            Self::ClaudeCode => "claude-code",
            Self::Copilot => "copilot",
        }
    }

    /// Human-readable label substituted for `{ide}`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cursor => "Cursor",
            Self::Windsurf => "Windsurf",
            Self::ClaudeCode => "Claude Code",
            Self::Copilot => "GitHub Copilot",
        }
    }

    /// Parse one IDE selector. `all` expands to every IDE.
    pub fn parse_selector(s: &str) -> Result<Vec<Ide>> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(Self::ALL.to_vec());
        }
        wanted.parse::<Ide>().map(|ide| vec![ide])
    }
}

impl fmt::Display for Ide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Ide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|i| i.id() == wanted)
            .ok_or_else(|| Error::InvalidSelection {
                kind: "IDE",
                value: s.to_string(),
                allowed: format!("{}, all", Self::ALL.map(|i| i.id()).join(", ")),
            })
    }
}

/// A framework plus the set of IDEs to configure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub framework: Framework,
    pub ides: BTreeSet<Ide>,
}

impl Selection {
    pub fn new(framework: Framework, ides: impl IntoIterator<Item = Ide>) -> Self {
        Self {
            framework,
            ides: ides.into_iter().collect(),
        }
    }

    /// Build a selection from raw string identifiers.
    ///
    /// Fails on the first unknown value, naming it.
    pub fn parse<S: AsRef<str>>(framework: &str, ides: &[S]) -> Result<Self> {
        let framework = framework.parse()?;
        let mut set = BTreeSet::new();
        for raw in ides {
            set.extend(Ide::parse_selector(raw.as_ref())?);
        }
        Ok(Self {
            framework,
            ides: set,
        })
    }

    /// Comma-separated IDE ids, for display.
    pub fn ide_list(&self) -> String {
        if self.ides.is_empty() {
            return "none".to_string();
        }
        self.ides
            .iter()
            .map(Ide::id)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

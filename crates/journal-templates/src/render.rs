//! Placeholder substitution for template bodies.

use std::sync::LazyLock;

use regex::Regex;

use crate::selection::{Framework, Ide};
use crate::{Error, Result};

/// Any `{lower_snake}` token left behind after substitution.
static LEFTOVER_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[a-z][a-z_]*\}").unwrap());

/// Values available to a template body.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub framework: Framework,
    pub ide: Option<Ide>,
}

impl RenderContext {
    pub fn new(framework: Framework, ide: Option<Ide>) -> Self {
        Self { framework, ide }
    }

    fn value(&self, token: &str) -> Option<&'static str> {
        match token {
            "framework" => Some(self.framework.label()),
            "framework_id" => Some(self.framework.id()),
            "ide" => self.ide.map(|ide| ide.label()),
            _ => None,
        }
    }
}

/// Substitute every known placeholder in `body`.
///
/// Fails with [`Error::UnresolvedPlaceholder`] if any `{token}` survives,
/// including `{ide}` in a template rendered without an IDE.
pub fn render(path: &str, body: &str, ctx: &RenderContext) -> Result<String> {
    let rendered = LEFTOVER_PLACEHOLDER.replace_all(body, |caps: &regex::Captures<'_>| {
        let token = &caps[0];
        match ctx.value(&token[1..token.len() - 1]) {
            Some(value) => value.to_string(),
            None => token.to_string(),
        }
    });

    if let Some(leftover) = LEFTOVER_PLACEHOLDER.find(&rendered) {
        return Err(Error::UnresolvedPlaceholder {
            path: path.to_string(),
            token: leftover.as_str().to_string(),
        });
    }

    Ok(rendered.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_framework_label_and_id() {
        let ctx = RenderContext::new(Framework::Gtd, None);
        let out = render("x.md", "# {framework} ({framework_id})", &ctx).unwrap();
        assert_eq!(out, "# GTD (Getting Things Done) (gtd)");
    }

    #[test]
    fn substitutes_ide_label() {
        let ctx = RenderContext::new(Framework::Default, Some(Ide::ClaudeCode));
        let out = render("CLAUDE.md", "Using {ide}", &ctx).unwrap();
        assert_eq!(out, "Using Claude Code");
    }

    #[test]
    fn unknown_token_is_reported() {
        let ctx = RenderContext::new(Framework::Para, None);
        let err = render("x.md", "Hello {user_name}", &ctx).unwrap_err();
        assert!(matches!(
            err,
            Error::UnresolvedPlaceholder { ref token, .. } if token == "{user_name}"
        ));
    }

    #[test]
    fn ide_token_without_ide_is_reported() {
        let ctx = RenderContext::new(Framework::Para, None);
        assert!(render("x.md", "{ide}", &ctx).is_err());
    }

    #[test]
    fn non_placeholder_braces_are_untouched() {
        let ctx = RenderContext::new(Framework::Default, None);
        let body = "json: {\"a\": 1} and {Capitalized} and {}";
        assert_eq!(render("x.md", body, &ctx).unwrap(), body);
    }
}

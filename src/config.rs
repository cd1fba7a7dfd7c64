//! Conversion options, loaded from `shadecast.toml`.
//!
//! ```toml
//! [conversion]
//! implicit_casts = "warn"        # "allow" | "warn" | "deny"
//! abstract_passthrough = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, Severity};
use crate::span::Span;

pub const CONFIG_FILE: &str = "shadecast.toml";

/// How implicit precision-changing casts are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImplicitCastPolicy {
    /// No diagnostic.
    Allow,
    /// Warning diagnostic.
    #[default]
    Warn,
    /// Error diagnostic; the converted snippets are still returned.
    Deny,
}

impl ImplicitCastPolicy {
    pub fn severity(self) -> Option<Severity> {
        match self {
            ImplicitCastPolicy::Allow => None,
            ImplicitCastPolicy::Warn => Some(Severity::Warning),
            ImplicitCastPolicy::Deny => Some(Severity::Error),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionOptions {
    pub implicit_casts: ImplicitCastPolicy,
    /// When false, operand lists made only of literals are bound to their
    /// default concrete type instead of staying abstract.
    pub abstract_passthrough: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            implicit_casts: ImplicitCastPolicy::Warn,
            abstract_passthrough: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    conversion: ConversionOptions,
}

impl ConversionOptions {
    /// Parse the contents of a config file. `path` is only used in messages.
    pub fn parse_toml(content: &str, path: &Path) -> Result<Self, Diagnostic> {
        toml::from_str::<ConfigFile>(content)
            .map(|file| file.conversion)
            .map_err(|e| {
                Diagnostic::error(
                    format!("invalid config '{}': {}", path.display(), e.message()),
                    Span::dummy(),
                )
            })
    }

    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, Diagnostic> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Diagnostic::error(
                format!("cannot read config '{}': {}", path.display(), e),
                Span::dummy(),
            )
        })?;
        Self::parse_toml(&content, path)
    }

    /// Search for `shadecast.toml` starting from `dir` and walking up.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Options from the nearest config file, or the defaults if there is none.
    pub fn discover(dir: &Path) -> Result<Self, Diagnostic> {
        match Self::find(dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading conversion options");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConversionOptions::default();
        assert_eq!(options.implicit_casts, ImplicitCastPolicy::Warn);
        assert!(options.abstract_passthrough);
        assert_eq!(
            ConversionOptions::parse_toml("", Path::new("empty.toml")).unwrap(),
            options
        );
    }

    #[test]
    fn test_parse_section() {
        let options = ConversionOptions::parse_toml(
            "[conversion]\nimplicit_casts = \"deny\"\nabstract_passthrough = false\n",
            Path::new("shadecast.toml"),
        )
        .unwrap();
        assert_eq!(options.implicit_casts, ImplicitCastPolicy::Deny);
        assert!(!options.abstract_passthrough);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let options = ConversionOptions::parse_toml(
            "[conversion]\nimplicit_casts = \"allow\"\n",
            Path::new("shadecast.toml"),
        )
        .unwrap();
        assert_eq!(options.implicit_casts, ImplicitCastPolicy::Allow);
        assert!(options.abstract_passthrough);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = ConversionOptions::parse_toml(
            "[conversion]\nimplicit_casts = \"sometimes\"\n",
            Path::new("shadecast.toml"),
        )
        .unwrap_err();
        assert!(err.message.starts_with("invalid config 'shadecast.toml'"));
        assert!(ConversionOptions::parse_toml(
            "[conversion]\nimplict_casts = \"warn\"\n",
            Path::new("shadecast.toml"),
        )
        .is_err());
    }

    #[test]
    fn test_policy_severity() {
        assert_eq!(ImplicitCastPolicy::Allow.severity(), None);
        assert_eq!(ImplicitCastPolicy::Warn.severity(), Some(Severity::Warning));
        assert_eq!(ImplicitCastPolicy::Deny.severity(), Some(Severity::Error));
    }

    #[test]
    fn test_find_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[conversion]\nimplicit_casts = \"allow\"\n",
        )
        .unwrap();

        assert_eq!(
            ConversionOptions::find(&nested),
            Some(dir.path().join(CONFIG_FILE))
        );
        let options = ConversionOptions::discover(&nested).unwrap();
        assert_eq!(options.implicit_casts, ImplicitCastPolicy::Allow);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConversionOptions::load(Path::new("/nonexistent/shadecast.toml")).unwrap_err();
        assert!(err.message.starts_with("cannot read config"));
    }
}

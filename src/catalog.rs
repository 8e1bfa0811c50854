//! Command catalog mapping chat commands to avatar styles
//!
//! Loaded once at startup and never mutated. Menu rendering preserves
//! insertion order so the help view matches the configured ordering.

/// One user-facing command and the avatar style it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCommand {
    pub command: String,
    pub style: String,
    pub label: String,
}

impl StyleCommand {
    /// The label defaults to the style identifier.
    pub fn new(command: impl Into<String>, style: impl Into<String>) -> Self {
        let style = style.into();
        Self {
            command: command.into(),
            label: style.clone(),
            style,
        }
    }
}

/// Ordered, immutable catalog of style commands.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    entries: Vec<StyleCommand>,
}

impl CommandCatalog {
    pub fn new(entries: Vec<StyleCommand>) -> Self {
        Self { entries }
    }

    /// Look up the style for an exact command token.
    pub fn style_for(&self, command: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.command == command)
            .map(|entry| entry.style.as_str())
    }

    /// Render all entries as (selectable token, display label) pairs,
    /// in insertion order.
    pub fn menu_pairs(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.command.clone(), format!("{} - {}", entry.command, entry.label)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

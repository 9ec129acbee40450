// vespa-logfmt - core/toggle.rs
//
// Named on/off flag sets adjusted through a small token grammar:
//
//   token_list := token ("," token)*
//   token      := ["+" | "-"] key
//   key        := "all" | <known key>
//
// A `+` turns the key on, a `-` turns it off. A bare key reuses the value of
// the most recent prefix in the list (on when no prefix has been seen yet).
// The very first list applied to a set replaces the defaults when its first
// token is bare, and amends them when it starts with a prefix.
//
// Core layer: pure logic, no I/O.

use crate::util::constants::{DEFAULT_LEVELS, DEFAULT_SHOW_FIELDS};
use crate::util::error::ToggleError;
use std::collections::BTreeMap;
use std::fmt;

/// Key that applies a value to every known key at once.
pub const ALL_KEY: &str = "all";

/// A named set of boolean flags with a fixed set of known keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleState {
    group: &'static str,
    flags: BTreeMap<String, bool>,
    changed: bool,
}

impl ToggleState {
    /// Creates a set whose known keys and default values come from `defaults`.
    pub fn new(group: &'static str, defaults: &[(&str, bool)]) -> Self {
        Self {
            group,
            flags: defaults
                .iter()
                .map(|(key, on)| ((*key).to_string(), *on))
                .collect(),
            changed: false,
        }
    }

    /// Severity levels: fatal, error, warning and info shown by default.
    pub fn levels() -> Self {
        Self::new("level", DEFAULT_LEVELS)
    }

    /// Rendered columns and time modes.
    pub fn show_fields() -> Self {
        Self::new("show", DEFAULT_SHOW_FIELDS)
    }

    /// Builder form of [`ToggleState::set`].
    pub fn with(mut self, token_list: &str) -> Result<Self, ToggleError> {
        self.set(token_list)?;
        Ok(self)
    }

    /// Applies a comma-separated token list.
    ///
    /// Fails at the first unknown key. Keys earlier in the same list have
    /// already been applied at that point and stay applied.
    pub fn set(&mut self, token_list: &str) -> Result<(), ToggleError> {
        let first_is_bare = !token_list.starts_with(['+', '-']);
        if !self.changed && first_is_bare {
            tracing::debug!(group = self.group, "Replacing default flags");
            self.flags.values_mut().for_each(|on| *on = false);
        }
        self.changed = true;

        let mut value = true;
        for token in token_list.split(',') {
            // `-` is stripped before `+`, so `-+key` ends up on.
            let mut key = token;
            if let Some(rest) = key.strip_prefix('-') {
                value = false;
                key = rest;
            }
            if let Some(rest) = key.strip_prefix('+') {
                value = true;
                key = rest;
            }

            if key == ALL_KEY {
                self.flags.values_mut().for_each(|on| *on = value);
            } else if let Some(on) = self.flags.get_mut(key) {
                *on = value;
            } else {
                return Err(ToggleError::InvalidFlag {
                    group: self.group,
                    flag: key.to_string(),
                });
            }
            tracing::trace!(group = self.group, key, value, "Flag applied");
        }
        Ok(())
    }

    /// Returns the stored value, or `None` for an unknown key.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }

    /// True when `key` is known and on.
    pub fn is_on(&self, key: &str) -> bool {
        self.get(key).unwrap_or(false)
    }

    /// Adds or overwrites a key outside the token grammar.
    ///
    /// Used by the level gate to remember levels first seen in the input.
    pub fn insert(&mut self, key: &str, on: bool) {
        self.flags.insert(key.to_string(), on);
    }

    /// True once any token list has been applied.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// All keys with their current values, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(key, on)| (key.as_str(), *on))
    }
}

impl fmt::Display for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} flags:", self.group)?;
        for (key, on) in self.iter() {
            write!(f, " {}{key}", if on { '+' } else { '-' })?;
        }
        Ok(())
    }
}

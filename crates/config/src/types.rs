//! Core preference types
//!
//! `Setting<T>` separates "nothing stored" from "explicitly chosen", which is
//! the whole difference between a computed default and a user selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrefsError;

/// A preference with explicit inherit semantics.
///
/// - `Inherit`: nothing stored, the caller's default applies
/// - `Value(T)`: explicitly set to this value
///
/// # Serialization
/// - `Inherit` is represented as `null`
/// - `Value(T)` is represented by the value itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Setting<T> {
    /// Use the default
    #[default]
    Inherit,
    /// Explicitly set to this value
    Value(T),
}

impl<T> Setting<T> {
    /// Returns true if this setting is explicitly set
    pub fn is_set(&self) -> bool {
        matches!(self, Setting::Value(_))
    }

    /// Returns true if this setting falls back to the default
    pub fn is_inherit(&self) -> bool {
        matches!(self, Setting::Inherit)
    }

    /// Returns the value if set, or None if inheriting
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Setting::Value(v) => Some(v),
            Setting::Inherit => None,
        }
    }

    /// Resolves this setting against a fallback value
    pub fn resolve(self, fallback: T) -> T {
        match self {
            Setting::Value(v) => v,
            Setting::Inherit => fallback,
        }
    }
}

impl<T> From<Option<T>> for Setting<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Setting::Value(v),
            None => Setting::Inherit,
        }
    }
}

impl<T: Serialize> Serialize for Setting<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Setting::Inherit => serializer.serialize_none(),
            Setting::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Setting<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // null -> Inherit, value -> Value(T)
        Option::<T>::deserialize(deserializer).map(Setting::from)
    }
}

// ============================================================================
// Editor variants
// ============================================================================

/// The rich-text editing back-ends a user can pick between.
///
/// Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorVariant {
    /// The original HTML editor
    Legacy,
    /// The native rich-text editor (default for new installs)
    Aztec,
}

impl EditorVariant {
    pub const ALL: [EditorVariant; 2] = [EditorVariant::Legacy, EditorVariant::Aztec];

    /// Stable lowercase name, used both on disk and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorVariant::Legacy => "legacy",
            EditorVariant::Aztec => "aztec",
        }
    }
}

impl fmt::Display for EditorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorVariant {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorVariant::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PrefsError::UnknownVariant(s.to_string()))
    }
}

// ============================================================================
// Stored values
// ============================================================================

/// A primitive value held by a `KeyValueStore`.
///
/// Serialized as a bare JSON scalar so preference files stay hand-editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl PrefValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<bool> for PrefValue {
    fn from(b: bool) -> Self {
        PrefValue::Bool(b)
    }
}

impl From<i64> for PrefValue {
    fn from(i: i64) -> Self {
        PrefValue::Int(i)
    }
}

impl From<&str> for PrefValue {
    fn from(s: &str) -> Self {
        PrefValue::String(s.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(s: String) -> Self {
        PrefValue::String(s)
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(b) => write!(f, "{b}"),
            PrefValue::Int(i) => write!(f, "{i}"),
            PrefValue::String(s) => f.write_str(s),
        }
    }
}

//! Plugin records and the plugin mapping.
//!
//! A conformance vector carries its plugins as a JSON object keyed by plugin
//! id. Two different orders matter for that mapping:
//!
//! - **Input order** (document order) drives evaluation. Totals are order
//!   independent, but early exit on the first failing plugin is not, and the
//!   cycle engine consumes one plugin per cycle in this order.
//! - **Id order** (ascending, byte-lexicographic) drives canonical
//!   serialization and therefore the seal.
//!
//! [`PluginSet`] keeps the input order and exposes a separate sorted view so
//! the two are never confused.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::fixed::{Q16, Triple};

// ---------------------------------------------------------------------------
// Domain and status
// ---------------------------------------------------------------------------

/// The physical domain a plugin corrects for.
///
/// Any domain name other than the three named ones deserializes as
/// [`Domain::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Optical refraction correction.
    Refraction,
    /// Frame-dragging correction.
    FrameDrag,
    /// Timing jitter correction.
    Jitter,
    /// Any other, vendor-defined domain.
    #[serde(other)]
    Custom,
}

impl Domain {
    /// The one-byte canonical domain code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Refraction => 0x01,
            Self::FrameDrag => 0x02,
            Self::Jitter => 0x03,
            Self::Custom => 0xFF,
        }
    }
}

/// Outcome reported by a plugin for its own contribution.
///
/// Only `"OK"` is a success. Every other status string (`"FAIL"`,
/// `"TIMEOUT"`, `"OUT_OF_RANGE"`, ...) deserializes as [`PluginStatus::Fail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginStatus {
    /// The plugin resolved its contribution.
    #[serde(rename = "OK")]
    Ok,
    /// The plugin could not resolve its contribution.
    #[serde(rename = "FAIL", other)]
    Fail,
}

impl PluginStatus {
    /// Whether this status is [`PluginStatus::Ok`].
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// One warp/error contributor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plugin {
    /// Plugin identifier (at most 255 UTF-8 bytes once encoded).
    pub id: String,
    /// Correction domain.
    pub domain: Domain,
    /// Warp contribution added to every phase face.
    pub warp_vector: Triple,
    /// Error contribution added to the error total.
    pub error: Q16,
    /// Self-reported status.
    pub status: PluginStatus,
    /// Plugin version string (at most 255 UTF-8 bytes once encoded).
    pub version: String,
}

// ---------------------------------------------------------------------------
// PluginSet
// ---------------------------------------------------------------------------

/// Errors building a [`PluginSet`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginSetError {
    /// The same key appeared twice in the plugin mapping.
    #[error("duplicate plugin key: {key}")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
}

/// The plugin mapping, keyed by plugin id, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginSet {
    /// `(key, plugin)` pairs in document order.
    entries: Vec<(String, Plugin)>,
    /// Key to position in `entries`.
    index: HashMap<String, usize>,
}

impl PluginSet {
    /// Create an empty plugin set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set keyed by each plugin's own `id`, in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`PluginSetError::DuplicateKey`] if two plugins share an id.
    pub fn from_plugins(plugins: impl IntoIterator<Item = Plugin>) -> Result<Self, PluginSetError> {
        let mut set = Self::new();
        for plugin in plugins {
            set.insert(plugin.id.clone(), plugin)?;
        }
        Ok(set)
    }

    /// Append a plugin under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PluginSetError::DuplicateKey`] if `key` is already present.
    pub fn insert(&mut self, key: String, plugin: Plugin) -> Result<(), PluginSetError> {
        match self.index.entry(key) {
            Entry::Occupied(entry) => Err(PluginSetError::DuplicateKey {
                key: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                self.entries.push((entry.key().clone(), plugin));
                entry.insert(self.entries.len().saturating_sub(1));
                Ok(())
            }
        }
    }

    /// Look up a plugin by key.
    pub fn get(&self, key: &str) -> Option<&Plugin> {
        self.index
            .get(key)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, plugin)| plugin)
    }

    /// Number of plugins.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plugins in input (document) order. This is the evaluation order.
    pub fn in_input_order(&self) -> impl ExactSizeIterator<Item = &Plugin> {
        self.entries.iter().map(|(_, plugin)| plugin)
    }

    /// `(key, plugin)` pairs sorted by ascending key bytes. This is the
    /// canonical serialization order and is independent of input order.
    pub fn sorted_by_id(&self) -> Vec<(&str, &Plugin)> {
        let mut sorted: Vec<(&str, &Plugin)> = self
            .entries
            .iter()
            .map(|(key, plugin)| (key.as_str(), plugin))
            .collect();
        sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}

impl Serialize for PluginSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, plugin) in &self.entries {
            map.serialize_entry(key, plugin)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PluginSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PluginSetVisitor)
    }
}

/// Visits a JSON object entry by entry so document order survives.
struct PluginSetVisitor;

impl<'de> Visitor<'de> for PluginSetVisitor {
    type Value = PluginSet;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a map of plugin id to plugin record")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = PluginSet::new();
        while let Some((key, plugin)) = access.next_entry::<String, Plugin>()? {
            set.insert(key, plugin).map_err(de::Error::custom)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn plugin_json(id: &str, status: &str) -> String {
        format!(
            r#"{{"id":"{id}","domain":"Jitter","warp_vector":[1,2,3],"error":0,"status":"{status}","version":"1.0"}}"#
        )
    }

    #[test]
    fn domain_codes() {
        assert_eq!(Domain::Refraction.code(), 0x01);
        assert_eq!(Domain::FrameDrag.code(), 0x02);
        assert_eq!(Domain::Jitter.code(), 0x03);
        assert_eq!(Domain::Custom.code(), 0xFF);
    }

    #[test]
    fn unknown_domain_is_custom() {
        let d: Domain = serde_json::from_str(r#""Saturation""#).unwrap();
        assert_eq!(d, Domain::Custom);
        let d: Domain = serde_json::from_str(r#""FrameDrag""#).unwrap();
        assert_eq!(d, Domain::FrameDrag);
    }

    #[test]
    fn non_ok_status_is_fail() {
        let s: PluginStatus = serde_json::from_str(r#""OK""#).unwrap();
        assert!(s.is_ok());
        let s: PluginStatus = serde_json::from_str(r#""FAIL""#).unwrap();
        assert_eq!(s, PluginStatus::Fail);
        let s: PluginStatus = serde_json::from_str(r#""TIMEOUT""#).unwrap();
        assert_eq!(s, PluginStatus::Fail);
        assert_eq!(serde_json::to_string(&PluginStatus::Fail).unwrap(), r#""FAIL""#);
    }

    #[test]
    fn map_keeps_document_order() {
        let json = format!(
            r#"{{"zeta":{},"alpha":{},"mid":{}}}"#,
            plugin_json("zeta", "OK"),
            plugin_json("alpha", "OK"),
            plugin_json("mid", "OK"),
        );
        let set: PluginSet = serde_json::from_str(&json).unwrap();
        let input: Vec<&str> = set.in_input_order().map(|p| p.id.as_str()).collect();
        assert_eq!(input, ["zeta", "alpha", "mid"]);
        let sorted: Vec<&str> = set.sorted_by_id().into_iter().map(|(k, _)| k).collect();
        assert_eq!(sorted, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn duplicate_keys_rejected() {
        let json = format!(
            r#"{{"a":{},"a":{}}}"#,
            plugin_json("a", "OK"),
            plugin_json("a", "OK"),
        );
        assert!(serde_json::from_str::<PluginSet>(&json).is_err());
    }

    #[test]
    fn lookup_after_many_inserts() {
        let mut set = PluginSet::new();
        for n in 0..500 {
            let plugin: Plugin = serde_json::from_str(&plugin_json(&format!("p{n}"), "OK")).unwrap();
            set.insert(format!("p{n}"), plugin).unwrap();
        }
        assert_eq!(set.len(), 500);
        assert_eq!(set.get("p0").unwrap().id, "p0");
        assert_eq!(set.get("p499").unwrap().id, "p499");
        assert!(set.get("p500").is_none());

        let dup: Plugin = serde_json::from_str(&plugin_json("p7", "OK")).unwrap();
        let err = set.insert("p7".to_owned(), dup).unwrap_err();
        assert_eq!(err, PluginSetError::DuplicateKey { key: "p7".to_owned() });
        assert_eq!(set.len(), 500);
        let first: Vec<&str> = set.in_input_order().take(2).map(|p| p.id.as_str()).collect();
        assert_eq!(first, ["p0", "p1"]);
    }

    #[test]
    fn serializes_in_input_order() {
        let json = format!(
            r#"{{"b":{},"a":{}}}"#,
            plugin_json("b", "OK"),
            plugin_json("a", "FAIL"),
        );
        let set: PluginSet = serde_json::from_str(&json).unwrap();
        let out = serde_json::to_string(&set).unwrap();
        assert!(out.find("\"b\"").unwrap() < out.find("\"a\"").unwrap());
        let back: PluginSet = serde_json::from_str(&out).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn from_plugins_uses_plugin_ids() {
        let p: Plugin = serde_json::from_str(&plugin_json("P-ALPHA", "OK")).unwrap();
        let set = PluginSet::from_plugins([p.clone()]).unwrap();
        assert_eq!(set.get("P-ALPHA"), Some(&p));
        assert!(PluginSet::from_plugins([p.clone(), p]).is_err());
    }
}

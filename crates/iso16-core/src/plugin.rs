//! Plugin evaluator: folds plugin contributions into warp and error totals.
//!
//! Plugins are visited in input order. Each plugin's warp vector and error
//! are added into the running totals, and then its status is checked. The
//! first non-OK plugin stops the fold: its own contribution is included, no
//! later plugin is, and `plugin_status_ok` is reported `false`. Those
//! partial sums flow into the seal, so the early exit is part of the
//! conformance contract.

use iso16_types::{Plugin, PluginSet, Q16, Triple};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fixed;

/// Aggregate plugin contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginTotals {
    /// Componentwise sum of evaluated warp vectors.
    pub warp_total: Triple,
    /// Sum of evaluated errors.
    pub error_total: Q16,
    /// `false` if any evaluated plugin reported a non-OK status.
    pub plugin_status_ok: bool,
    /// Number of plugins folded in, including a failing one.
    pub evaluated: usize,
}

impl PluginTotals {
    /// Totals before any plugin has been folded in.
    pub const EMPTY: Self = Self {
        warp_total: Triple::ZERO,
        error_total: Q16::ZERO,
        plugin_status_ok: true,
        evaluated: 0,
    };

    /// Fold one plugin's contribution into these totals.
    ///
    /// The contribution is always added; the status only decides whether
    /// the caller should continue.
    #[must_use]
    pub const fn absorb(self, plugin: &Plugin) -> Self {
        Self {
            warp_total: fixed::add_triple(self.warp_total, plugin.warp_vector),
            error_total: fixed::add(self.error_total, plugin.error),
            plugin_status_ok: self.plugin_status_ok && plugin.status.is_ok(),
            evaluated: self.evaluated.saturating_add(1),
        }
    }
}

impl Default for PluginTotals {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Fold plugins in input order, stopping after the first failing plugin.
pub fn evaluate_plugins(plugins: &PluginSet) -> PluginTotals {
    let mut totals = PluginTotals::EMPTY;

    for plugin in plugins.in_input_order() {
        totals = totals.absorb(plugin);
        if !plugin.status.is_ok() {
            debug!(
                plugin_id = plugin.id.as_str(),
                evaluated = totals.evaluated,
                total = plugins.len(),
                "plugin reported non-OK status, stopping evaluation"
            );
            break;
        }
    }

    totals
}

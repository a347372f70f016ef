//! Metrics collection.
//!
//! # Metrics
//! - `rewrite_map_lookups_total` (counter): answered lookups by `outcome`
//! - `rewrite_map_rejected_total` (counter): lines answered `NULL` before lookup, by `reason`
//! - `rewrite_map_reloads_total` (counter): published snapshots by `mode`
//! - `rewrite_map_reload_failures_total` (counter): stat/read failures that kept old rules

use metrics::counter;

use crate::protocol::Response;
use crate::rules::MatchMode;

pub fn record_lookup(response: Response) {
    let outcome = if response.is_found() { "found" } else { "null" };
    counter!("rewrite_map_lookups_total", "outcome" => outcome).increment(1);
}

pub fn record_rejected(reason: &'static str) {
    counter!("rewrite_map_rejected_total", "reason" => reason).increment(1);
}

pub fn record_reload(mode: MatchMode) {
    counter!("rewrite_map_reloads_total", "mode" => mode.as_str()).increment(1);
}

pub fn record_reload_failure() {
    counter!("rewrite_map_reload_failures_total").increment(1);
}

// file: src/dialect/stat.rs
// version: 1.0.0
// guid: a9d36f14-c2e7-4b05-8f93-6b1e0c7d45a2

//! Cluster capacity parsing for `lich stat --human-unreadable` output

use super::{Dialect, StatFormat};
use crate::error::{LichbdError, Result};
use serde::{Deserialize, Serialize};

const CAPACITY_LABEL: &str = "capacity:";
const USED_LABEL: &str = "used:";
const DEFAULT_POOL_LABEL: &str = "default:";

/// Cluster-wide capacity figures, in whatever unit the tool reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStat {
    pub total: u64,
    pub used: u64,
}

impl ClusterStat {
    pub fn free(&self) -> u64 {
        self.total.saturating_sub(self.used)
    }
}

/// Parse total and used capacity. The last matching line wins.
pub fn parse_cluster_stat(dialect: &Dialect, raw: &str) -> Result<ClusterStat> {
    match dialect.stat_format() {
        StatFormat::Labelled => {
            let mut total = 0;
            let mut used = None;
            for line in raw.lines() {
                if let Some(value) = after_label(line, CAPACITY_LABEL) {
                    total = parse_number(value, CAPACITY_LABEL)?;
                } else if let Some(value) = after_label(line, USED_LABEL) {
                    used = Some(parse_number(value, USED_LABEL)?);
                }
            }
            let used = used.ok_or_else(|| missing_line(USED_LABEL))?;
            Ok(ClusterStat { total, used })
        }
        StatFormat::DefaultPool => {
            let mut stat = None;
            for line in raw.lines() {
                if let Some(value) = after_label(line, DEFAULT_POOL_LABEL) {
                    stat = Some(parse_default_pool(value)?);
                }
            }
            stat.ok_or_else(|| missing_line(DEFAULT_POOL_LABEL))
        }
    }
}

/// Parse only the used figure, taken from the first matching line
pub fn parse_used(dialect: &Dialect, raw: &str) -> Result<u64> {
    match dialect.stat_format() {
        StatFormat::Labelled => raw
            .lines()
            .find_map(|line| after_label(line, USED_LABEL))
            .ok_or_else(|| missing_line(USED_LABEL))
            .and_then(|value| parse_number(value, USED_LABEL)),
        StatFormat::DefaultPool => raw
            .lines()
            .find_map(|line| after_label(line, DEFAULT_POOL_LABEL))
            .ok_or_else(|| missing_line(DEFAULT_POOL_LABEL))
            .and_then(parse_default_pool)
            .map(|stat| stat.used),
    }
}

/// Text after the last occurrence of `label`, if the line carries it
fn after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.rfind(label).map(|idx| &line[idx + label.len()..])
}

/// `<used>/<total>`; a value without `/` counts as both
fn parse_default_pool(value: &str) -> Result<ClusterStat> {
    let mut tokens = value.split('/');
    let first = tokens.next().unwrap_or_default();
    let last = tokens.last().unwrap_or(first);
    Ok(ClusterStat {
        used: parse_number(first, DEFAULT_POOL_LABEL)?,
        total: parse_number(last, DEFAULT_POOL_LABEL)?,
    })
}

fn parse_number(value: &str, label: &str) -> Result<u64> {
    let trimmed = value.trim();
    trimmed.parse::<u64>().map_err(|e| {
        LichbdError::parse(format!(
            "invalid value '{}' after '{}': {}",
            trimmed, label, e
        ))
    })
}

fn missing_line(label: &str) -> LichbdError {
    LichbdError::parse(format!("no '{}' line in cluster stat output", label))
}

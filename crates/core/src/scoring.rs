//! Scoring module - line-clear points, leveling and gravity speed
//!
//! Fixed bonuses (per piece, per drop row, per level up) are read straight
//! from [`ScoringConfig`]. The helpers here cover the level-dependent parts:
//!
//! - line clear: `lines[n] + lines_per_level[n] * (level - 1)`
//! - required level: `floor(total_lines / lines_per_level) - first_level + 2`
//! - gravity interval: `10 / (speed + speed_per_level * (level - 1))` seconds

use std::time::Duration;

use crate::types::ScoringConfig;

/// Points for clearing `lines` rows in one cascade at `level`.
///
/// A line count with no table entry scores nothing.
pub fn line_clear_score(scoring: &ScoringConfig, lines: u32, level: u32) -> u64 {
    if lines == 0 {
        return 0;
    }
    let base = scoring.lines.get(&lines).copied().unwrap_or(0);
    let per_level = scoring.lines_per_level.get(&lines).copied().unwrap_or(0);
    base.saturating_add(per_level.saturating_mul(level.saturating_sub(1) as u64))
}

/// The level a player with `total_lines` should be at.
///
/// Can be below `first_level` (or negative) early on; callers only ever raise
/// the level towards it.
pub fn required_level(total_lines: u32, lines_per_level: u32, first_level: u32) -> i64 {
    let per = lines_per_level.max(1);
    (total_lines / per) as i64 - first_level as i64 + 2
}

/// Time between gravity ticks at `level`.
pub fn gravity_interval(speed: u32, speed_per_level: u32, level: u32) -> Duration {
    let rate = speed as f64 + speed_per_level as f64 * level.saturating_sub(1) as f64;
    if rate <= 0.0 {
        return Duration::from_secs(10);
    }
    Duration::from_secs_f64(10.0 / rate)
}

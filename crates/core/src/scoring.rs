//! Scoring module - points per lock and level progression
//!
//! Every lock is worth a flat [`PLACEMENT_SCORE`] even when no line clears, plus
//! [`LINE_CLEAR_SCORE`] for each cleared line. Levels are reached by score
//! thresholds that grow with the level; gravity speeds up with the level down to
//! a floor.

use crate::types::{
    FALL_INTERVAL_BASE, FALL_INTERVAL_FLOOR, FALL_INTERVAL_LEVEL_STEP, LINE_CLEAR_SCORE,
    PLACEMENT_SCORE, THRESHOLD_BASE_STEP, THRESHOLD_LEVEL_STEP,
};

/// Points awarded for one lock that cleared `lines` rows
pub fn calculate_lock_score(lines: u32) -> u32 {
    PLACEMENT_SCORE + LINE_CLEAR_SCORE * lines
}

/// Frames per row-drop at `level`: `max(5, 35 - level*4)`
pub fn fall_interval(level: u32) -> u32 {
    FALL_INTERVAL_BASE
        .saturating_sub(level.saturating_mul(FALL_INTERVAL_LEVEL_STEP))
        .max(FALL_INTERVAL_FLOOR)
}

/// Threshold after advancing to `new_level`: `current + 1000 + new_level*500`
pub fn next_level_threshold(current: u32, new_level: u32) -> u32 {
    current
        .saturating_add(THRESHOLD_BASE_STEP)
        .saturating_add(new_level.saturating_mul(THRESHOLD_LEVEL_STEP))
}

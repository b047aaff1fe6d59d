//! Scoring module - line-clear points, levels and the turn timer curve
//!
//! Scoring rules:
//! - A placement that clears lines scores `lines * blocks * multiplier * 10`,
//!   where `lines` counts full rows and columns and `blocks` counts the
//!   distinct cells they cover. Intersections count once in `blocks` but feed
//!   both lines.
//! - The multiplier grows by one after every clearing placement and resets to
//!   1 after a placement that clears nothing (or a timeout).
//! - Level is `score / 1000`.

use crate::types::{
    BASE_MULTIPLIER, BASE_TURN_DELAY_MS, LINE_SCORE_UNIT, MIN_TURN_DELAY_MS, POINTS_PER_LEVEL,
    TURN_DELAY_STEP_MS,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points to add to the score
    pub points: u32,
    /// Multiplier to use for the next placement
    pub next_multiplier: u32,
}

/// Points for a clear of `lines` lines covering `blocks` distinct cells
pub fn calculate_line_score(lines: u32, blocks: u32, multiplier: u32) -> u32 {
    lines
        .saturating_mul(blocks)
        .saturating_mul(multiplier)
        .saturating_mul(LINE_SCORE_UNIT)
}

/// Multiplier after a placement
pub fn next_multiplier(multiplier: u32, cleared_lines: bool) -> u32 {
    if cleared_lines {
        multiplier.saturating_add(1)
    } else {
        BASE_MULTIPLIER
    }
}

/// Score a placement
pub fn calculate_score(lines: u32, blocks: u32, multiplier: u32) -> ScoreResult {
    ScoreResult {
        points: calculate_line_score(lines, blocks, multiplier),
        next_multiplier: next_multiplier(multiplier, lines > 0),
    }
}

/// Level reached at `score`
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL
}

/// Turn timer length in milliseconds for `level`
///
/// `max(2500, 12000 - 500 * level)`; non-increasing, floored at level 19.
pub fn compute_delay(level: u32) -> u32 {
    BASE_TURN_DELAY_MS
        .saturating_sub(TURN_DELAY_STEP_MS.saturating_mul(level))
        .max(MIN_TURN_DELAY_MS)
}

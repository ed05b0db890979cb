//! Scoring module - line points, level and gravity curves

use crate::types::{
    BASE_DROP_MS, DROP_STEP_MS, FALLBACK_POINTS_PER_LINE, LINES_PER_LEVEL, LINE_SCORES,
    MIN_DROP_MS,
};

/// Points for clearing `lines` rows in one sweep.
///
/// 1-4 rows use the table; anything else scores 200 per row.
pub fn line_clear_score(lines: u32) -> u32 {
    match lines {
        1..=4 => LINE_SCORES[lines as usize],
        n => n.saturating_mul(FALLBACK_POINTS_PER_LINE),
    }
}

/// Level for a running total of cleared lines (starts at 1).
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval in milliseconds for a level, clamped at the floor.
pub fn drop_interval_ms(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(step).max(MIN_DROP_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 800);
        assert_eq!(line_clear_score(5), 1000);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 700);
        assert_eq!(drop_interval_ms(2), 630);
        assert_eq!(drop_interval_ms(9), 140);
        assert_eq!(drop_interval_ms(10), 100);
        assert_eq!(drop_interval_ms(11), 100);
        assert_eq!(drop_interval_ms(500), 100);
    }
}

use serde::{Deserialize, Serialize};

/// Base points per simultaneous line clear, multiplied by the level.
const CLASSIC_SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// How a lock's cleared lines turn into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// `{0, 40, 100, 300, 1200}[lines] × level`, level taken before the lock.
    #[default]
    Classic,
    /// `100 × 2^(lines - 1)`, no level multiplier.
    Doubling,
}

impl ScoringPolicy {
    /// Points awarded for clearing `cleared_lines` at `level`.
    #[must_use]
    pub const fn points(self, cleared_lines: usize, level: usize) -> usize {
        let cleared_lines = if cleared_lines > 4 { 4 } else { cleared_lines };
        match self {
            ScoringPolicy::Classic => CLASSIC_SCORE_TABLE[cleared_lines] * level,
            ScoringPolicy::Doubling => {
                if cleared_lines == 0 {
                    0
                } else {
                    100 << (cleared_lines - 1)
                }
            }
        }
    }
}

/// Score, line and piece counters for one session.
///
/// ```
/// use quadfall_engine::{GameStats, ScoringPolicy};
///
/// let mut stats = GameStats::new();
/// stats.record_lock(4, ScoringPolicy::Classic);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// `1 + total_cleared_lines / 10`.
    #[must_use]
    pub const fn level(&self) -> usize {
        1 + self.total_cleared_lines / 10
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Locks by number of lines cleared; index 0 counts locks that cleared nothing.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records one locked piece and returns the points it earned.
    pub const fn record_lock(&mut self, cleared_lines: usize, policy: ScoringPolicy) -> usize {
        let points = policy.points(cleared_lines, self.level());
        self.score += points;
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_table() {
        let points: Vec<_> = (0..=4).map(|n| ScoringPolicy::Classic.points(n, 1)).collect();
        assert_eq!(points, [0, 40, 100, 300, 1200]);
        assert_eq!(ScoringPolicy::Classic.points(2, 3), 300);
    }

    #[test]
    fn test_doubling_table() {
        let points: Vec<_> = (0..=4).map(|n| ScoringPolicy::Doubling.points(n, 7)).collect();
        assert_eq!(points, [0, 100, 200, 400, 800]);
    }

    #[test]
    fn test_level_uses_value_before_lock() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.record_lock(1, ScoringPolicy::Classic);
        }
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.score(), 9 * 40);

        // 9 -> 11 lines: scored at level 1, level becomes 2 afterwards.
        assert_eq!(stats.record_lock(2, ScoringPolicy::Classic), 100);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.record_lock(1, ScoringPolicy::Classic), 80);
    }

    #[test]
    fn test_counters() {
        let mut stats = GameStats::new();
        stats.record_lock(0, ScoringPolicy::Doubling);
        stats.record_lock(3, ScoringPolicy::Doubling);
        stats.record_lock(0, ScoringPolicy::Doubling);
        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.total_cleared_lines(), 3);
        assert_eq!(stats.line_cleared_counter(), &[2, 0, 0, 1, 0]);
        assert_eq!(stats.score(), 400);
    }
}

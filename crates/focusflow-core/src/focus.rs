//! Focus score derived from interruptions.
//!
//! Every pause intent counts as a distraction and costs a fixed penalty. The
//! score never recovers during the life of the process.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const INITIAL_SCORE: u8 = 100;
pub const DISTRACTION_PENALTY: u8 = 5;

/// Accumulated focus score and distraction count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusMetrics {
    score: u8,
    distractions: u32,
}

impl FocusMetrics {
    pub fn new() -> Self {
        Self {
            score: INITIAL_SCORE,
            distractions: 0,
        }
    }

    /// 0 ..= 100.
    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn distractions(&self) -> u32 {
        self.distractions
    }

    pub fn level(&self) -> FocusLevel {
        FocusLevel::from_score(self.score)
    }

    /// Apply the pause penalty.
    pub fn record_distraction(&mut self) {
        self.distractions = self.distractions.saturating_add(1);
        self.score = self.score.saturating_sub(DISTRACTION_PENALTY);
    }
}

impl Default for FocusMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse banding of the score for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusLevel {
    /// Above 80
    Good,
    /// Above 50
    Fair,
    Poor,
}

impl FocusLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            81.. => FocusLevel::Good,
            51..=80 => FocusLevel::Fair,
            _ => FocusLevel::Poor,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FocusLevel::Good => "Good",
            FocusLevel::Fair => "Fair",
            FocusLevel::Poor => "Poor",
        }
    }
}

impl fmt::Display for FocusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_full_score() {
        let metrics = FocusMetrics::new();
        assert_eq!(metrics.score(), 100);
        assert_eq!(metrics.distractions(), 0);
        assert_eq!(metrics.level(), FocusLevel::Good);
    }

    #[test]
    fn each_distraction_costs_five() {
        let mut metrics = FocusMetrics::new();
        metrics.record_distraction();
        metrics.record_distraction();
        assert_eq!(metrics.score(), 90);
        assert_eq!(metrics.distractions(), 2);
    }

    #[test]
    fn score_floors_at_zero() {
        let mut metrics = FocusMetrics::new();
        for _ in 0..25 {
            metrics.record_distraction();
        }
        assert_eq!(metrics.score(), 0);
        assert_eq!(metrics.distractions(), 25);
        assert_eq!(metrics.level(), FocusLevel::Poor);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(FocusLevel::from_score(81), FocusLevel::Good);
        assert_eq!(FocusLevel::from_score(80), FocusLevel::Fair);
        assert_eq!(FocusLevel::from_score(51), FocusLevel::Fair);
        assert_eq!(FocusLevel::from_score(50), FocusLevel::Poor);
    }
}

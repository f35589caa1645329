//! Adherence statistics and banding.

use crate::history::DayTally;
use serde::Serialize;

/// Percentage of doses taken, or `None` when nothing was recorded
pub fn compute_adherence(taken: usize, missed: usize) -> Option<f64> {
    let total = taken + missed;
    if total == 0 {
        return None;
    }
    Some(taken as f64 / total as f64 * 100.0)
}

/// Presentation band for an adherence percentage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdherenceBand {
    /// Exactly 100%
    Perfect,
    /// [80, 100)
    Good,
    /// [50, 80)
    Fair,
    /// Below 50
    NeedsImprovement,
}

impl AdherenceBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            AdherenceBand::Perfect
        } else if percentage >= 80.0 {
            AdherenceBand::Good
        } else if percentage >= 50.0 {
            AdherenceBand::Fair
        } else {
            AdherenceBand::NeedsImprovement
        }
    }

    /// Encouragement shown alongside the rate
    pub fn message(&self) -> &'static str {
        match self {
            AdherenceBand::Perfect => "Keep it up!",
            AdherenceBand::Good => "You're doing well!",
            AdherenceBand::Fair => "Good effort! Let's try to improve!",
            AdherenceBand::NeedsImprovement => "Room for improvement. Set reminders!",
        }
    }
}

/// Snapshot of one day's adherence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DailyStatistics {
    pub total_medicines: usize,
    pub taken: usize,
    pub missed: usize,
}

impl DailyStatistics {
    pub fn new(total_medicines: usize, tally: DayTally) -> Self {
        Self {
            total_medicines,
            taken: tally.taken,
            missed: tally.missed,
        }
    }

    pub fn adherence(&self) -> Option<f64> {
        compute_adherence(self.taken, self.missed)
    }

    pub fn band(&self) -> Option<AdherenceBand> {
        self.adherence().map(AdherenceBand::from_percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_adherence() {
        assert_eq!(compute_adherence(3, 1), Some(75.0));
        assert_eq!(compute_adherence(1, 0), Some(100.0));
        assert_eq!(compute_adherence(0, 4), Some(0.0));
        assert_eq!(compute_adherence(0, 0), None);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(AdherenceBand::from_percentage(100.0), AdherenceBand::Perfect);
        assert_eq!(AdherenceBand::from_percentage(99.99), AdherenceBand::Good);
        assert_eq!(AdherenceBand::from_percentage(80.0), AdherenceBand::Good);
        assert_eq!(AdherenceBand::from_percentage(79.99), AdherenceBand::Fair);
        assert_eq!(AdherenceBand::from_percentage(50.0), AdherenceBand::Fair);
        assert_eq!(
            AdherenceBand::from_percentage(49.99),
            AdherenceBand::NeedsImprovement
        );
        assert_eq!(
            AdherenceBand::from_percentage(0.0),
            AdherenceBand::NeedsImprovement
        );
    }

    #[test]
    fn test_band_from_counts() {
        // 4 of 5 lands exactly on the Good boundary
        let stats = DailyStatistics::new(3, DayTally { taken: 4, missed: 1 });
        assert_eq!(stats.adherence(), Some(80.0));
        assert_eq!(stats.band(), Some(AdherenceBand::Good));

        let stats = DailyStatistics::new(3, DayTally { taken: 1, missed: 1 });
        assert_eq!(stats.band(), Some(AdherenceBand::Fair));

        let empty = DailyStatistics::new(3, DayTally::default());
        assert_eq!(empty.band(), None);
    }
}

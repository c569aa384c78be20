//! Domain Value Objects
//!
//! Immutable value types for the PoW domain.

/// Difficulty level for PoW, counted in leading `'0'` hex characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const BASELINE: Difficulty = Difficulty(4);
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 64; // Length of a hex-encoded SHA-256 digest

    pub fn new(digits: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&digits) {
            Some(Self(digits))
        } else {
            None
        }
    }

    pub fn digits(&self) -> u8 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

/// Load-to-difficulty table
///
/// Tiers are `(threshold, difficulty)` pairs. A load strictly greater than a
/// tier's threshold selects that tier; the highest matching threshold wins.
/// Loads at or below every threshold get the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultySchedule {
    tiers: Vec<(u64, Difficulty)>,
    baseline: Difficulty,
}

impl DifficultySchedule {
    pub fn new(mut tiers: Vec<(u64, Difficulty)>, baseline: Difficulty) -> Self {
        tiers.sort_by(|a, b| b.0.cmp(&a.0));
        Self { tiers, baseline }
    }

    /// Difficulty for the given accepted-submission load
    pub fn difficulty_for(&self, load: u64) -> Difficulty {
        self.tiers
            .iter()
            .find(|(threshold, _)| load > *threshold)
            .map(|(_, difficulty)| *difficulty)
            .unwrap_or(self.baseline)
    }

    pub fn baseline(&self) -> Difficulty {
        self.baseline
    }
}

impl Default for DifficultySchedule {
    fn default() -> Self {
        Self::new(
            vec![(100, Difficulty(6)), (50, Difficulty(5))],
            Difficulty::BASELINE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_bounds() {
        assert!(Difficulty::new(0).is_none());
        assert!(Difficulty::new(65).is_none());
        assert_eq!(Difficulty::new(64).map(u8::from), Some(64));
        assert_eq!(Difficulty::default().digits(), 4);
    }

    #[test]
    fn test_default_schedule_boundaries() {
        let schedule = DifficultySchedule::default();
        assert_eq!(schedule.difficulty_for(0).digits(), 4);
        assert_eq!(schedule.difficulty_for(50).digits(), 4);
        assert_eq!(schedule.difficulty_for(51).digits(), 5);
        assert_eq!(schedule.difficulty_for(100).digits(), 5);
        assert_eq!(schedule.difficulty_for(101).digits(), 6);
        assert_eq!(schedule.difficulty_for(u64::MAX).digits(), 6);
    }

    #[test]
    fn test_unsorted_tiers_are_ordered() {
        let d = |n| Difficulty::new(n).unwrap();
        let schedule = DifficultySchedule::new(vec![(10, d(2)), (20, d(3))], d(1));
        assert_eq!(schedule.difficulty_for(25), d(3));
        assert_eq!(schedule.difficulty_for(15), d(2));
        assert_eq!(schedule.difficulty_for(5), d(1));
        assert_eq!(schedule.baseline(), d(1));
    }
}

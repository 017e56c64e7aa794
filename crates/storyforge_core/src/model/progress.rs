//! Completed/total counters shared by checklists, beat sheets and interviews.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    /// `round(100 * completed / total)`, `0` when `total == 0`.
    pub percentage: u8,
}

impl Progress {
    pub fn from_counts(completed: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            // Integer round-half-up of 100 * completed / total.
            ((200 * completed + total) / (2 * total)).min(100) as u8
        };
        Self {
            total,
            completed,
            percentage,
        }
    }

    /// Counts items matching `is_done`.
    pub fn count<'a, T: 'a>(
        items: impl IntoIterator<Item = &'a T>,
        is_done: impl Fn(&T) -> bool,
    ) -> Self {
        let (completed, total) = items.into_iter().fold((0, 0), |(done, all), item| {
            (done + usize::from(is_done(item)), all + 1)
        });
        Self::from_counts(completed, total)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::Progress;

    #[test]
    fn empty_is_zero_percent() {
        assert_eq!(
            Progress::from_counts(0, 0),
            Progress {
                total: 0,
                completed: 0,
                percentage: 0
            }
        );
        assert!(!Progress::from_counts(0, 0).is_complete());
    }

    #[test]
    fn rounds_to_nearest_percent() {
        assert_eq!(Progress::from_counts(6, 15).percentage, 40);
        assert_eq!(Progress::from_counts(1, 3).percentage, 33);
        assert_eq!(Progress::from_counts(2, 3).percentage, 67);
        assert_eq!(Progress::from_counts(1, 8).percentage, 13);
        assert_eq!(Progress::from_counts(7, 7).percentage, 100);
    }

    #[test]
    fn count_uses_predicate() {
        let flags = [true, false, true, true];
        let progress = Progress::count(flags.iter(), |flag| *flag);
        assert_eq!(progress.completed, 3);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.percentage, 75);
    }
}

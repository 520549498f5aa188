//! Day range and day iteration.

use crate::DayRangeError;

/// Number of seconds between two consecutive day timestamps.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// An inclusive range of UNIX timestamps (seconds) walked one day at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    /// Start timestamp (inclusive).
    pub start: i64,
    /// End timestamp (inclusive).
    pub end: i64,
}

impl DayRange {
    /// Creates a new day range, validating that `0 <= start <= end`.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is negative or start > end.
    pub const fn new(start: i64, end: i64) -> Result<Self, DayRangeError> {
        if start < 0 {
            return Err(DayRangeError::Negative(start));
        }
        if start > end {
            return Err(DayRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range holding a single day.
    #[must_use]
    pub const fn single_day(start: i64) -> Self {
        Self { start, end: start }
    }

    /// Returns an iterator over the day timestamps in the range.
    ///
    /// The iterator can be requested any number of times; each call starts
    /// again from `start`.
    #[must_use]
    pub const fn days(&self) -> DayIterator {
        DayIterator::new(self.start, Some(self.end))
    }

    /// Returns the number of day timestamps in the range.
    ///
    /// Agrees with [`DayRange::days`], so a range built with `start > end`
    /// through its public fields counts zero days.
    #[must_use]
    pub const fn total_days(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        (self.end.saturating_sub(self.start) / SECONDS_PER_DAY) as usize + 1
    }

    /// Returns the last timestamp the iterator yields, or `None` when it
    /// yields nothing.
    #[must_use]
    pub const fn last_day(&self) -> Option<i64> {
        if self.start > self.end {
            return None;
        }
        let steps = self.end.saturating_sub(self.start) / SECONDS_PER_DAY;
        Some(self.start + steps * SECONDS_PER_DAY)
    }
}

impl std::fmt::Display for DayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Iterator over day timestamps: `start`, `start + 86400`, ... while `<= end`.
#[derive(Debug, Clone)]
pub struct DayIterator {
    current: Option<i64>,
    end: Option<i64>,
}

impl DayIterator {
    const fn new(start: i64, end: Option<i64>) -> Self {
        Self {
            current: Some(start),
            end,
        }
    }

    /// Creates an iterator with no upper bound.
    ///
    /// The sequence only ends when the next step would overflow `i64`.
    #[must_use]
    pub const fn unbounded(start: i64) -> Self {
        Self::new(start, None)
    }
}

impl Iterator for DayIterator {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        if self.end.is_some_and(|end| current > end) {
            self.current = None;
            return None;
        }

        self.current = current.checked_add(SECONDS_PER_DAY);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.current, self.end) {
            (None, _) => (0, Some(0)),
            (Some(current), Some(end)) if current > end => (0, Some(0)),
            (Some(current), Some(end)) => {
                let days = ((end - current) / SECONDS_PER_DAY) as usize + 1;
                (days, Some(days))
            }
            (Some(_), None) => (usize::MAX, None),
        }
    }
}

impl std::iter::FusedIterator for DayIterator {}

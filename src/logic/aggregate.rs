/// Hours summed for the 24-hour precipitation window.
pub const HOURS_PER_DAY: usize = 24;
/// Days summed for the 7-day precipitation window.
pub const DAYS_PER_WEEK: usize = 7;

/// Total over the leading entries of a precipitation sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowTotal {
    pub total_mm: f64,
    /// Entries that fell inside the window, usable or not.
    pub samples: usize,
    pub window: usize,
    /// False when the sequence was shorter than the window, making the total a
    /// partial-window approximation.
    pub complete: bool,
}

/// Sums the first `window` entries of `samples`.
///
/// Short input is summed as-is. Non-finite or negative entries contribute
/// nothing but still occupy their slot in the window.
pub fn aggregate_window(samples: &[f64], window: usize) -> WindowTotal {
    let taken = samples.len().min(window);
    let total_mm: f64 = samples
        .iter()
        .take(window)
        .filter(|p| p.is_finite() && **p >= 0.0)
        .sum();

    WindowTotal {
        total_mm,
        samples: taken,
        window,
        complete: taken == window,
    }
}

/// Precipitation over the 24 most recent hourly samples.
pub fn aggregate_24h(hourly_samples: &[f64]) -> f64 {
    aggregate_window(hourly_samples, HOURS_PER_DAY).total_mm
}

/// Precipitation over the 7 most recent daily totals.
pub fn aggregate_7d(daily_samples: &[f64]) -> f64 {
    aggregate_window(daily_samples, DAYS_PER_WEEK).total_mm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(aggregate_24h(&[]), 0.0);
        assert_eq!(aggregate_7d(&[]), 0.0);
    }

    #[test]
    fn full_day_of_hourly_rain() {
        let hourly = [10.0; 24];
        assert_eq!(aggregate_24h(&hourly), 240.0);
    }

    #[test]
    fn only_first_24_hours_count() {
        let mut hourly = vec![1.0; 24];
        hourly.extend([50.0; 24]);
        assert_eq!(aggregate_24h(&hourly), 24.0);
    }

    #[test]
    fn only_first_7_days_count() {
        let daily = [2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 100.0];
        assert_eq!(aggregate_7d(&daily), 14.0);
    }

    #[test]
    fn short_input_is_partial_window() {
        let total = aggregate_window(&[3.0, 4.0, 5.0], DAYS_PER_WEEK);
        assert_eq!(total.total_mm, 12.0);
        assert_eq!(total.samples, 3);
        assert!(!total.complete);

        assert_eq!(aggregate_7d(&[3.0, 4.0, 5.0]), 12.0);
    }

    #[test]
    fn full_window_is_complete() {
        let total = aggregate_window(&[1.0; 30], HOURS_PER_DAY);
        assert!(total.complete);
        assert_eq!(total.samples, 24);
    }

    #[test]
    fn unusable_entries_are_skipped() {
        let daily = [5.0, f64::NAN, -2.0, f64::INFINITY, 1.5];
        assert_eq!(aggregate_7d(&daily), 6.5);
    }
}

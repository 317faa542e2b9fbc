//! Completion-time estimation.
//!
//! Projects how many contribution periods are left before a goal is reached.

use crate::core::models::Frequency;
use std::fmt;

/// Result of projecting the remaining amount onto the savings plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Estimation {
    /// Nothing left to save
    GoalReached,
    /// The plan contributes nothing per period, so the goal is never reached
    Unreachable,
    /// Whole periods still needed at the planned contribution
    Periods {
        /// Number of periods, rounded up
        count: u64,
        /// Cadence the periods are counted in
        frequency: Frequency,
    },
}

/// Estimates how many periods of `period_amount` cover `remaining`.
#[must_use]
pub fn estimate(remaining: u64, period_amount: u64, frequency: &Frequency) -> Estimation {
    if remaining == 0 {
        return Estimation::GoalReached;
    }
    if period_amount == 0 {
        return Estimation::Unreachable;
    }

    Estimation::Periods {
        count: remaining.div_ceil(period_amount),
        frequency: frequency.clone(),
    }
}

fn unit_label(frequency: &Frequency, count: u64) -> &'static str {
    let singular = count == 1;
    match (frequency, singular) {
        (Frequency::Daily, true) => "Day",
        (Frequency::Daily, false) => "Days",
        (Frequency::Weekly, true) => "Week",
        (Frequency::Weekly, false) => "Weeks",
        (Frequency::Monthly, true) => "Month",
        (Frequency::Monthly, false) => "Months",
        (Frequency::Other(_), true) => "Period",
        (Frequency::Other(_), false) => "Periods",
    }
}

impl fmt::Display for Estimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoalReached => f.write_str("Goal reached!"),
            Self::Unreachable => f.write_str("No savings plan"),
            Self::Periods { count, frequency } => {
                write!(f, "{count} {} remaining", unit_label(frequency, *count))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_rounds_up() {
        let estimation = estimate(250, 100, &Frequency::Weekly);
        assert_eq!(
            estimation,
            Estimation::Periods {
                count: 3,
                frequency: Frequency::Weekly
            }
        );
        assert_eq!(estimation.to_string(), "3 Weeks remaining");
    }

    #[test]
    fn test_estimate_exact_division() {
        assert_eq!(
            estimate(9_500_000, 500_000, &Frequency::Monthly).to_string(),
            "19 Months remaining"
        );
    }

    #[test]
    fn test_estimate_singular_unit() {
        assert_eq!(
            estimate(10, 100, &Frequency::Daily).to_string(),
            "1 Day remaining"
        );
    }

    #[test]
    fn test_estimate_goal_reached() {
        assert_eq!(estimate(0, 100, &Frequency::Daily), Estimation::GoalReached);
        assert_eq!(Estimation::GoalReached.to_string(), "Goal reached!");
    }

    #[test]
    fn test_estimate_zero_plan_is_unreachable() {
        assert_eq!(estimate(100, 0, &Frequency::Weekly), Estimation::Unreachable);
    }

    #[test]
    fn test_estimate_unknown_frequency_uses_periods() {
        let other = Frequency::Other("Fortnightly".to_string());
        assert_eq!(estimate(300, 100, &other).to_string(), "3 Periods remaining");
    }
}

use serde::Serialize;

use crate::constants::{LATE_LABEL, ON_TIME_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    OnTime,
    Late,
}

impl Outcome {
    /// Arg-max over `[p(late), p(on time)]`; ties resolve to class 0.
    pub fn from_probabilities([p0, p1]: [f64; 2]) -> Self {
        if p1 > p0 {
            Outcome::OnTime
        } else {
            Outcome::Late
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::OnTime => ON_TIME_LABEL,
            Outcome::Late => LATE_LABEL,
        }
    }
}

/// Label plus class probabilities for one shipment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub outcome: Outcome,
    /// `[p(late), p(on time)]`, summing to 1.
    pub probabilities: [f64; 2],
}

impl Prediction {
    /// Probability of reaching on time, in percent.
    pub fn reach_percent(&self) -> f64 {
        self.probabilities[1] * 100.0
    }

    pub fn no_reach_percent(&self) -> f64 {
        self.probabilities[0] * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_sum_to_one_hundred() {
        let p = Prediction {
            outcome: Outcome::from_probabilities([0.32, 0.68]),
            probabilities: [0.32, 0.68],
        };
        assert_eq!(p.outcome, Outcome::OnTime);
        assert!((p.reach_percent() + p.no_reach_percent() - 100.0).abs() < 1e-9);
        assert!((p.reach_percent() - 68.0).abs() < 1e-9);
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(Outcome::Late.message(), "Order will not reach on time");
        assert_eq!(Outcome::OnTime.message(), "Order will reach on time");
    }

    #[test]
    fn ties_resolve_to_late() {
        assert_eq!(Outcome::from_probabilities([0.5, 0.5]), Outcome::Late);
        assert_eq!(Outcome::from_probabilities([0.49, 0.51]), Outcome::OnTime);
        assert_eq!(Outcome::from_probabilities([0.51, 0.49]), Outcome::Late);
    }
}

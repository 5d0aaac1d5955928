//! Selection rules: which Ritz values are worth verifying.
//!
//! Propagator eigenvalues have magnitude at most 1, with the slowest-decaying
//! modes near the unit circle, so "interesting" usually means
//! largest-magnitude. The rule is a runtime-swappable tagged variant
//! evaluated by the convergence checker against the full candidate set.

use faer::c64;
use std::fmt;

/// Magnitude threshold for the steady-state criterion.
const STEADY_STATE_THRESHOLD: f64 = 0.95;

/// Which candidate eigenvalues to put through the residual test.
pub enum SelectionRule {
    /// Magnitude above 0.95: the physical steady-state criterion.
    SteadyState,
    /// The `N` largest-magnitude candidates. Ties at the threshold
    /// magnitude are all selected.
    TopN(usize),
    /// Caller-supplied predicate `(candidate, all_candidates) -> bool`.
    Custom(Box<dyn Fn(c64, &[c64]) -> bool + Send + Sync>),
}

impl SelectionRule {
    /// Whether `value` is selected, judged against the full candidate set.
    pub fn selects(&self, value: c64, all: &[c64]) -> bool {
        match self {
            SelectionRule::SteadyState => value.norm() > STEADY_STATE_THRESHOLD,
            SelectionRule::TopN(count) => {
                let nn = (*count).min(all.len());
                if nn == 0 {
                    return false;
                }
                let mut mags: Vec<f64> = all.iter().map(|v| v.norm()).collect();
                mags.sort_by(|a, b| b.total_cmp(a));
                value.norm() >= mags[nn - 1]
            }
            SelectionRule::Custom(pred) => pred(value, all),
        }
    }
}

impl fmt::Debug for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionRule::SteadyState => f.write_str("SteadyState"),
            SelectionRule::TopN(n) => write!(f, "TopN({n})"),
            SelectionRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_state_uses_magnitude_threshold() {
        let rule = SelectionRule::SteadyState;
        let all = [c64::new(0.99, 0.0), c64::new(0.0, 0.96), c64::new(0.5, 0.5)];
        assert!(rule.selects(all[0], &all));
        assert!(rule.selects(all[1], &all)); // magnitude counts, not realness
        assert!(!rule.selects(all[2], &all));
    }

    #[test]
    fn top_n_picks_largest_magnitudes() {
        let rule = SelectionRule::TopN(2);
        let all = [
            c64::new(0.9, 0.0),
            c64::new(0.1, 0.0),
            c64::new(0.0, 0.5),
            c64::new(0.3, 0.0),
        ];
        assert!(rule.selects(all[0], &all));
        assert!(rule.selects(all[2], &all));
        assert!(!rule.selects(all[1], &all));
        assert!(!rule.selects(all[3], &all));
    }

    #[test]
    fn top_n_larger_than_set_selects_everything() {
        let rule = SelectionRule::TopN(10);
        let all = [c64::new(0.9, 0.0), c64::new(0.1, 0.0)];
        assert!(rule.selects(all[0], &all));
        assert!(rule.selects(all[1], &all));
    }

    #[test]
    fn top_zero_selects_nothing() {
        let rule = SelectionRule::TopN(0);
        let all = [c64::new(0.9, 0.0)];
        assert!(!rule.selects(all[0], &all));
    }

    #[test]
    fn custom_predicate_is_consulted() {
        let rule = SelectionRule::Custom(Box::new(|v, _all| v.re < 0.0));
        let all = [c64::new(-0.5, 0.0), c64::new(0.5, 0.0)];
        assert!(rule.selects(all[0], &all));
        assert!(!rule.selects(all[1], &all));
    }
}

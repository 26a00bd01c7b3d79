//! Cumulative cash-flow projection with tariff escalation.

use super::types::{CashFlow, CashFlowPoint};

/// Number of projected years after the investment year.
pub const PROJECTION_YEARS: u32 = 20;

/// Default yearly utility tariff escalation.
pub const DEFAULT_TARIFF_ESCALATION: f64 = 0.05;

/// Projects the cumulative cash position over [`PROJECTION_YEARS`].
///
/// Year 0 holds `-investment`. Each following year adds the first-year
/// saving grown by `escalation` per year:
/// `cf[y] = cf[y-1] + yearly_saving * (1 + escalation)^(y-1)`.
pub fn project(investment: f64, yearly_saving: f64, escalation: f64) -> CashFlow {
    let mut points = Vec::with_capacity(PROJECTION_YEARS as usize + 1);
    let mut cumulative = -investment;
    points.push(CashFlowPoint {
        year: 0,
        saving: 0.0,
        cumulative,
    });

    let mut saving = yearly_saving;
    for year in 1..=PROJECTION_YEARS {
        cumulative += saving;
        points.push(CashFlowPoint {
            year,
            saving,
            cumulative,
        });
        saving *= 1.0 + escalation;
    }

    let break_even_year = points
        .iter()
        .find(|p| p.cumulative >= 0.0)
        .map(|p| p.year);

    CashFlow {
        points,
        break_even_year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_twenty_one_points() {
        let cf = project(10_000_000.0, 1_000_000.0, 0.05);
        assert_eq!(cf.points.len(), 21);
        assert_eq!(cf.points[0].cumulative, -10_000_000.0);
        assert_eq!(cf.points[20].year, 20);
    }

    #[test]
    fn final_point_matches_closed_form() {
        let investment = 25_000_000.0;
        let saving = 1_800_000.0;
        let cf = project(investment, saving, 0.05);
        let expected: f64 = -investment
            + (1..=20)
                .map(|y| saving * 1.05_f64.powi(y - 1))
                .sum::<f64>();
        assert!((cf.points[20].cumulative - expected).abs() < 1e-3);
    }

    #[test]
    fn strictly_increasing_with_positive_saving() {
        let cf = project(5_000_000.0, 100.0, 0.05);
        for pair in cf.points.windows(2) {
            assert!(pair[1].cumulative > pair[0].cumulative);
        }
    }

    #[test]
    fn break_even_year_is_first_non_negative() {
        // no escalation: -1000 + 300 * y >= 0 first at y = 4
        let cf = project(1000.0, 300.0, 0.0);
        assert_eq!(cf.break_even_year, Some(4));
    }

    #[test]
    fn no_break_even_within_horizon() {
        let cf = project(1_000_000_000.0, 1000.0, 0.05);
        assert_eq!(cf.break_even_year, None);
    }
}

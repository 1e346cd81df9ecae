//! Route and airline health scoring.
//!
//! A health score penalizes both how often flights leave late and how late
//! they leave:
//!
//! ```text
//! health_score = 100 - (delay_percent + avg_positive_delay * 0.5)
//! ```
//!
//! Route scores are then min-max normalized across every route in the view.
//! Airline scores are reported raw.

use crate::analyzers::grade::{GradeScale, grade};
use crate::analyzers::types::{AirlineHealthScore, OverallHealth, RouteHealthScore};
use crate::analyzers::utility::{count_where, group_by, mean, mean_of, min_max_normalize, rate};
use crate::records::FlightRecord;

/// Weight applied to the mean positive delay.
pub const SEVERITY_WEIGHT: f64 = 0.5;

/// Normalized score given to every route when all raw scores are equal.
pub const NORMALIZED_FALLBACK: f64 = 50.0;

/// Arrival delay (minutes) above which a late flight counts as severely delayed.
pub const SEVERE_DELAY_MINUTES: f64 = 60.0;

const ON_TIME_MINUTES: f64 = 15.0;

pub fn health_score(delay_percent: f64, avg_positive_delay: f64) -> f64 {
    100.0 - (delay_percent + avg_positive_delay * SEVERITY_WEIGHT)
}

struct DelayProfile {
    total: usize,
    delayed: usize,
    delay_percent: f64,
    avg_positive_delay: f64,
    score: f64,
}

fn profile(group: &[&FlightRecord]) -> DelayProfile {
    let total = group.len();
    let delayed = count_where(group, FlightRecord::delayed);
    let delay_percent = rate(delayed, total);
    let avg_positive_delay = mean_of(group, |r| r.positive_delay);

    DelayProfile {
        total,
        delayed,
        delay_percent,
        avg_positive_delay,
        score: health_score(delay_percent, avg_positive_delay),
    }
}

/// Health score for every route, best first.
///
/// `normalized_health_score` spans exactly 0–100 unless every route scores
/// the same, in which case all are [`NORMALIZED_FALLBACK`]. Grades use the
/// normalized score. Ties keep first-encounter order.
pub fn route_health_scores(records: &[FlightRecord]) -> Vec<RouteHealthScore> {
    let mut routes: Vec<RouteHealthScore> = group_by(records, |r| r.route.clone())
        .into_iter()
        .map(|(route, group)| {
            let p = profile(&group);
            let first = group[0];
            RouteHealthScore {
                route,
                origin: first.origin_airport.clone(),
                destination: first.destination_airport.clone(),
                delay_percent: p.delay_percent,
                avg_positive_delay: p.avg_positive_delay,
                health_score: p.score,
                normalized_health_score: NORMALIZED_FALLBACK,
                total_flights: p.total,
                delayed_flights: p.delayed,
                grade: String::new(),
            }
        })
        .collect();

    let raw: Vec<f64> = routes.iter().map(|r| r.health_score).collect();
    for (route, normalized) in routes.iter_mut().zip(min_max_normalize(&raw, NORMALIZED_FALLBACK)) {
        route.normalized_health_score = normalized;
        route.grade = grade(normalized, GradeScale::Route);
    }

    routes.sort_by(|a, b| b.normalized_health_score.total_cmp(&a.normalized_health_score));
    routes
}

/// Health score for every airline, best first. Scores are not normalized.
pub fn airline_health_scores(records: &[FlightRecord]) -> Vec<AirlineHealthScore> {
    let mut airlines: Vec<AirlineHealthScore> = group_by(records, |r| r.airline.clone())
        .into_iter()
        .map(|(airline, group)| {
            let p = profile(&group);
            let on_time = count_where(&group, |r| r.arrival_delay <= ON_TIME_MINUTES);
            let severe = count_where(&group, |r| r.arrival_delay > SEVERE_DELAY_MINUTES);
            let late = p.total - on_time - severe;

            AirlineHealthScore {
                airline,
                delay_percent: p.delay_percent,
                avg_positive_delay: p.avg_positive_delay,
                health_score: p.score,
                on_time_rate: rate(on_time, p.total),
                delay_rate: rate(late, p.total),
                severe_delay_rate: rate(severe, p.total),
                avg_arrival_delay: mean_of(&group, |r| r.arrival_delay),
                total_flights: p.total,
                grade: grade(p.score, GradeScale::Airline),
            }
        })
        .collect();

    airlines.sort_by(|a, b| b.health_score.total_cmp(&a.health_score));
    airlines
}

/// Unweighted mean of the normalized route scores. 0 when there are no routes.
pub fn overall_health(routes: &[RouteHealthScore]) -> OverallHealth {
    let scores: Vec<f64> = routes.iter().map(|r| r.normalized_health_score).collect();
    let score = mean(&scores);

    OverallHealth {
        score,
        grade: grade(score, GradeScale::Route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::tests::primary;

    fn flight(id: usize, airline: &str, route: (&str, &str), dep: f64, arr: f64) -> FlightRecord {
        FlightRecord::new(id, primary(airline, route.0, route.1, dep, arr))
    }

    #[test]
    fn test_health_score_formula() {
        assert_eq!(health_score(50.0, 10.0), 45.0);
        assert_eq!(health_score(0.0, 0.0), 100.0);
        assert_eq!(health_score(100.0, 100.0), -50.0);
    }

    #[test]
    fn test_single_route_scenario() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), 20.0, 25.0),
            flight(1, "Delta", ("NYC", "LAX"), -5.0, -10.0),
        ];
        let routes = route_health_scores(&records);

        assert_eq!(routes.len(), 1);
        let r = &routes[0];
        assert_eq!(r.route, "NYC-LAX");
        assert_eq!(r.origin, "NYC");
        assert_eq!(r.destination, "LAX");
        assert_eq!(r.total_flights, 2);
        assert_eq!(r.delayed_flights, 1);
        assert_eq!(r.delay_percent, 50.0);
        assert_eq!(r.avg_positive_delay, 10.0);
        assert_eq!(r.health_score, 45.0);
        assert_eq!(r.normalized_health_score, 50.0);
        assert_eq!(r.grade, "C");
    }

    #[test]
    fn test_normalization_spans_full_range() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), 0.0, 0.0),
            flight(1, "Delta", ("CHI", "MIA"), 60.0, 0.0),
            flight(2, "Delta", ("SF", "NYC"), 20.0, 0.0),
        ];
        let routes = route_health_scores(&records);
        let normalized: Vec<f64> = routes.iter().map(|r| r.normalized_health_score).collect();

        assert_eq!(routes[0].route, "NYC-LAX");
        assert_eq!(routes[0].normalized_health_score, 100.0);
        assert_eq!(routes[0].grade, "A+");
        assert_eq!(routes[2].route, "CHI-MIA");
        assert_eq!(routes[2].normalized_health_score, 0.0);
        assert_eq!(routes[2].grade, "F");
        assert!(normalized.iter().all(|n| (0.0..=100.0).contains(n)));
    }

    #[test]
    fn test_equal_scores_normalize_to_fallback() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), 5.0, 0.0),
            flight(1, "Delta", ("CHI", "MIA"), 5.0, 0.0),
        ];
        let routes = route_health_scores(&records);

        assert!(routes.iter().all(|r| r.normalized_health_score == 50.0));
        assert_eq!(routes[0].route, "NYC-LAX");
    }

    #[test]
    fn test_airline_health_is_not_normalized() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), 20.0, 10.0),
            flight(1, "Delta", ("NYC", "LAX"), -5.0, 30.0),
            flight(2, "Delta", ("NYC", "LAX"), 0.0, 90.0),
            flight(3, "Delta", ("NYC", "LAX"), 0.0, 0.0),
            flight(4, "Spirit", ("CHI", "MIA"), 100.0, 200.0),
        ];
        let airlines = airline_health_scores(&records);

        assert_eq!(airlines[0].airline, "Delta");
        let delta = &airlines[0];
        assert_eq!(delta.delay_percent, 25.0);
        assert_eq!(delta.avg_positive_delay, 5.0);
        assert_eq!(delta.health_score, 72.5);
        assert_eq!(delta.on_time_rate, 50.0);
        assert_eq!(delta.delay_rate, 25.0);
        assert_eq!(delta.severe_delay_rate, 25.0);
        assert_eq!(delta.avg_arrival_delay, 32.5);
        assert_eq!(delta.grade, "B");

        let spirit = &airlines[1];
        assert_eq!(spirit.health_score, -50.0);
        assert_eq!(spirit.grade, "F");
    }

    #[test]
    fn test_overall_health() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), 0.0, 0.0),
            flight(1, "Delta", ("CHI", "MIA"), 60.0, 0.0),
        ];
        let overall = overall_health(&route_health_scores(&records));

        assert_eq!(overall.score, 50.0);
        assert_eq!(overall.grade, "C");
    }

    #[test]
    fn test_empty_input() {
        assert!(route_health_scores(&[]).is_empty());
        assert!(airline_health_scores(&[]).is_empty());

        let overall = overall_health(&[]);
        assert_eq!(overall.score, 0.0);
        assert_eq!(overall.grade, "F");
    }
}

use std::collections::HashSet;

use chrono::Month;

use crate::analyzers::types::{
    AirlineDelay, DatasetSummary, HeatmapCell, MonthlyTrend, RouteDelay, RouteRankingSummary,
    WeekdayDelay,
};
use crate::analyzers::utility::{count_where, group_by, mean, mean_of, rate};
use crate::records::{FlightRecord, WEEKDAYS, weekday_position};

/// Arrival delay (minutes) at or below which a flight is on time.
pub const ON_TIME_THRESHOLD_MINUTES: f64 = 15.0;

/// Routes shown in the "most delayed" ranking.
pub const TOP_ROUTES: usize = 15;

pub const HOURS_PER_DAY: usize = 24;

/// Totals, arrival-delay headline figures and distinct airline/route counts.
///
/// An empty view reports zeros throughout.
pub fn dataset_summary(records: &[FlightRecord]) -> DatasetSummary {
    let delays: Vec<f64> = records.iter().map(|r| r.arrival_delay).collect();
    let on_time = delays.iter().filter(|&&d| d <= ON_TIME_THRESHOLD_MINUTES).count();

    DatasetSummary {
        total_flights: records.len(),
        avg_arrival_delay: mean(&delays),
        max_arrival_delay: delays.iter().copied().reduce(f64::max).unwrap_or(0.0),
        on_time_rate: rate(on_time, records.len()),
        airlines: records.iter().map(|r| r.airline.as_str()).collect::<HashSet<_>>().len(),
        routes: records.iter().map(|r| r.route.as_str()).collect::<HashSet<_>>().len(),
    }
}

/// Mean departure and arrival delay per airline, in first-encounter order.
pub fn delay_by_airline(records: &[FlightRecord]) -> Vec<AirlineDelay> {
    group_by(records, |r| r.airline.clone())
        .into_iter()
        .map(|(airline, group)| AirlineDelay {
            airline,
            avg_departure_delay: mean_of(&group, |r| r.departure_delay),
            avg_arrival_delay: mean_of(&group, |r| r.arrival_delay),
            flights: group.len(),
        })
        .collect()
}

/// Mean arrival delay per weekday, Monday through Sunday. Days without
/// flights are left out.
pub fn delay_by_weekday(records: &[FlightRecord]) -> Vec<WeekdayDelay> {
    let mut delays: [Vec<f64>; 7] = Default::default();

    for r in records {
        if let Some(i) = weekday_position(&r.day_of_week_name) {
            delays[i].push(r.arrival_delay);
        }
    }

    WEEKDAYS
        .iter()
        .zip(delays.iter())
        .filter(|(_, d)| !d.is_empty())
        .map(|(day, d)| WeekdayDelay {
            day: day.to_string(),
            avg_delay: mean(d),
            flights: d.len(),
        })
        .collect()
}

/// Arrival-delay trend per month, ordered by month number.
pub fn monthly_trend(records: &[FlightRecord]) -> Vec<MonthlyTrend> {
    let mut trend: Vec<MonthlyTrend> = group_by(records, |r| r.month)
        .into_iter()
        .map(|(month, group)| MonthlyTrend {
            month,
            month_name: month_name(month),
            avg_delay: mean_of(&group, |r| r.arrival_delay),
            flights: group.len(),
            on_time_rate: rate(
                count_where(&group, |r| r.arrival_delay <= ON_TIME_THRESHOLD_MINUTES),
                group.len(),
            ),
        })
        .collect();

    trend.sort_by_key(|t| t.month);
    trend
}

/// English month name for 1..=12, `"Month {n}"` otherwise.
pub fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| format!("Month {month}"))
}

/// Per-route arrival-delay statistics, in first-encounter order.
pub fn route_delays(records: &[FlightRecord]) -> Vec<RouteDelay> {
    group_by(records, |r| r.route.clone())
        .into_iter()
        .map(|(route, group)| {
            let delayed = count_where(&group, |r| r.arrival_delay > ON_TIME_THRESHOLD_MINUTES);
            RouteDelay {
                route,
                avg_delay: mean_of(&group, |r| r.arrival_delay),
                flights: group.len(),
                delayed_flights: delayed,
                delay_rate: rate(delayed, group.len()),
            }
        })
        .collect()
}

/// The `limit` routes with the highest mean arrival delay, worst first.
///
/// Ties keep first-encounter order.
pub fn top_delayed_routes(records: &[FlightRecord], limit: usize) -> Vec<RouteDelay> {
    let mut routes = route_delays(records);
    routes.sort_by(|a, b| b.avg_delay.total_cmp(&a.avg_delay));
    routes.truncate(limit);
    routes
}

/// Summarizes a ranking produced by [`top_delayed_routes`].
pub fn route_ranking_summary(ranking: &[RouteDelay]) -> RouteRankingSummary {
    let rates: Vec<f64> = ranking.iter().map(|r| r.delay_rate).collect();

    RouteRankingSummary {
        routes_ranked: ranking.len(),
        highest_avg_delay: ranking.first().map_or(0.0, |r| r.avg_delay),
        lowest_avg_delay: ranking.last().map_or(0.0, |r| r.avg_delay),
        avg_delay_rate: mean(&rates),
    }
}

/// Mean arrival delay for every weekday × hour cell.
///
/// Always returns 7 rows (Monday first) of 24 cells; cells without flights
/// hold zeros. Flights whose hour falls outside 0–23 are not counted.
pub fn delay_heatmap(records: &[FlightRecord]) -> Vec<Vec<HeatmapCell>> {
    let mut sums = [[(0.0_f64, 0_usize); HOURS_PER_DAY]; 7];

    for r in records {
        let Some(day) = weekday_position(&r.day_of_week_name) else {
            continue;
        };
        let hour = r.hour as usize;
        if hour >= HOURS_PER_DAY {
            continue;
        }
        let cell = &mut sums[day][hour];
        cell.0 += r.arrival_delay;
        cell.1 += 1;
    }

    WEEKDAYS
        .iter()
        .zip(sums.iter())
        .map(|(day, hours)| {
            hours
                .iter()
                .enumerate()
                .map(|(hour, &(sum, count))| HeatmapCell {
                    day: day.to_string(),
                    hour: hour as u32,
                    avg_delay: if count == 0 { 0.0 } else { sum / count as f64 },
                    flight_count: count,
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::PrimaryFields;
    use crate::records::tests::primary;

    fn flight(id: usize, airline: &str, route: (&str, &str), dep: f64, arr: f64) -> FlightRecord {
        FlightRecord::new(id, primary(airline, route.0, route.1, dep, arr))
    }

    fn on(id: usize, day_of_week: u32, scheduled_departure: i32, month: u32, arr: f64) -> FlightRecord {
        FlightRecord::new(
            id,
            PrimaryFields {
                day_of_week,
                scheduled_departure,
                month,
                ..primary("Delta", "NYC", "LAX", 0.0, arr)
            },
        )
    }

    #[test]
    fn test_delay_by_airline() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), 10.0, 20.0),
            flight(1, "United", ("NYC", "LAX"), 0.0, -10.0),
            flight(2, "Delta", ("NYC", "LAX"), 30.0, 40.0),
        ];
        let out = delay_by_airline(&records);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].airline, "Delta");
        assert_eq!(out[0].avg_departure_delay, 20.0);
        assert_eq!(out[0].avg_arrival_delay, 30.0);
        assert_eq!(out[0].flights, 2);
        assert_eq!(out[1].airline, "United");
        assert_eq!(out[1].avg_arrival_delay, -10.0);
    }

    #[test]
    fn test_delay_by_weekday_is_calendar_ordered() {
        let records = vec![
            on(0, 7, 900, 1, 30.0),
            on(1, 3, 900, 1, 10.0),
            on(2, 1, 900, 1, 5.0),
            on(3, 3, 900, 1, 20.0),
        ];
        let out = delay_by_weekday(&records);
        let days: Vec<&str> = out.iter().map(|d| d.day.as_str()).collect();

        assert_eq!(days, vec!["Monday", "Wednesday", "Sunday"]);
        assert_eq!(out[1].avg_delay, 15.0);
        assert_eq!(out[1].flights, 2);
    }

    #[test]
    fn test_monthly_trend_sorted_with_on_time_rate() {
        let records = vec![
            on(0, 1, 900, 12, 30.0),
            on(1, 1, 900, 2, 10.0),
            on(2, 1, 900, 2, 15.0),
            on(3, 1, 900, 2, 16.0),
            on(4, 1, 900, 2, 19.0),
        ];
        let out = monthly_trend(&records);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].month, 2);
        assert_eq!(out[0].month_name, "February");
        assert_eq!(out[0].flights, 4);
        assert_eq!(out[0].avg_delay, 15.0);
        assert_eq!(out[0].on_time_rate, 50.0);
        assert_eq!(out[1].month_name, "December");
        assert_eq!(out[1].on_time_rate, 0.0);
    }

    #[test]
    fn test_month_name_out_of_range() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(0), "Month 0");
        assert_eq!(month_name(13), "Month 13");
    }

    #[test]
    fn test_top_delayed_routes_sorted_and_truncated() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), 0.0, 10.0),
            flight(1, "Delta", ("CHI", "MIA"), 0.0, 50.0),
            flight(2, "Delta", ("SF", "NYC"), 0.0, 30.0),
            flight(3, "Delta", ("NYC", "LAX"), 0.0, 20.0),
        ];
        let out = top_delayed_routes(&records, 2);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].route, "CHI-MIA");
        assert_eq!(out[0].delayed_flights, 1);
        assert_eq!(out[0].delay_rate, 100.0);
        assert_eq!(out[1].route, "SF-NYC");
    }

    #[test]
    fn test_top_delayed_routes_ties_keep_encounter_order() {
        let records = vec![
            flight(0, "Delta", ("BOS", "SEA"), 0.0, 12.0),
            flight(1, "Delta", ("ATL", "DFW"), 0.0, 12.0),
            flight(2, "Delta", ("DEN", "SF"), 0.0, 12.0),
        ];
        let routes: Vec<String> = top_delayed_routes(&records, TOP_ROUTES)
            .into_iter()
            .map(|r| r.route)
            .collect();

        assert_eq!(routes, vec!["BOS-SEA", "ATL-DFW", "DEN-SF"]);
    }

    #[test]
    fn test_route_ranking_summary() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), 0.0, 10.0),
            flight(1, "Delta", ("CHI", "MIA"), 0.0, 50.0),
        ];
        let summary = route_ranking_summary(&top_delayed_routes(&records, TOP_ROUTES));

        assert_eq!(summary.routes_ranked, 2);
        assert_eq!(summary.highest_avg_delay, 50.0);
        assert_eq!(summary.lowest_avg_delay, 10.0);
        assert_eq!(summary.avg_delay_rate, 50.0);
    }

    #[test]
    fn test_route_ranking_summary_empty() {
        let summary = route_ranking_summary(&[]);
        assert_eq!(summary.routes_ranked, 0);
        assert_eq!(summary.highest_avg_delay, 0.0);
        assert_eq!(summary.avg_delay_rate, 0.0);
    }

    #[test]
    fn test_delay_heatmap_grid() {
        let records = vec![
            on(0, 1, 830, 1, 10.0),
            on(1, 1, 845, 1, 30.0),
            on(2, 7, 2359, 1, -5.0),
            on(3, 2, 2500, 1, 99.0),
        ];
        let grid = delay_heatmap(&records);

        assert_eq!(grid.len(), 7);
        assert!(grid.iter().all(|row| row.len() == HOURS_PER_DAY));
        assert_eq!(grid[0][8].day, "Monday");
        assert_eq!(grid[0][8].avg_delay, 20.0);
        assert_eq!(grid[0][8].flight_count, 2);
        assert_eq!(grid[6][23].avg_delay, -5.0);
        assert_eq!(grid[1].iter().map(|c| c.flight_count).sum::<usize>(), 0);
    }

    #[test]
    fn test_dataset_summary() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), 20.0, 25.0),
            flight(1, "Delta", ("NYC", "LAX"), -5.0, -10.0),
            flight(2, "United", ("CHI", "MIA"), 40.0, 45.0),
            flight(3, "United", ("NYC", "LAX"), 0.0, 0.0),
        ];
        let summary = dataset_summary(&records);

        assert_eq!(summary.total_flights, 4);
        assert_eq!(summary.avg_arrival_delay, 15.0);
        assert_eq!(summary.max_arrival_delay, 45.0);
        assert_eq!(summary.on_time_rate, 50.0);
        assert_eq!(summary.airlines, 2);
        assert_eq!(summary.routes, 2);
    }

    #[test]
    fn test_dataset_summary_all_early_keeps_negative_max() {
        let records = vec![
            flight(0, "Delta", ("NYC", "LAX"), -5.0, -12.0),
            flight(1, "Delta", ("NYC", "LAX"), -5.0, -3.0),
        ];
        assert_eq!(dataset_summary(&records).max_arrival_delay, -3.0);
    }

    #[test]
    fn test_dataset_summary_empty_view_is_zeroed() {
        let summary = dataset_summary(&[]);

        assert_eq!(summary.total_flights, 0);
        assert_eq!(summary.avg_arrival_delay, 0.0);
        assert_eq!(summary.max_arrival_delay, 0.0);
        assert_eq!(summary.on_time_rate, 0.0);
        assert_eq!(summary.airlines, 0);
        assert_eq!(summary.routes, 0);
    }

    #[test]
    fn test_views_handle_empty_input() {
        assert!(delay_by_airline(&[]).is_empty());
        assert!(delay_by_weekday(&[]).is_empty());
        assert!(monthly_trend(&[]).is_empty());
        assert!(top_delayed_routes(&[], TOP_ROUTES).is_empty());

        let grid = delay_heatmap(&[]);
        assert!(grid.iter().flatten().all(|c| c.avg_delay == 0.0 && c.flight_count == 0));
    }
}

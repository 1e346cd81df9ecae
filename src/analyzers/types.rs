//! Summary types produced by the aggregation and health-scoring views.

use serde::Serialize;

/// Mean departure and arrival delay for one airline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirlineDelay {
    pub airline: String,
    pub avg_departure_delay: f64,
    pub avg_arrival_delay: f64,
    pub flights: usize,
}

/// Headline numbers for the filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_flights: usize,
    pub avg_arrival_delay: f64,
    pub max_arrival_delay: f64,
    pub on_time_rate: f64,
    pub airlines: usize,
    pub routes: usize,
}

/// Mean arrival delay for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayDelay {
    pub day: String,
    pub avg_delay: f64,
    pub flights: usize,
}

/// Arrival-delay trend point for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub month: u32,
    pub month_name: String,
    pub avg_delay: f64,
    pub flights: usize,
    /// Percentage of flights arriving at most 15 minutes late.
    pub on_time_rate: f64,
}

/// Arrival-delay statistics for one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDelay {
    pub route: String,
    pub avg_delay: f64,
    pub flights: usize,
    /// Flights arriving more than 15 minutes late.
    pub delayed_flights: usize,
    pub delay_rate: f64,
}

/// Headline numbers for a route ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRankingSummary {
    pub routes_ranked: usize,
    pub highest_avg_delay: f64,
    pub lowest_avg_delay: f64,
    pub avg_delay_rate: f64,
}

/// One day × hour cell of the delay heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub day: String,
    pub hour: u32,
    pub avg_delay: f64,
    pub flight_count: usize,
}

/// Health of a single route, normalized against every other route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteHealthScore {
    pub route: String,
    pub origin: String,
    pub destination: String,
    pub delay_percent: f64,
    pub avg_positive_delay: f64,
    pub health_score: f64,
    pub normalized_health_score: f64,
    pub total_flights: usize,
    pub delayed_flights: usize,
    pub grade: String,
}

/// Health of a single airline. Scores are not normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirlineHealthScore {
    pub airline: String,
    pub delay_percent: f64,
    pub avg_positive_delay: f64,
    pub health_score: f64,
    pub on_time_rate: f64,
    pub delay_rate: f64,
    pub severe_delay_rate: f64,
    pub avg_arrival_delay: f64,
    pub total_flights: usize,
    pub grade: String,
}

/// Overall system health and letter grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallHealth {
    pub score: f64,
    pub grade: String,
}

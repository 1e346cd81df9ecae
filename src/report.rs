//! Builds the full dashboard report for one filtered view of a dataset.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::analyzers::aggregate::{
    dataset_summary, delay_by_airline, delay_by_weekday, delay_heatmap, monthly_trend,
    route_ranking_summary, top_delayed_routes,
};
use crate::analyzers::health::{airline_health_scores, overall_health, route_health_scores};
use crate::analyzers::types::{
    AirlineDelay, AirlineHealthScore, DatasetSummary, HeatmapCell, MonthlyTrend, OverallHealth,
    RouteDelay, RouteHealthScore, RouteRankingSummary, WeekdayDelay,
};
use crate::filter::{FilterOptions, FilterSpec, apply_filters, filter_options};
use crate::loader::{Dataset, DatasetOrigin};

/// Every view the dashboard renders, computed over one filtered record set.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub origin: DatasetOrigin,
    pub total_records: usize,
    pub filtered_records: usize,
    pub filter: FilterSpec,
    /// Options come from the unfiltered dataset so every choice stays selectable.
    pub filter_options: FilterOptions,
    pub summary: DatasetSummary,
    pub delay_by_airline: Vec<AirlineDelay>,
    pub delay_by_weekday: Vec<WeekdayDelay>,
    pub monthly_trend: Vec<MonthlyTrend>,
    pub top_delayed_routes: Vec<RouteDelay>,
    pub route_summary: RouteRankingSummary,
    pub heatmap: Vec<Vec<HeatmapCell>>,
    pub route_health: Vec<RouteHealthScore>,
    pub airline_health: Vec<AirlineHealthScore>,
    pub overall_health: OverallHealth,
}

/// Filters `dataset` with `filter` and runs every view over the result.
pub fn build_report(dataset: &Dataset, filter: &FilterSpec, top_routes: usize) -> DashboardReport {
    let filtered = apply_filters(&dataset.records, filter);
    debug!(
        total = dataset.records.len(),
        filtered = filtered.len(),
        "Building dashboard report"
    );

    let top = top_delayed_routes(&filtered, top_routes);
    let route_health = route_health_scores(&filtered);

    DashboardReport {
        schema_version: 1,
        generated_at: Utc::now(),
        origin: dataset.origin.clone(),
        total_records: dataset.records.len(),
        filtered_records: filtered.len(),
        filter: filter.clone(),
        filter_options: filter_options(&dataset.records),
        summary: dataset_summary(&filtered),
        delay_by_airline: delay_by_airline(&filtered),
        delay_by_weekday: delay_by_weekday(&filtered),
        monthly_trend: monthly_trend(&filtered),
        route_summary: route_ranking_summary(&top),
        top_delayed_routes: top,
        heatmap: delay_heatmap(&filtered),
        overall_health: overall_health(&route_health),
        route_health,
        airline_health: airline_health_scores(&filtered),
    }
}

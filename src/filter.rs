//! User-selected filters applied before every aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::records::FlightRecord;

/// Sentinel matching every airline or route.
pub const ALL: &str = "all";

/// Default arrival-delay window, in minutes.
pub const DEFAULT_DELAY_RANGE: (f64, f64) = (-50.0, 200.0);

/// A conjunction of airline, route and arrival-delay constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub airline: String,
    pub route: String,
    pub delay_range: (f64, f64),
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            airline: ALL.to_string(),
            route: ALL.to_string(),
            delay_range: DEFAULT_DELAY_RANGE,
        }
    }
}

impl FilterSpec {
    pub fn with_airline(mut self, airline: &str) -> Self {
        self.airline = airline.to_string();
        self
    }

    pub fn with_route(mut self, route: &str) -> Self {
        self.route = route.to_string();
        self
    }

    pub fn with_delay_range(mut self, min: f64, max: f64) -> Self {
        self.delay_range = (min, max);
        self
    }

    /// Whether a single record passes every constraint.
    pub fn matches(&self, record: &FlightRecord) -> bool {
        let (min, max) = self.delay_range;

        (self.airline == ALL || record.airline == self.airline)
            && (self.route == ALL || record.route == self.route)
            && record.arrival_delay >= min
            && record.arrival_delay <= max
    }
}

/// Returns the records matching `spec`, in their original order.
pub fn apply_filters(records: &[FlightRecord], spec: &FilterSpec) -> Vec<FlightRecord> {
    records.iter().filter(|r| spec.matches(r)).cloned().collect()
}

/// Distinct values available to the airline and route selectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub airlines: Vec<String>,
    pub routes: Vec<String>,
}

/// Sorted, de-duplicated airlines and routes present in `records`.
pub fn filter_options(records: &[FlightRecord]) -> FilterOptions {
    let airlines: BTreeSet<&str> = records.iter().map(|r| r.airline.as_str()).collect();
    let routes: BTreeSet<&str> = records.iter().map(|r| r.route.as_str()).collect();

    FilterOptions {
        airlines: airlines.into_iter().map(String::from).collect(),
        routes: routes.into_iter().map(String::from).collect(),
    }
}

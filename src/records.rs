//! Typed flight record model and the fields derived from it.

use serde::{Deserialize, Serialize};

/// Weekday names in display order, indexed by `DAY_OF_WEEK - 1`.
///
/// Every grouping and sorting path that orders weekdays reads this table.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Departure delay (minutes) above which a flight counts as delayed.
pub const DELAY_THRESHOLD_MINUTES: f64 = 15.0;

/// Primary fields of a flight row, before derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub day_of_week: u32,
    pub airline: String,
    pub flight_number: u32,
    pub origin_airport: String,
    pub destination_airport: String,
    pub scheduled_departure: i32,
    pub departure_time: i32,
    pub departure_delay: f64,
    pub scheduled_time: f64,
    pub elapsed_time: f64,
    pub distance: f64,
    pub scheduled_arrival: i32,
    pub arrival_time: i32,
    pub arrival_delay: f64,
}

/// A single flight with every primary and derived field populated.
///
/// Serialized keys match the recognized CSV header names, so an exported
/// record set can be parsed back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FlightRecord {
    pub id: usize,

    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub day_of_week: u32,
    pub airline: String,
    pub flight_number: u32,
    pub origin_airport: String,
    pub destination_airport: String,
    pub scheduled_departure: i32,
    pub departure_time: i32,
    pub departure_delay: f64,
    pub scheduled_time: f64,
    pub elapsed_time: f64,
    pub distance: f64,
    pub scheduled_arrival: i32,
    pub arrival_time: i32,
    pub arrival_delay: f64,

    // derived
    pub route: String,
    pub day_of_week_name: String,
    pub hour: u32,
    pub date: String,
    pub positive_delay: f64,
    pub is_delayed: u8,
}

impl FlightRecord {
    /// Builds a record from its primary fields, computing every derived field.
    pub fn new(id: usize, p: PrimaryFields) -> Self {
        let route = route_key(&p.origin_airport, &p.destination_airport);
        let day_of_week_name = weekday_name(p.day_of_week).to_string();
        let hour = hour_from_time(p.scheduled_departure);
        let date = date_string(p.year, p.month, p.day);
        let positive_delay = positive_delay(p.departure_delay);
        let is_delayed = is_delayed(p.departure_delay);

        FlightRecord {
            id,
            year: p.year,
            month: p.month,
            day: p.day,
            day_of_week: p.day_of_week,
            airline: p.airline,
            flight_number: p.flight_number,
            origin_airport: p.origin_airport,
            destination_airport: p.destination_airport,
            scheduled_departure: p.scheduled_departure,
            departure_time: p.departure_time,
            departure_delay: p.departure_delay,
            scheduled_time: p.scheduled_time,
            elapsed_time: p.elapsed_time,
            distance: p.distance,
            scheduled_arrival: p.scheduled_arrival,
            arrival_time: p.arrival_time,
            arrival_delay: p.arrival_delay,
            route,
            day_of_week_name,
            hour,
            date,
            positive_delay,
            is_delayed,
        }
    }

    pub fn delayed(&self) -> bool {
        self.is_delayed == 1
    }
}

/// `"{origin}-{destination}"`.
pub fn route_key(origin: &str, destination: &str) -> String {
    format!("{origin}-{destination}")
}

/// Maps 1..=7 to Monday..=Sunday. Anything else reads as Monday.
pub fn weekday_name(day_of_week: u32) -> &'static str {
    weekday_index(day_of_week).map_or(WEEKDAYS[0], |i| WEEKDAYS[i])
}

/// Zero-based position of a `DAY_OF_WEEK` number in [`WEEKDAYS`].
pub fn weekday_index(day_of_week: u32) -> Option<usize> {
    match day_of_week {
        1..=7 => Some(day_of_week as usize - 1),
        _ => None,
    }
}

/// Position of a weekday name in [`WEEKDAYS`].
pub fn weekday_position(name: &str) -> Option<usize> {
    WEEKDAYS.iter().position(|d| *d == name)
}

/// Hour of day from an HHMM-encoded time, e.g. `1430` -> `14`.
pub fn hour_from_time(hhmm: i32) -> u32 {
    if hhmm <= 0 {
        return 0;
    }
    (hhmm / 100) as u32
}

/// `YYYY-MM-DD`, zero-padded.
pub fn date_string(year: i32, month: u32, day: u32) -> String {
    format!("{year}-{month:02}-{day:02}")
}

pub fn positive_delay(departure_delay: f64) -> f64 {
    departure_delay.max(0.0)
}

pub fn is_delayed(departure_delay: f64) -> u8 {
    if departure_delay > DELAY_THRESHOLD_MINUTES {
        1
    } else {
        0
    }
}

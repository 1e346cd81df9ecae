//! CSV parser for flight records.
//!
//! Columns are looked up by header name, resolved once per parse. Any cell
//! that is missing, empty or unparseable is replaced by the field's default
//! (see [`Field::fallback`]), so every row yields a fully populated record.

use anyhow::Result;
use csv::{ReaderBuilder, StringRecord, Trim};
use rand::Rng;
use tracing::debug;

use crate::records::{FlightRecord, PrimaryFields};

/// Year used when `YEAR` is absent or unparseable.
pub const DEFAULT_YEAR: i32 = 2024;
pub const DEFAULT_ORIGIN: &str = "NYC";
pub const DEFAULT_DESTINATION: &str = "LAX";

/// Every column the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    DayOfWeek,
    Airline,
    FlightNumber,
    OriginAirport,
    DestinationAirport,
    ScheduledDeparture,
    DepartureTime,
    DepartureDelay,
    ScheduledTime,
    ElapsedTime,
    Distance,
    ScheduledArrival,
    ArrivalTime,
    ArrivalDelay,
}

/// How a numeric field is filled in when its cell can't be used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    Fixed(f64),
    /// Uniform integer in `lo..hi`.
    IntRange(i64, i64),
    /// Uniform real in `lo..hi`.
    FloatRange(f64, f64),
    /// Text fields never take a numeric fallback.
    Text,
}

impl Field {
    pub const ALL: [Field; 17] = [
        Field::Year,
        Field::Month,
        Field::Day,
        Field::DayOfWeek,
        Field::Airline,
        Field::FlightNumber,
        Field::OriginAirport,
        Field::DestinationAirport,
        Field::ScheduledDeparture,
        Field::DepartureTime,
        Field::DepartureDelay,
        Field::ScheduledTime,
        Field::ElapsedTime,
        Field::Distance,
        Field::ScheduledArrival,
        Field::ArrivalTime,
        Field::ArrivalDelay,
    ];

    /// The CSV header naming this field. Case-sensitive.
    pub fn header(self) -> &'static str {
        match self {
            Field::Year => "YEAR",
            Field::Month => "MONTH",
            Field::Day => "DAY",
            Field::DayOfWeek => "DAY_OF_WEEK",
            Field::Airline => "AIRLINE",
            Field::FlightNumber => "FLIGHT_NUMBER",
            Field::OriginAirport => "ORIGIN_AIRPORT",
            Field::DestinationAirport => "DESTINATION_AIRPORT",
            Field::ScheduledDeparture => "SCHEDULED_DEPARTURE",
            Field::DepartureTime => "DEPARTURE_TIME",
            Field::DepartureDelay => "DEPARTURE_DELAY",
            Field::ScheduledTime => "SCHEDULED_TIME",
            Field::ElapsedTime => "ELAPSED_TIME",
            Field::Distance => "DISTANCE",
            Field::ScheduledArrival => "SCHEDULED_ARRIVAL",
            Field::ArrivalTime => "ARRIVAL_TIME",
            Field::ArrivalDelay => "ARRIVAL_DELAY",
        }
    }

    /// Default policy for this field.
    ///
    /// | Field                          | Fallback        |
    /// |--------------------------------|-----------------|
    /// | YEAR                           | 2024            |
    /// | MONTH                          | 1..=12          |
    /// | DAY                            | 1..=28          |
    /// | DAY_OF_WEEK                    | 1..=7           |
    /// | FLIGHT_NUMBER                  | 1..=9999        |
    /// | scheduled / actual times       | 0..2400         |
    /// | DEPARTURE_DELAY                | -20.0..100.0    |
    /// | ARRIVAL_DELAY                  | -30.0..120.0    |
    /// | SCHEDULED_TIME / ELAPSED_TIME  | 60.0..460.0     |
    /// | DISTANCE                       | 200.0..3200.0   |
    pub fn fallback(self) -> Fallback {
        match self {
            Field::Year => Fallback::Fixed(DEFAULT_YEAR as f64),
            Field::Month => Fallback::IntRange(1, 13),
            Field::Day => Fallback::IntRange(1, 29),
            Field::DayOfWeek => Fallback::IntRange(1, 8),
            Field::FlightNumber => Fallback::IntRange(1, 10_000),
            Field::ScheduledDeparture
            | Field::DepartureTime
            | Field::ScheduledArrival
            | Field::ArrivalTime => Fallback::IntRange(0, 2400),
            Field::DepartureDelay => Fallback::FloatRange(-20.0, 100.0),
            Field::ArrivalDelay => Fallback::FloatRange(-30.0, 120.0),
            Field::ScheduledTime | Field::ElapsedTime => Fallback::FloatRange(60.0, 460.0),
            Field::Distance => Fallback::FloatRange(200.0, 3200.0),
            Field::Airline | Field::OriginAirport | Field::DestinationAirport => Fallback::Text,
        }
    }

    fn unsigned(self) -> bool {
        matches!(
            self,
            Field::Month | Field::Day | Field::DayOfWeek | Field::FlightNumber
        )
    }

    fn accepts(self, value: i64) -> bool {
        if self.unsigned() {
            u32::try_from(value).is_ok()
        } else {
            i32::try_from(value).is_ok()
        }
    }
}

impl Fallback {
    pub fn sample<R: Rng>(self, rng: &mut R) -> f64 {
        match self {
            Fallback::Fixed(v) => v,
            Fallback::IntRange(lo, hi) => rng.gen_range(lo..hi) as f64,
            Fallback::FloatRange(lo, hi) => rng.gen_range(lo..hi),
            Fallback::Text => 0.0,
        }
    }
}

/// Parses a base-10 number, truncating finite decimals toward zero.
pub fn parse_base10(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
        .map(|v| v.trunc() as i64)
}

/// Resolves a numeric cell, substituting the field's fallback when the cell
/// is absent, empty, unparseable or out of the field's integer range.
pub fn resolve_number<R: Rng>(field: Field, raw: Option<&str>, rng: &mut R) -> f64 {
    match raw.and_then(parse_base10) {
        Some(v) if field.accepts(v) => v as f64,
        _ => field.fallback().sample(rng),
    }
}

/// Resolves a text cell, substituting the field's literal default when the
/// cell is absent or blank.
pub fn resolve_text<R: Rng>(field: Field, raw: Option<&str>, rng: &mut R) -> String {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => match field {
            Field::Airline => format!("Airline {}", rng.gen_range(1..=10)),
            Field::DestinationAirport => DEFAULT_DESTINATION.to_string(),
            _ => DEFAULT_ORIGIN.to_string(),
        },
    }
}

/// Header-name to column-index lookup, built once per parse.
#[derive(Debug, Default)]
pub struct ColumnMap {
    columns: [Option<usize>; Field::ALL.len()],
}

impl ColumnMap {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut map = ColumnMap::default();
        for (slot, field) in Field::ALL.iter().enumerate() {
            map.columns[slot] = headers.iter().position(|h| h == field.header());
        }
        map
    }

    pub fn index(&self, field: Field) -> Option<usize> {
        self.columns[field as usize]
    }

    pub fn recognized(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }

    fn cell<'r>(&self, row: &'r StringRecord, field: Field) -> Option<&'r str> {
        self.index(field).and_then(|i| row.get(i))
    }
}

/// Parses comma-separated flight data into records, one per non-blank line
/// after the header.
///
/// Rows are physical lines. Quotes are honoured within a line, but a quote
/// left open runs only to the end of its own line.
///
/// # Errors
///
/// Returns an error if the underlying CSV reader fails. Malformed cells are
/// never an error; they are defaulted.
pub fn parse_flights(text: &str) -> Result<Vec<FlightRecord>> {
    parse_flights_with_rng(text, &mut rand::thread_rng())
}

/// [`parse_flights`] with a caller-provided random source for defaults.
pub fn parse_flights_with_rng<R: Rng>(text: &str, rng: &mut R) -> Result<Vec<FlightRecord>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    let columns = ColumnMap::from_headers(&split_line(header)?);
    debug!(recognized = columns.recognized(), "Resolved CSV columns");

    let mut records = Vec::new();
    for line in lines {
        let row = split_line(line)?;
        let primary = primary_fields(&columns, &row, rng);
        records.push(FlightRecord::new(records.len(), primary));
    }

    debug!(rows = records.len(), "Parsed flight rows");
    Ok(records)
}

/// Splits one physical line into trimmed cells.
fn split_line(line: &str) -> Result<StringRecord> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .buffer_capacity(line.len().max(1))
        .from_reader(line.as_bytes());

    let mut row = StringRecord::new();
    rdr.read_record(&mut row)?;
    Ok(row)
}

fn primary_fields<R: Rng>(columns: &ColumnMap, row: &StringRecord, rng: &mut R) -> PrimaryFields {
    let mut num = |field: Field| resolve_number(field, columns.cell(row, field), rng);

    let year = num(Field::Year) as i32;
    let month = num(Field::Month) as u32;
    let day = num(Field::Day) as u32;
    let day_of_week = num(Field::DayOfWeek) as u32;
    let flight_number = num(Field::FlightNumber) as u32;
    let scheduled_departure = num(Field::ScheduledDeparture) as i32;
    let departure_time = num(Field::DepartureTime) as i32;
    let departure_delay = num(Field::DepartureDelay);
    let scheduled_time = num(Field::ScheduledTime);
    let elapsed_time = num(Field::ElapsedTime);
    let distance = num(Field::Distance);
    let scheduled_arrival = num(Field::ScheduledArrival) as i32;
    let arrival_time = num(Field::ArrivalTime) as i32;
    let arrival_delay = num(Field::ArrivalDelay);

    let mut text = |field: Field| resolve_text(field, columns.cell(row, field), rng);

    PrimaryFields {
        year,
        month,
        day,
        day_of_week,
        airline: text(Field::Airline),
        flight_number,
        origin_airport: text(Field::OriginAirport),
        destination_airport: text(Field::DestinationAirport),
        scheduled_departure,
        departure_time,
        departure_delay,
        scheduled_time,
        elapsed_time,
        distance,
        scheduled_arrival,
        arrival_time,
        arrival_delay,
    }
}

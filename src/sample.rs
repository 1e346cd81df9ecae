//! Synthetic flight data used when an upload yields no usable rows.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::parser::{DEFAULT_YEAR, Field};
use crate::records::{FlightRecord, PrimaryFields};

/// Number of records produced by [`generate_sample`].
pub const SAMPLE_SIZE: usize = 1000;

pub const SAMPLE_AIRLINES: [&str; 7] = [
    "Delta",
    "American",
    "United",
    "Southwest",
    "JetBlue",
    "Alaska",
    "Spirit",
];

pub const SAMPLE_AIRPORTS: [&str; 10] = [
    "NYC", "LAX", "CHI", "MIA", "SF", "DEN", "ATL", "DFW", "SEA", "BOS",
];

/// Generates [`SAMPLE_SIZE`] random flights.
pub fn generate_sample() -> Vec<FlightRecord> {
    generate_sample_with_rng(&mut rand::thread_rng(), SAMPLE_SIZE)
}

/// Generates `count` random flights from the given random source.
///
/// Numeric fields are drawn from the same ranges the parser uses for
/// defaults; origin and destination always differ.
pub fn generate_sample_with_rng<R: Rng>(rng: &mut R, count: usize) -> Vec<FlightRecord> {
    (0..count)
        .map(|id| FlightRecord::new(id, sample_flight(rng)))
        .collect()
}

fn sample_flight<R: Rng>(rng: &mut R) -> PrimaryFields {
    let airline = pick(rng, &SAMPLE_AIRLINES);
    let origin = pick(rng, &SAMPLE_AIRPORTS);
    let mut destination = pick(rng, &SAMPLE_AIRPORTS);
    while destination == origin {
        destination = pick(rng, &SAMPLE_AIRPORTS);
    }

    let mut draw = |field: Field| field.fallback().sample(rng);

    PrimaryFields {
        year: DEFAULT_YEAR,
        month: draw(Field::Month) as u32,
        day: draw(Field::Day) as u32,
        day_of_week: draw(Field::DayOfWeek) as u32,
        airline: airline.to_string(),
        flight_number: draw(Field::FlightNumber) as u32,
        origin_airport: origin.to_string(),
        destination_airport: destination.to_string(),
        scheduled_departure: draw(Field::ScheduledDeparture) as i32,
        departure_time: draw(Field::DepartureTime) as i32,
        departure_delay: draw(Field::DepartureDelay),
        scheduled_time: draw(Field::ScheduledTime),
        elapsed_time: draw(Field::ElapsedTime),
        distance: draw(Field::Distance),
        scheduled_arrival: draw(Field::ScheduledArrival) as i32,
        arrival_time: draw(Field::ArrivalTime) as i32,
        arrival_delay: draw(Field::ArrivalDelay),
    }
}

fn pick<R: Rng>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or(pool[0])
}

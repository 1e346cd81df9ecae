use std::collections::HashMap;
use std::hash::Hash;

use crate::records::FlightRecord;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `part / total * 100`, or 0.0 when `total` is zero.
pub fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Rescales `values` so the minimum maps to 0 and the maximum to 100.
///
/// When every value is equal (or there is only one) each maps to `fallback`.
pub fn min_max_normalize(values: &[f64], fallback: f64) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|v| {
            if range > 0.0 {
                100.0 * (v - min) / range
            } else {
                fallback
            }
        })
        .collect()
}

/// Groups records by `key`, keeping groups in first-encounter order and
/// records within a group in input order.
pub fn group_by<'a, K, F>(records: &'a [FlightRecord], key: F) -> Vec<(K, Vec<&'a FlightRecord>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&FlightRecord) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&FlightRecord>)> = Vec::new();

    for record in records {
        let k = key(record);
        let slot = *slots.entry(k.clone()).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record);
    }

    groups
}

/// Mean of `field` over a group of records.
pub fn mean_of<F>(group: &[&FlightRecord], field: F) -> f64
where
    F: Fn(&FlightRecord) -> f64,
{
    if group.is_empty() {
        return 0.0;
    }
    group.iter().map(|r| field(*r)).sum::<f64>() / group.len() as f64
}

/// Number of records in a group satisfying `pred`.
pub fn count_where<P>(group: &[&FlightRecord], pred: P) -> usize
where
    P: Fn(&FlightRecord) -> bool,
{
    group.iter().filter(|r| pred(**r)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::tests::primary;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn test_rate_with_zero_total() {
        assert_eq!(rate(10, 0), 0.0);
        assert_eq!(rate(1, 4), 25.0);
    }

    #[test]
    fn test_min_max_normalize_spans_zero_to_hundred() {
        let out = min_max_normalize(&[45.0, 95.0, 70.0], 50.0);
        assert_eq!(out, vec![0.0, 100.0, 50.0]);
    }

    #[test]
    fn test_min_max_normalize_equal_values_use_fallback() {
        assert_eq!(min_max_normalize(&[12.0, 12.0], 50.0), vec![50.0, 50.0]);
        assert_eq!(min_max_normalize(&[-3.0], 50.0), vec![50.0]);
        assert!(min_max_normalize(&[], 50.0).is_empty());
    }

    #[test]
    fn test_group_by_keeps_encounter_order() {
        let records = vec![
            FlightRecord::new(0, primary("United", "NYC", "LAX", 0.0, 0.0)),
            FlightRecord::new(1, primary("Delta", "NYC", "LAX", 0.0, 0.0)),
            FlightRecord::new(2, primary("United", "NYC", "LAX", 0.0, 0.0)),
        ];
        let groups = group_by(&records, |r| r.airline.clone());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "United");
        assert_eq!(
            groups[0].1.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(groups[1].0, "Delta");
    }

    #[test]
    fn test_mean_of_and_count_where() {
        let records = [
            FlightRecord::new(0, primary("Delta", "NYC", "LAX", 20.0, 30.0)),
            FlightRecord::new(1, primary("Delta", "NYC", "LAX", -4.0, 10.0)),
        ];
        let group: Vec<&FlightRecord> = records.iter().collect();

        assert_eq!(mean_of(&group, |r| r.arrival_delay), 20.0);
        assert_eq!(count_where(&group, |r| r.arrival_delay > 15.0), 1);
        assert_eq!(mean_of(&[], |r| r.arrival_delay), 0.0);
    }
}

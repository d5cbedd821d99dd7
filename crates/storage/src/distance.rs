//! Race distances and per-mile pace.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::time::format_seconds;

pub const FIVE_K_MILES: f64 = 3.10686;

const DISTANCES: &[(&str, f64)] = &[
    ("5K", FIVE_K_MILES),
    ("3K", 1.86411),
    ("8K", 4.97097),
    ("10K", 6.21371),
    ("1M", 1.0),
    ("2M", 2.0),
    ("3M", 3.0),
    ("1MILE", 1.0),
    ("2MILE", 2.0),
    ("3MILE", 3.0),
    ("1600M", 0.99419),
    ("3200M", 1.98838),
    ("5000M", FIVE_K_MILES),
    ("8000M", 4.97097),
    ("10000M", 6.21371),
];

/// Labels accepted by [`distance_to_miles`], in display form.
pub fn supported_distances() -> &'static [&'static str] {
    &[
        "5K", "3K", "8K", "10K", "1M", "2M", "3M", "1 Mile", "2 Mile", "3 Mile", "1600M",
        "3200M", "5000M", "8000M", "10000M",
    ]
}

/// Length of a race distance label in miles, ignoring case and spaces.
pub fn distance_to_miles(distance: &str) -> Option<f64> {
    let key: String = distance
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    let key = key.strip_suffix('S').unwrap_or(&key);

    DISTANCES
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, miles)| *miles)
}

/// Seconds per mile for a finish time over `distance`.
pub fn pace_seconds(time_seconds: Decimal, distance: &str) -> Option<f64> {
    let miles = distance_to_miles(distance)?;
    Some(time_seconds.to_f64()? / miles)
}

/// Per-mile pace rendered as `MM:SS.cc`.
pub fn calculate_pace(time_seconds: Decimal, distance: &str) -> Option<String> {
    let pace = pace_seconds(time_seconds, distance);
    if pace.is_none() {
        tracing::warn!("Unknown distance '{}', pace not available", distance);
    }
    pace.and_then(Decimal::from_f64).map(format_seconds)
}

/// Time the same pace would produce over 5K.
pub fn five_k_equivalent(time_seconds: Decimal, distance: &str) -> Option<Decimal> {
    let miles = distance_to_miles(distance)?;
    if (miles - FIVE_K_MILES).abs() < 0.01 {
        return Some(time_seconds);
    }
    let pace = time_seconds.to_f64()? / miles;
    Decimal::from_f64(pace * FIVE_K_MILES).map(|d| d.round_dp(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_lookup_ignores_case_and_spaces() {
        assert_eq!(distance_to_miles("5K"), Some(FIVE_K_MILES));
        assert_eq!(distance_to_miles("5k"), Some(FIVE_K_MILES));
        assert_eq!(distance_to_miles("2 Mile"), Some(2.0));
        assert_eq!(distance_to_miles("2 Miles"), Some(2.0));
        assert_eq!(distance_to_miles("3200m"), Some(1.98838));
        assert_eq!(distance_to_miles("marathon"), None);
    }

    #[test]
    fn test_every_supported_label_resolves() {
        for label in supported_distances() {
            assert!(distance_to_miles(label).is_some(), "{label}");
        }
    }

    #[test]
    fn test_pace_for_two_mile_race() {
        let pace = calculate_pace(Decimal::from(720), "2M");
        assert_eq!(pace.as_deref(), Some("06:00.00"));
    }

    #[test]
    fn test_pace_unknown_distance() {
        assert_eq!(calculate_pace(Decimal::from(720), "relay"), None);
    }

    #[test]
    fn test_five_k_equivalent() {
        let same = five_k_equivalent(Decimal::from(1100), "5000M");
        assert_eq!(same, Some(Decimal::from(1100)));

        let scaled = five_k_equivalent(Decimal::from(720), "2M").unwrap();
        // 360 s/mile over 3.10686 miles
        assert_eq!(scaled, Decimal::new(1118470, 3));
    }
}

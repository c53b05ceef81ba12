use crate::models::ForecastBundle;
use chrono::NaiveDate;

/// Parallel hourly series for one calendar day, ready for charting.
/// All three vectors are always the same length; index i of each refers
/// to the same original hour. Empty when no hourly data covers the day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySeries {
    pub hour_labels: Vec<String>,
    pub temperatures: Vec<f64>,
    pub precip_probabilities: Vec<f64>,
}

impl DaySeries {
    pub fn len(&self) -> usize {
        self.hour_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hour_labels.is_empty()
    }
}

/// Extract the hourly temperature/precipitation-probability subsequence
/// belonging to one calendar day, preserving chronological order.
pub fn slice_day(bundle: &ForecastBundle, date: NaiveDate) -> DaySeries {
    let mut series = DaySeries::default();

    for sample in bundle.hours_on(date) {
        series.hour_labels.push(sample.hour_label());
        series.temperatures.push(sample.temperature_c);
        series
            .precip_probabilities
            .push(sample.precipitation_probability);
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastLocation, HourlySample};
    use chrono::Utc;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn bundle(hourly: Vec<HourlySample>) -> ForecastBundle {
        ForecastBundle {
            fetched_at: Utc::now(),
            location: ForecastLocation {
                name: "Hamburg".into(),
                latitude: 53.55,
                longitude: 9.99,
            },
            daily: Vec::new(),
            hourly,
        }
    }

    fn sample(d: u32, h: u32, temp: f64, prob: f64) -> HourlySample {
        HourlySample {
            timestamp: date(d).and_hms_opt(h, 0, 0).unwrap(),
            temperature_c: temp,
            precipitation_probability: prob,
            relative_humidity: 50.0,
        }
    }

    #[test]
    fn slices_one_day_in_chronological_order() {
        let b = bundle(vec![
            sample(1, 23, 14.0, 5.0),
            sample(2, 0, 13.0, 10.0),
            sample(2, 9, 18.0, 20.0),
            sample(2, 15, 22.5, 35.0),
            sample(3, 0, 15.0, 0.0),
        ]);

        let series = slice_day(&b, date(2));
        assert_eq!(series.hour_labels, vec!["00:00", "09:00", "15:00"]);
        assert_eq!(series.temperatures, vec![13.0, 18.0, 22.5]);
        assert_eq!(series.precip_probabilities, vec![10.0, 20.0, 35.0]);
    }

    #[test]
    fn parallel_arrays_stay_equal_length() {
        let b = bundle((0..24).map(|h| sample(2, h, 20.0, 10.0)).collect());
        let series = slice_day(&b, date(2));
        assert_eq!(series.len(), 24);
        assert_eq!(series.temperatures.len(), series.hour_labels.len());
        assert_eq!(series.precip_probabilities.len(), series.hour_labels.len());
    }

    #[test]
    fn day_without_hourly_data_is_empty_not_an_error() {
        let b = bundle(vec![sample(1, 12, 20.0, 10.0)]);
        let series = slice_day(&b, date(5));
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }
}

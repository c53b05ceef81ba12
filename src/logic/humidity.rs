use crate::models::{DailyForecast, ForecastBundle};
use chrono::NaiveDate;

/// Hour range (inclusive both ends) used to compute representative
/// humidity. A single instantaneous or daily-max reading overstates
/// stress; averaging over the active daytime hours approximates what
/// the crop is actually exposed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaytimeWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl DaytimeWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour <= self.end_hour
    }
}

impl Default for DaytimeWindow {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
        }
    }
}

/// Mean relative humidity over the daytime window of one calendar day,
/// rounded to the nearest integer.
///
/// Returns `None` when no hourly sample matches; callers must treat that
/// distinctly from a valid zero reading.
pub fn mean_humidity(bundle: &ForecastBundle, date: NaiveDate, window: DaytimeWindow) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u32;

    for sample in bundle.hours_on(date) {
        if window.contains(sample.hour_of_day()) {
            sum += sample.relative_humidity;
            count += 1;
        }
    }

    if count == 0 {
        None
    } else {
        Some((sum / count as f64).round())
    }
}

/// The humidity evidence available for one day, in priority order:
/// daytime mean from hourly data, then the provider's daily maximum,
/// then nothing at all.
///
/// `Missing` satisfies the humidity criterion by default. That is a
/// deliberate, documented policy: absence of humidity data must never by
/// itself block a recommendation, even though it can recommend days that
/// are actually too damp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HumiditySignal {
    DaytimeMean(f64),
    DailyMax(f64),
    Missing,
}

impl HumiditySignal {
    pub fn resolve(
        bundle: &ForecastBundle,
        day: &DailyForecast,
        window: DaytimeWindow,
    ) -> Self {
        if let Some(mean) = mean_humidity(bundle, day.date, window) {
            return HumiditySignal::DaytimeMean(mean);
        }
        match day.relative_humidity_max {
            Some(max) => HumiditySignal::DailyMax(max),
            None => HumiditySignal::Missing,
        }
    }

    pub fn within(&self, ceiling: f64) -> bool {
        match self {
            HumiditySignal::DaytimeMean(h) | HumiditySignal::DailyMax(h) => *h <= ceiling,
            HumiditySignal::Missing => true,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            HumiditySignal::DaytimeMean(h) | HumiditySignal::DailyMax(h) => Some(*h),
            HumiditySignal::Missing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastLocation, HourlySample};
    use chrono::Utc;

    fn bundle_with_hours(hours: &[(u32, u32, f64)]) -> ForecastBundle {
        // (day-of-month, hour, humidity)
        ForecastBundle {
            fetched_at: Utc::now(),
            location: ForecastLocation {
                name: "Hamburg".into(),
                latitude: 53.55,
                longitude: 9.99,
            },
            daily: Vec::new(),
            hourly: hours
                .iter()
                .map(|(d, h, rh)| HourlySample {
                    timestamp: NaiveDate::from_ymd_opt(2025, 9, *d)
                        .unwrap()
                        .and_hms_opt(*h, 0, 0)
                        .unwrap(),
                    temperature_c: 20.0,
                    precipitation_probability: 0.0,
                    relative_humidity: *rh,
                })
                .collect(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn averages_only_daytime_samples_of_the_day() {
        let bundle = bundle_with_hours(&[
            (2, 6, 90.0),  // before window
            (2, 8, 60.0),  // window start, inclusive
            (2, 14, 50.0),
            (2, 20, 70.0), // window end, inclusive
            (2, 22, 95.0), // after window
            (3, 12, 10.0), // wrong day
        ]);
        assert_eq!(
            mean_humidity(&bundle, day(2), DaytimeWindow::default()),
            Some(60.0)
        );
    }

    #[test]
    fn single_sample_mean_is_that_sample() {
        let bundle = bundle_with_hours(&[(2, 12, 57.0)]);
        assert_eq!(
            mean_humidity(&bundle, day(2), DaytimeWindow::default()),
            Some(57.0)
        );
    }

    #[test]
    fn zero_matching_samples_is_none_not_zero() {
        let bundle = bundle_with_hours(&[(2, 3, 80.0)]);
        assert_eq!(mean_humidity(&bundle, day(2), DaytimeWindow::default()), None);
        assert_eq!(mean_humidity(&bundle, day(5), DaytimeWindow::default()), None);
    }

    #[test]
    fn mean_is_rounded_to_nearest_integer() {
        let bundle = bundle_with_hours(&[(2, 10, 50.0), (2, 11, 51.0), (2, 12, 53.0)]);
        // 154 / 3 = 51.33 -> 51
        assert_eq!(
            mean_humidity(&bundle, day(2), DaytimeWindow::default()),
            Some(51.0)
        );
    }

    fn daily(d: u32, rh_max: Option<f64>) -> DailyForecast {
        DailyForecast {
            date: day(d),
            temp_max_c: 24.0,
            temp_min_c: 12.0,
            precipitation_sum_mm: 0.0,
            precipitation_prob_max: 0.0,
            relative_humidity_max: rh_max,
        }
    }

    #[test]
    fn resolution_prefers_daytime_mean() {
        let bundle = bundle_with_hours(&[(2, 12, 55.0)]);
        let signal = HumiditySignal::resolve(&bundle, &daily(2, Some(90.0)), DaytimeWindow::default());
        assert_eq!(signal, HumiditySignal::DaytimeMean(55.0));
    }

    #[test]
    fn resolution_falls_back_to_daily_max() {
        let bundle = bundle_with_hours(&[]);
        let signal = HumiditySignal::resolve(&bundle, &daily(2, Some(58.0)), DaytimeWindow::default());
        assert_eq!(signal, HumiditySignal::DailyMax(58.0));
        assert!(signal.within(60.0));
        assert!(!signal.within(50.0));
    }

    #[test]
    fn missing_signal_is_permissive() {
        let bundle = bundle_with_hours(&[]);
        let signal = HumiditySignal::resolve(&bundle, &daily(2, None), DaytimeWindow::default());
        assert_eq!(signal, HumiditySignal::Missing);
        assert!(signal.within(0.0));
        assert_eq!(signal.value(), None);
    }
}

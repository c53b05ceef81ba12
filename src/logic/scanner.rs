use super::humidity::{DaytimeWindow, HumiditySignal};
use crate::models::{Crop, ForecastBundle};
use chrono::NaiveDate;

/// How many days ahead (including today) the scan covers at most.
pub const SCAN_HORIZON_DAYS: usize = 7;

/// Outcome of scanning the forecast horizon for a harvest day. Finding
/// nothing is a normal result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimalDay {
    Found(NaiveDate),
    NoneInHorizon,
}

impl std::fmt::Display for OptimalDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Long weekday, then day-first zero-padded date.
            OptimalDay::Found(date) => write!(f, "{}", date.format("%A, %d.%m.")),
            OptimalDay::NoneInHorizon => write!(f, "No optimal day in the next 7 days"),
        }
    }
}

/// Earliest day in the scan range on which the crop's full threshold set
/// holds; first match wins.
///
/// The temperature criterion uses the day's maximum. The humidity
/// criterion resolves through [`HumiditySignal`]: hourly daytime mean
/// when available, the daily maximum otherwise, and permissive when
/// neither exists. A `daily` series shorter than the horizon silently
/// shortens the scan.
pub fn find_next_optimal_day(
    crop: Crop,
    bundle: &ForecastBundle,
    window: DaytimeWindow,
    start_offset: usize,
) -> OptimalDay {
    let profile = crop.profile();
    let end = SCAN_HORIZON_DAYS.min(bundle.daily.len());

    for day in bundle.daily.iter().take(end).skip(start_offset) {
        let temp_ok = day.temp_max_c >= profile.optimal_temp_min
            && day.temp_max_c <= profile.optimal_temp_max;
        if !temp_ok {
            continue;
        }

        let signal = HumiditySignal::resolve(bundle, day, window);
        if signal.within(profile.optimal_humidity_max) {
            return OptimalDay::Found(day.date);
        }
    }

    OptimalDay::NoneInHorizon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyForecast, ForecastLocation, HourlySample};
    use chrono::Utc;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn daily(d: u32, temp_max: f64, rh_max: Option<f64>) -> DailyForecast {
        DailyForecast {
            date: date(d),
            temp_max_c: temp_max,
            temp_min_c: temp_max - 10.0,
            precipitation_sum_mm: 0.0,
            precipitation_prob_max: 0.0,
            relative_humidity_max: rh_max,
        }
    }

    fn bundle(daily: Vec<DailyForecast>, hourly: Vec<HourlySample>) -> ForecastBundle {
        ForecastBundle {
            fetched_at: Utc::now(),
            location: ForecastLocation {
                name: "Hamburg".into(),
                latitude: 53.55,
                longitude: 9.99,
            },
            daily,
            hourly,
        }
    }

    fn hour(d: u32, h: u32, rh: f64) -> HourlySample {
        HourlySample {
            timestamp: date(d).and_hms_opt(h, 0, 0).unwrap(),
            temperature_c: 20.0,
            precipitation_probability: 0.0,
            relative_humidity: rh,
        }
    }

    // Wheat: 22-26 °C, humidity ceiling 60 %.

    #[test]
    fn finds_earliest_qualifying_day() {
        // Only index 3 (Sep 4) is inside the band with acceptable humidity.
        let days = vec![
            daily(1, 30.0, Some(50.0)),
            daily(2, 20.0, Some(50.0)),
            daily(3, 24.0, Some(80.0)),
            daily(4, 24.0, Some(55.0)),
            daily(5, 24.0, Some(55.0)),
            daily(6, 18.0, Some(55.0)),
            daily(7, 18.0, Some(55.0)),
        ];
        let b = bundle(days, Vec::new());
        let result = find_next_optimal_day(Crop::Wheat, &b, DaytimeWindow::default(), 0);
        assert_eq!(result, OptimalDay::Found(date(4)));
        // 2025-09-04 is a Thursday; long weekday plus day-first date.
        assert_eq!(result.to_string(), "Thursday, 04.09.");
    }

    #[test]
    fn no_qualifying_day_yields_sentinel() {
        let days = (1..=7).map(|d| daily(d, 35.0, Some(90.0))).collect();
        let b = bundle(days, Vec::new());
        assert_eq!(
            find_next_optimal_day(Crop::Wheat, &b, DaytimeWindow::default(), 0),
            OptimalDay::NoneInHorizon
        );
    }

    #[test]
    fn hourly_mean_outranks_daily_max() {
        // Daily max says 80 % (over ceiling) but the daytime mean is 55 %.
        let days = vec![daily(1, 24.0, Some(80.0))];
        let hours = vec![hour(1, 10, 50.0), hour(1, 14, 60.0)];
        let b = bundle(days, hours);
        assert_eq!(
            find_next_optimal_day(Crop::Wheat, &b, DaytimeWindow::default(), 0),
            OptimalDay::Found(date(1))
        );
    }

    #[test]
    fn daily_max_fallback_applies_without_hourly_data() {
        let days = vec![daily(1, 24.0, Some(58.0))];
        let b = bundle(days, Vec::new());
        assert_eq!(
            find_next_optimal_day(Crop::Wheat, &b, DaytimeWindow::default(), 0),
            OptimalDay::Found(date(1))
        );
    }

    #[test]
    fn missing_humidity_data_never_blocks() {
        let days = vec![daily(1, 24.0, None)];
        let b = bundle(days, Vec::new());
        assert_eq!(
            find_next_optimal_day(Crop::Wheat, &b, DaytimeWindow::default(), 0),
            OptimalDay::Found(date(1))
        );
    }

    #[test]
    fn start_offset_skips_earlier_days() {
        let days = vec![daily(1, 24.0, Some(50.0)), daily(2, 24.0, Some(50.0))];
        let b = bundle(days, Vec::new());
        assert_eq!(
            find_next_optimal_day(Crop::Wheat, &b, DaytimeWindow::default(), 1),
            OptimalDay::Found(date(2))
        );
    }

    #[test]
    fn scan_never_leaves_the_seven_day_horizon() {
        // Qualifying day exists only at index 7, one past the horizon.
        let mut days: Vec<DailyForecast> = (1..=7).map(|d| daily(d, 35.0, Some(90.0))).collect();
        days.push(daily(8, 24.0, Some(50.0)));
        let b = bundle(days, Vec::new());
        assert_eq!(
            find_next_optimal_day(Crop::Wheat, &b, DaytimeWindow::default(), 0),
            OptimalDay::NoneInHorizon
        );
    }

    #[test]
    fn short_daily_series_shortens_the_scan() {
        let days = vec![daily(1, 35.0, Some(90.0)), daily(2, 35.0, Some(90.0))];
        let b = bundle(days, Vec::new());
        assert_eq!(
            find_next_optimal_day(Crop::Wheat, &b, DaytimeWindow::default(), 0),
            OptimalDay::NoneInHorizon
        );

        let empty = bundle(Vec::new(), Vec::new());
        assert_eq!(
            find_next_optimal_day(Crop::Wheat, &empty, DaytimeWindow::default(), 0),
            OptimalDay::NoneInHorizon
        );
    }
}

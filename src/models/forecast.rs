use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Combined daily + hourly forecast for one queried location.
///
/// Fetched once per user-initiated load and replaced wholesale on the
/// next load; the decision logic never mutates it. All timestamps are
/// local to the single timezone requested for the whole forecast, so a
/// calendar day is identified by plain date equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub fetched_at: DateTime<Utc>,
    pub location: ForecastLocation,
    /// Index 0 = today, ascending. At least 9 entries on a full fetch.
    pub daily: Vec<DailyForecast>,
    /// Contiguous, ascending. May be empty when the provider omits the
    /// hourly block; all consumers must degrade gracefully.
    pub hourly: Vec<HourlySample>,
}

impl ForecastBundle {
    pub fn day(&self, offset: usize) -> Option<&DailyForecast> {
        self.daily.get(offset)
    }

    pub fn today(&self) -> Option<&DailyForecast> {
        self.day(0)
    }

    pub fn tomorrow(&self) -> Option<&DailyForecast> {
        self.day(1)
    }

    /// Hourly samples falling on the given calendar day, original order.
    pub fn hours_on(&self, date: NaiveDate) -> impl Iterator<Item = &HourlySample> {
        self.hourly.iter().filter(move |s| s.timestamp.date() == date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Per-day aggregates as delivered by the forecast provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub precipitation_sum_mm: f64,
    pub precipitation_prob_max: f64,
    /// Not every provider response carries daily humidity.
    pub relative_humidity_max: Option<f64>,
}

/// One hourly sample in the forecast's local time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlySample {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub precipitation_probability: f64,
    pub relative_humidity: f64,
}

impl HourlySample {
    pub fn hour_of_day(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Zero-padded "HH:00" chart label.
    pub fn hour_label(&self) -> String {
        format!("{:02}:00", self.hour_of_day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(day: u32, hour: u32) -> HourlySample {
        HourlySample {
            timestamp: NaiveDate::from_ymd_opt(2025, 9, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            temperature_c: 20.0,
            precipitation_probability: 10.0,
            relative_humidity: 55.0,
        }
    }

    #[test]
    fn hours_on_filters_by_calendar_day() {
        let bundle = ForecastBundle {
            fetched_at: Utc::now(),
            location: ForecastLocation {
                name: "Hamburg".into(),
                latitude: 53.55,
                longitude: 9.99,
            },
            daily: Vec::new(),
            hourly: vec![sample(1, 23), sample(2, 0), sample(2, 12), sample(3, 0)],
        };

        let day = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
        let hours: Vec<u32> = bundle.hours_on(day).map(|s| s.hour_of_day()).collect();
        assert_eq!(hours, vec![0, 12]);
    }

    #[test]
    fn hour_labels_are_zero_padded() {
        assert_eq!(sample(1, 8).hour_label(), "08:00");
        assert_eq!(sample(1, 14).hour_label(), "14:00");
    }
}

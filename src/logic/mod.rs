pub mod humidity;
pub mod readiness;
pub mod scanner;
pub mod slicer;

pub use humidity::{mean_humidity, DaytimeWindow, HumiditySignal};
pub use readiness::evaluate;
pub use scanner::{find_next_optimal_day, OptimalDay, SCAN_HORIZON_DAYS};
pub use slicer::{slice_day, DaySeries};

use crate::models::{Crop, ForecastBundle, ReadinessStatus};

/// Everything a status card needs for one crop against one bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropAssessment {
    pub crop: Crop,
    pub status: ReadinessStatus,
    /// Today's humidity evidence, kept so the card can show "–" when
    /// nothing was available rather than a fabricated zero.
    pub today_humidity: HumiditySignal,
    pub next_optimal: OptimalDay,
}

/// Assess one crop against the bundle: today's status from the daily
/// maximum temperature and the resolved humidity signal, plus the next
/// recommended harvest day over the scan horizon.
///
/// With no daily data at all there is nothing to judge; that case is a
/// Problematic status with the no-day sentinel, not a fault.
pub fn assess(crop: Crop, bundle: &ForecastBundle, window: DaytimeWindow) -> CropAssessment {
    let profile = crop.profile();

    let (status, today_humidity) = match bundle.today() {
        Some(today) => {
            let signal = HumiditySignal::resolve(bundle, today, window);
            let status = match signal.value() {
                Some(humidity) => evaluate(today.temp_max_c, humidity, profile),
                // No humidity evidence: only the temperature criterion
                // can fail, mirroring the scanner's permissive default.
                None => evaluate(today.temp_max_c, profile.optimal_humidity_max, profile),
            };
            (status, signal)
        }
        None => (ReadinessStatus::Problematic, HumiditySignal::Missing),
    };

    CropAssessment {
        crop,
        status,
        today_humidity,
        next_optimal: find_next_optimal_day(crop, bundle, window, 0),
    }
}

pub fn assess_all(
    crops: &[Crop],
    bundle: &ForecastBundle,
    window: DaytimeWindow,
) -> Vec<CropAssessment> {
    crops
        .iter()
        .map(|crop| assess(*crop, bundle, window))
        .collect()
}

use crate::models::{CropProfile, ReadinessStatus};

/// Map observed conditions against a crop's thresholds.
///
/// Temperature counts as met inside the closed band, humidity when at or
/// under the ceiling. Both met is Ready, exactly one is Acceptable,
/// neither is Problematic. Total over numeric inputs; missing readings
/// are resolved by the caller before this point.
pub fn evaluate(
    observed_temp_c: f64,
    observed_humidity: f64,
    profile: &CropProfile,
) -> ReadinessStatus {
    let temp_ok =
        observed_temp_c >= profile.optimal_temp_min && observed_temp_c <= profile.optimal_temp_max;
    let humidity_ok = observed_humidity <= profile.optimal_humidity_max;

    match (temp_ok, humidity_ok) {
        (true, true) => ReadinessStatus::Ready,
        (true, false) | (false, true) => ReadinessStatus::Acceptable,
        (false, false) => ReadinessStatus::Problematic,
    }
}

use serde::{Deserialize, Serialize};

/// Agronomic thresholds for one crop. Temperature band is a closed
/// interval in Celsius; humidity is an inclusive upper bound in % RH.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub optimal_humidity_max: f64,
    pub optimal_temp_min: f64,
    pub optimal_temp_max: f64,
    pub advisory: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    Wheat,
    Maize,
    Rapeseed,
    Barley,
    Potatoes,
    SugarBeet,
    Sunflowers,
}

impl Crop {
    pub const ALL: [Crop; 7] = [
        Crop::Wheat,
        Crop::Maize,
        Crop::Rapeseed,
        Crop::Barley,
        Crop::Potatoes,
        Crop::SugarBeet,
        Crop::Sunflowers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Wheat => "Wheat",
            Crop::Maize => "Maize",
            Crop::Rapeseed => "Rapeseed",
            Crop::Barley => "Barley",
            Crop::Potatoes => "Potatoes",
            Crop::SugarBeet => "Sugar Beet",
            Crop::Sunflowers => "Sunflowers",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wheat" => Some(Crop::Wheat),
            "maize" | "corn" => Some(Crop::Maize),
            "rapeseed" | "canola" => Some(Crop::Rapeseed),
            "barley" => Some(Crop::Barley),
            "potatoes" | "potato" => Some(Crop::Potatoes),
            "sugarbeet" | "sugar beet" => Some(Crop::SugarBeet),
            "sunflowers" | "sunflower" => Some(Crop::Sunflowers),
            _ => None,
        }
    }

    /// Threshold set for this crop. Static master data, not user-editable.
    pub fn profile(&self) -> &'static CropProfile {
        match self {
            Crop::Wheat => &WHEAT,
            Crop::Maize => &MAIZE,
            Crop::Rapeseed => &RAPESEED,
            Crop::Barley => &BARLEY,
            Crop::Potatoes => &POTATOES,
            Crop::SugarBeet => &SUGAR_BEET,
            Crop::Sunflowers => &SUNFLOWERS,
        }
    }
}

const WHEAT: CropProfile = CropProfile {
    optimal_humidity_max: 60.0,
    optimal_temp_min: 22.0,
    optimal_temp_max: 26.0,
    advisory: "Keep grain moisture under 18 %, otherwise lodging and quality losses",
};

const MAIZE: CropProfile = CropProfile {
    optimal_humidity_max: 20.0,
    optimal_temp_min: 15.0,
    optimal_temp_max: 30.0,
    advisory: "Mold risk rises sharply with high air humidity",
};

const RAPESEED: CropProfile = CropProfile {
    optimal_humidity_max: 40.0,
    optimal_temp_min: 20.0,
    optimal_temp_max: 25.0,
    advisory: "Very sensitive; too damp means pre-harvest sprouting risk",
};

const BARLEY: CropProfile = CropProfile {
    optimal_humidity_max: 17.0,
    optimal_temp_min: 18.0,
    optimal_temp_max: 24.0,
    advisory: "Malting quality suffers at elevated moisture",
};

const POTATOES: CropProfile = CropProfile {
    optimal_humidity_max: 75.0,
    optimal_temp_min: 10.0,
    optimal_temp_max: 18.0,
    advisory: "Skin set matters; too hot raises rot risk",
};

const SUGAR_BEET: CropProfile = CropProfile {
    optimal_humidity_max: 80.0,
    optimal_temp_min: 8.0,
    optimal_temp_max: 15.0,
    advisory: "Harvest cool, otherwise storage losses",
};

const SUNFLOWERS: CropProfile = CropProfile {
    optimal_humidity_max: 15.0,
    optimal_temp_min: 22.0,
    optimal_temp_max: 28.0,
    advisory: "Oil quality drops with high seed moisture",
};

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tri-state harvest suitability. Computed per (crop, bundle) pair on
/// demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessStatus {
    Ready,
    Acceptable,
    Problematic,
}

impl ReadinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessStatus::Ready => "Ready to harvest",
            ReadinessStatus::Acceptable => "Acceptable",
            ReadinessStatus::Problematic => "Problematic",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            ReadinessStatus::Ready => Color::Green,
            ReadinessStatus::Acceptable => Color::Yellow,
            ReadinessStatus::Problematic => Color::Red,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ReadinessStatus::Ready => "●",
            ReadinessStatus::Acceptable => "◐",
            ReadinessStatus::Problematic => "○",
        }
    }
}

impl std::fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_thresholds_are_well_formed() {
        for crop in Crop::ALL {
            let p = crop.profile();
            assert!(
                p.optimal_temp_min <= p.optimal_temp_max,
                "{} has inverted temperature band",
                crop
            );
            assert!(
                (0.0..=100.0).contains(&p.optimal_humidity_max),
                "{} humidity ceiling out of range",
                crop
            );
            assert!(!p.advisory.is_empty());
        }
    }

    #[test]
    fn crop_from_str_round_trips() {
        for crop in Crop::ALL {
            assert_eq!(Crop::from_str(crop.as_str()), Some(crop));
        }
        assert_eq!(Crop::from_str("corn"), Some(Crop::Maize));
        assert_eq!(Crop::from_str("turnip"), None);
    }

    #[test]
    fn wheat_profile_matches_master_data() {
        let p = Crop::Wheat.profile();
        assert_eq!(p.optimal_temp_min, 22.0);
        assert_eq!(p.optimal_temp_max, 26.0);
        assert_eq!(p.optimal_humidity_max, 60.0);
    }
}

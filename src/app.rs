use crate::config::Config;
use crate::logic::{assess_all, CropAssessment, DaySeries, DaytimeWindow};
use crate::models::{Crop, CropSelection, ForecastBundle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Forecast,
    Week,
    Crops,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Forecast),
            '3' => Some(Screen::Week),
            '4' => Some(Screen::Crops),
            _ => None,
        }
    }
}

pub struct CropsState {
    pub selected_index: usize,
}

impl CropsState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn highlighted_crop(&self) -> Option<Crop> {
        Crop::ALL.get(self.selected_index).copied()
    }
}

/// Edit buffer for entering a new place name.
pub struct LocationInputState {
    pub editing: bool,
    pub buffer: String,
}

impl LocationInputState {
    pub fn new() -> Self {
        Self {
            editing: false,
            buffer: String::new(),
        }
    }

    pub fn start_editing(&mut self, current: &str) {
        self.editing = true;
        self.buffer = current.to_string();
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.buffer.clear();
    }

    pub fn finish_editing(&mut self) -> String {
        self.editing = false;
        std::mem::take(&mut self.buffer)
    }
}

/// All session state, threaded explicitly: there are no module-level
/// caches. A reload replaces the bundle wholesale and recomputes the
/// assessments from it.
pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,

    // Data
    pub location_query: String,
    pub bundle: Option<ForecastBundle>,
    pub assessments: Vec<CropAssessment>,
    pub selection: CropSelection,

    // Screen states
    pub crops_state: CropsState,
    pub location_input: LocationInputState,

    // UI state
    pub status_message: Option<String>,
    pub refreshing: bool,
    pub needs_refresh: bool,
}

impl App {
    pub fn new(config: Config, location: String) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            location_query: location,
            bundle: None,
            assessments: Vec::new(),
            selection: CropSelection::new(),
            crops_state: CropsState::new(),
            location_input: LocationInputState::new(),
            status_message: None,
            refreshing: false,
            needs_refresh: true,
        }
    }

    pub fn daytime_window(&self) -> DaytimeWindow {
        self.config.daytime.window()
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Loading weather data...");
    }

    /// Point the app at a new place and trigger a load. Until the load
    /// resolves, the previous bundle stays on screen.
    pub fn change_location(&mut self, place: String) {
        if !place.trim().is_empty() {
            self.location_query = place;
            self.request_refresh();
        }
    }

    pub fn update_bundle(&mut self, bundle: ForecastBundle) {
        self.bundle = Some(bundle);
        self.refresh_assessments();
    }

    pub fn refresh_assessments(&mut self) {
        match &self.bundle {
            Some(bundle) => {
                self.assessments =
                    assess_all(self.selection.selected(), bundle, self.daytime_window());
            }
            None => self.assessments.clear(),
        }
    }

    pub fn toggle_crop(&mut self, crop: Crop) {
        self.selection.toggle(crop);
        self.refresh_assessments();
    }

    pub fn cycle_selection_mode(&mut self) {
        self.selection.cycle_mode();
        self.refresh_assessments();
        let mode = self.selection.mode();
        self.set_status(&format!("Selection mode: {}", mode.as_str()));
    }

    /// Hourly chart series for today, empty when no data is loaded.
    pub fn today_series(&self) -> DaySeries {
        self.series_for_offset(0)
    }

    pub fn tomorrow_series(&self) -> DaySeries {
        self.series_for_offset(1)
    }

    fn series_for_offset(&self, offset: usize) -> DaySeries {
        self.bundle
            .as_ref()
            .and_then(|b| b.day(offset).map(|d| crate::logic::slice_day(b, d.date)))
            .unwrap_or_default()
    }
}

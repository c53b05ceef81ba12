use super::crop::Crop;

/// How the crop list behaves: everything at once, any subset, or
/// exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    All,
    Multiple,
    Single,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::All => "All crops",
            SelectionMode::Multiple => "Multiple",
            SelectionMode::Single => "Single",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SelectionMode::All => SelectionMode::Multiple,
            SelectionMode::Multiple => SelectionMode::Single,
            SelectionMode::Single => SelectionMode::All,
        }
    }
}

/// The set of crops currently chosen for evaluation. UI-session state,
/// owned by the app struct and passed explicitly to the decision logic.
#[derive(Debug, Clone)]
pub struct CropSelection {
    mode: SelectionMode,
    chosen: Vec<Crop>,
}

impl CropSelection {
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::All,
            chosen: Crop::ALL.to_vec(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch modes, re-normalizing the chosen set: `All` takes the whole
    /// registry, `Single` keeps at most the first choice (auto-picking the
    /// first crop when empty).
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        match mode {
            SelectionMode::All => self.chosen = Crop::ALL.to_vec(),
            SelectionMode::Single => {
                self.chosen.truncate(1);
                if self.chosen.is_empty() {
                    self.chosen.push(Crop::ALL[0]);
                }
            }
            SelectionMode::Multiple => {}
        }
    }

    pub fn cycle_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    pub fn contains(&self, crop: Crop) -> bool {
        self.chosen.contains(&crop)
    }

    /// Toggle a crop. No-op in `All` mode (checkboxes are locked there);
    /// in `Single` mode the new pick replaces the previous one.
    pub fn toggle(&mut self, crop: Crop) {
        match self.mode {
            SelectionMode::All => {}
            SelectionMode::Single => self.chosen = vec![crop],
            SelectionMode::Multiple => {
                if let Some(pos) = self.chosen.iter().position(|c| *c == crop) {
                    self.chosen.remove(pos);
                } else {
                    self.chosen.push(crop);
                }
            }
        }
    }

    pub fn selected(&self) -> &[Crop] {
        &self.chosen
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }
}

impl Default for CropSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_mode_selects_whole_registry() {
        let sel = CropSelection::new();
        assert_eq!(sel.selected().len(), Crop::ALL.len());
    }

    #[test]
    fn toggle_is_locked_in_all_mode() {
        let mut sel = CropSelection::new();
        sel.toggle(Crop::Wheat);
        assert_eq!(sel.selected().len(), Crop::ALL.len());
    }

    #[test]
    fn single_mode_enforces_exactly_one() {
        let mut sel = CropSelection::new();
        sel.set_mode(SelectionMode::Single);
        assert_eq!(sel.selected().len(), 1);

        sel.toggle(Crop::Barley);
        assert_eq!(sel.selected(), &[Crop::Barley]);

        sel.toggle(Crop::Potatoes);
        assert_eq!(sel.selected(), &[Crop::Potatoes]);
    }

    #[test]
    fn single_mode_auto_picks_when_empty() {
        let mut sel = CropSelection::new();
        sel.set_mode(SelectionMode::Multiple);
        for crop in Crop::ALL {
            if sel.contains(crop) {
                sel.toggle(crop);
            }
        }
        assert!(sel.is_empty());

        sel.set_mode(SelectionMode::Single);
        assert_eq!(sel.selected(), &[Crop::ALL[0]]);
    }

    #[test]
    fn multiple_mode_toggles_subsets() {
        let mut sel = CropSelection::new();
        sel.set_mode(SelectionMode::Multiple);
        let before = sel.selected().len();

        sel.toggle(Crop::Wheat);
        assert_eq!(sel.selected().len(), before - 1);
        sel.toggle(Crop::Wheat);
        assert_eq!(sel.selected().len(), before);
    }
}

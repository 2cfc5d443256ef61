use flash_core::model::Counters;

const NO_ACCURACY: &str = "\u{2014}";

/// Labels for the streak / best / accuracy strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudVm {
    pub streak: String,
    pub best: String,
    pub accuracy: String,
}

#[must_use]
pub fn map_hud(counters: &Counters) -> HudVm {
    let accuracy = counters
        .accuracy_percent()
        .map_or_else(|| NO_ACCURACY.to_string(), |pct| format!("{pct}%"));
    HudVm {
        streak: counters.streak().to_string(),
        best: counters.best().to_string(),
        accuracy,
    }
}

impl Default for HudVm {
    fn default() -> Self {
        map_hud(&Counters::default())
    }
}

//! Selectors and the enable/disable rules for every control.

use indexmap::IndexMap;

pub const SYMBOL_PLACEHOLDER: &str = "Select Symbol";
pub const TIMEFRAME_PLACEHOLDER: &str = "Select Timeframe";

/// A drop-down: a placeholder entry followed by `value -> label` options.
///
/// Choosing the placeholder means "nothing selected".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
    placeholder: &'static str,
    options: IndexMap<String, String>,
    selected: Option<String>,
}

impl SelectControl {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            options: IndexMap::new(),
            selected: None,
        }
    }

    /// Rebuilds the option list; the selection falls back to the placeholder.
    pub fn replace_options<I>(&mut self, options: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.options = options.into_iter().collect();
        self.selected = None;
    }

    /// Drops every option, leaving only the placeholder.
    pub fn clear(&mut self) {
        self.replace_options(std::iter::empty::<(String, String)>());
    }

    /// Selects `value` if it is one of the options. Returns whether it was.
    pub fn select(&mut self, value: &str) -> bool {
        if self.options.contains_key(value) {
            self.selected = Some(value.to_string());
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Label of the current choice, or the placeholder.
    pub fn display(&self) -> &str {
        self.selected
            .as_deref()
            .and_then(|v| self.options.get(v))
            .map(String::as_str)
            .unwrap_or(self.placeholder)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Moves to the next entry, wrapping through the placeholder.
    pub fn select_next(&mut self) {
        self.step(1);
    }

    /// Moves to the previous entry, wrapping through the placeholder.
    pub fn select_prev(&mut self) {
        self.step(self.options.len());
    }

    // Position 0 is the placeholder, option i sits at i + 1.
    fn step(&mut self, by: usize) {
        let slots = self.options.len() + 1;
        let current = self
            .selected
            .as_deref()
            .and_then(|v| self.options.get_index_of(v))
            .map_or(0, |i| i + 1);
        let next = (current + by) % slots;
        self.selected = match next {
            0 => None,
            i => self.options.get_index(i - 1).map(|(v, _)| v.clone()),
        };
    }
}

/// Enabled flags for every interactive control.
///
/// Always derived from scratch by [`ControlStates::derive`]; the only
/// targeted tweaks are the ones the backend's own replies imply (a loaded
/// symbol list enables its selector, a disconnect disables it) and the next
/// status tick overwrites those anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlStates {
    pub connect: bool,
    pub disconnect: bool,
    pub symbol_select: bool,
    pub timeframe_select: bool,
    pub start_recording: bool,
    pub stop_recording: bool,
}

impl ControlStates {
    pub fn derive(connected: bool, recording: bool, symbol_selected: bool) -> Self {
        let idle_and_connected = connected && !recording;
        Self {
            connect: !connected,
            disconnect: connected,
            symbol_select: idle_and_connected,
            timeframe_select: idle_and_connected,
            start_recording: idle_and_connected && symbol_selected,
            stop_recording: recording,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols() -> SelectControl {
        let mut s = SelectControl::new(SYMBOL_PLACEHOLDER);
        s.replace_options(["EURUSD", "GBPUSD"].map(|v| (v.to_string(), v.to_string())));
        s
    }

    #[test]
    fn every_combination_of_inputs() {
        for connected in [false, true] {
            for recording in [false, true] {
                for selected in [false, true] {
                    let c = ControlStates::derive(connected, recording, selected);
                    assert_eq!(c.connect, !connected);
                    assert_eq!(c.disconnect, connected);
                    assert_eq!(c.symbol_select, connected && !recording);
                    assert_eq!(c.timeframe_select, connected && !recording);
                    assert_eq!(c.start_recording, connected && !recording && selected);
                    assert_eq!(c.stop_recording, recording);
                }
            }
        }
    }

    #[test]
    fn derive_is_deterministic() {
        assert_eq!(
            ControlStates::derive(true, false, true),
            ControlStates::derive(true, false, true)
        );
    }

    #[test]
    fn replacing_options_resets_selection() {
        let mut s = symbols();
        assert!(s.select("GBPUSD"));
        s.replace_options([("USDJPY".to_string(), "USDJPY".to_string())]);
        assert_eq!(s.selected(), None);
        assert_eq!(s.display(), SYMBOL_PLACEHOLDER);
    }

    #[test]
    fn unknown_value_is_not_selected() {
        let mut s = symbols();
        assert!(!s.select("XAUUSD"));
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn cycling_wraps_through_placeholder() {
        let mut s = symbols();
        s.select_next();
        assert_eq!(s.selected(), Some("EURUSD"));
        s.select_next();
        assert_eq!(s.selected(), Some("GBPUSD"));
        s.select_next();
        assert_eq!(s.selected(), None);
        s.select_prev();
        assert_eq!(s.selected(), Some("GBPUSD"));
    }

    #[test]
    fn display_uses_label() {
        let mut s = SelectControl::new(TIMEFRAME_PLACEHOLDER);
        s.replace_options([("M1".to_string(), "1 Minute".to_string())]);
        s.select("M1");
        assert_eq!(s.display(), "1 Minute");
    }

    #[test]
    fn empty_selector_cycles_to_placeholder() {
        let mut s = SelectControl::new(SYMBOL_PLACEHOLDER);
        s.select_next();
        assert_eq!(s.selected(), None);
        assert!(s.is_empty());
    }
}

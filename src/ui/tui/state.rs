#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMode {
    Capture,
    HelpOverlay,
    FilterMenu {
        /// `(label, bpf expression)` pairs.
        options: Vec<(String, String)>,
        selected: usize,
    },
}

#[derive(Debug)]
pub struct UiState {
    pub mode: UiMode,
    /// Device being captured on, if live.
    pub device: Option<String>,
    pub active_filter: String,
    pub error_msg: Option<String>,
    pub info_msg: Option<String>,
}

impl UiState {
    pub fn new(device: Option<String>, active_filter: String) -> Self {
        UiState {
            mode: UiMode::Capture,
            device,
            active_filter,
            error_msg: None,
            info_msg: None,
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_msg = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_msg = None;
    }

    pub fn set_info(&mut self, msg: impl Into<String>) {
        self.info_msg = Some(msg.into());
        self.error_msg = None;
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            UiMode::HelpOverlay => UiMode::Capture,
            _ => UiMode::HelpOverlay,
        };
    }

    /// Moves the filter menu cursor, clamped to the option list.
    pub fn move_selection(&mut self, up: bool) {
        if let UiMode::FilterMenu { options, selected } = &mut self.mode {
            if up {
                *selected = selected.saturating_sub(1);
            } else if *selected + 1 < options.len() {
                *selected += 1;
            }
        }
    }

    /// The highlighted `(label, expression)` while the filter menu is open.
    pub fn selected_filter(&self) -> Option<(String, String)> {
        match &self.mode {
            UiMode::FilterMenu { options, selected } => options.get(*selected).cloned(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_state() -> UiState {
        let mut state = UiState::new(Some("eth0".into()), "udp port 53".into());
        state.mode = UiMode::FilterMenu {
            options: vec![
                ("a".into(), "udp port 53".into()),
                ("b".into(), "udp dst port 53".into()),
            ],
            selected: 0,
        };
        state
    }

    #[test]
    fn selection_is_clamped() {
        let mut state = menu_state();
        state.move_selection(true);
        assert_eq!(state.selected_filter().unwrap().0, "a");

        state.move_selection(false);
        state.move_selection(false);
        assert_eq!(state.selected_filter(), Some(("b".into(), "udp dst port 53".into())));
    }

    #[test]
    fn help_toggles_back_to_capture() {
        let mut state = UiState::new(None, String::new());
        state.toggle_help();
        assert_eq!(state.mode, UiMode::HelpOverlay);
        state.toggle_help();
        assert_eq!(state.mode, UiMode::Capture);
        assert_eq!(state.selected_filter(), None);
    }

    #[test]
    fn info_clears_error() {
        let mut state = UiState::new(None, String::new());
        state.set_error("bad filter");
        state.set_info("applied");
        assert!(state.error_msg.is_none());
        assert_eq!(state.info_msg.as_deref(), Some("applied"));
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action in the page viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    LineDown,
    LineUp,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    OpenInBrowser,
    Reload,
    None,
}

/// Handle a key event in the page viewer
pub fn handle_viewer_key(key: KeyEvent, pending_g: bool) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::LineDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::LineUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::LineDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::LineUp,

        // Half and full page scrolling
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::HalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::NONE) => Action::HalfPageUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::HalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::HalfPageUp,
        (KeyCode::PageDown, KeyModifiers::NONE) => Action::PageDown,
        (KeyCode::PageUp, KeyModifiers::NONE) => Action::PageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::PageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::PageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if pending_g {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::Home, KeyModifiers::NONE) => Action::JumpToTop,
        (KeyCode::End, KeyModifiers::NONE) => Action::JumpToBottom,

        // Page actions
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenInBrowser,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Reload,

        _ => Action::None,
    }
}

/// Input action in the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Quit,
    RowDown,
    RowUp,
    Activate,
    Decrease,
    Increase,
    None,
}

/// Handle a key event in the settings panel
pub fn handle_panel_key(key: KeyEvent) -> PanelAction {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => PanelAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => PanelAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => PanelAction::Quit,

        // Row navigation
        (KeyCode::Char('j'), KeyModifiers::NONE) => PanelAction::RowDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => PanelAction::RowUp,
        (KeyCode::Down, KeyModifiers::NONE) => PanelAction::RowDown,
        (KeyCode::Up, KeyModifiers::NONE) => PanelAction::RowUp,
        (KeyCode::Tab, KeyModifiers::NONE) => PanelAction::RowDown,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => PanelAction::RowUp,

        // Toggles and buttons
        (KeyCode::Char(' '), KeyModifiers::NONE) => PanelAction::Activate,
        (KeyCode::Enter, KeyModifiers::NONE) => PanelAction::Activate,

        // Slider steps
        (KeyCode::Char('h'), KeyModifiers::NONE) => PanelAction::Decrease,
        (KeyCode::Char('l'), KeyModifiers::NONE) => PanelAction::Increase,
        (KeyCode::Left, KeyModifiers::NONE) => PanelAction::Decrease,
        (KeyCode::Right, KeyModifiers::NONE) => PanelAction::Increase,

        _ => PanelAction::None,
    }
}

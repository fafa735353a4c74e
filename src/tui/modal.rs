// Modal overlays for the TUI
//
// Self-contained modal dialogs that handle their own input and return
// actions. App holds Option<Modal>; input routing acts on the returned
// ModalAction. The detail modal owns the selected record: it is the only
// place a selection lives, and dropping the modal drops the selection.

use crate::data::BattedBall;
use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Copy the displayed record (readable format)
    CopyReadable,
    /// Copy the displayed record (JSON)
    CopyJson,
}

/// Available modal types
#[derive(Debug, Clone)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Detail view for one batted-ball record, snapshotted at click time
    Detail(BattedBall),
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn detail(record: BattedBall) -> Self {
        Modal::Detail(record)
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Detail(_) => match key {
                KeyCode::Esc | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Char('y') => ModalAction::CopyReadable,
                KeyCode::Char('Y') => ModalAction::CopyJson,
                _ => ModalAction::None,
            },
        }
    }
}

use ratatui::prelude::Rect;

use flipdeck_lib::router::Route;
use flipdeck_lib::Screen;

use crate::app::CliApp;

/// Focusable parts of the register form, in Tab order
pub const REGISTER_FIELDS: [&str; 5] = [
    "Full name",
    "Email",
    "Password",
    "Confirm password",
    "Accept terms",
];
pub const LOGIN_FIELDS: [&str; 2] = ["Email", "Password"];
pub const TERMS_FIELD: usize = 4;

/// Where a list was drawn and how far it had scrolled, for mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHit {
    pub area: Rect,
    pub offset: usize,
}

impl ListHit {
    pub fn unscrolled(area: Rect) -> Self {
        Self { area, offset: 0 }
    }

    /// Index of the item under `(col, row)`, inside the list's borders
    pub fn item_at(&self, col: u16, row: u16) -> Option<usize> {
        let area = self.area;
        let inside = col > area.x
            && col + 1 < area.x + area.width
            && row > area.y
            && row + 1 < area.y + area.height;
        inside.then(|| self.offset + (row - area.y - 1) as usize)
    }
}

pub struct TuiState {
    pub cli: CliApp,

    /// Index of the focused element; 0 is the list on the dashboard and topic screens
    pub focus: usize,
    pub selected: usize,

    /// Route the focus/selection state belongs to
    mounted: Option<Route>,

    // Drawn list for mouse hit-testing (updated each draw)
    pub list_hit: Option<ListHit>,

    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    pub fn new(cli: CliApp) -> Self {
        let mounted = cli.app.route().cloned();
        Self {
            cli,
            focus: 0,
            selected: 0,
            mounted,
            list_hit: None,
            show_help: false,
            quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        self.cli.screen()
    }

    /// Number of focusable elements on the mounted screen
    pub fn focus_count(&self) -> usize {
        match self.screen() {
            Screen::Login(_) => LOGIN_FIELDS.len(),
            Screen::Register(_) => REGISTER_FIELDS.len(),
            Screen::Dashboard(_) => 2,
            Screen::Topic(_) => 3,
            Screen::Pending => 1,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.focus_count();
    }

    pub fn focus_prev(&mut self) {
        let count = self.focus_count();
        self.focus = (self.focus + count - 1) % count;
    }

    /// Whether keystrokes go into a text field
    pub fn is_text_input(&self) -> bool {
        match self.screen() {
            Screen::Login(_) => true,
            Screen::Register(_) => self.focus != TERMS_FIELD,
            Screen::Dashboard(_) | Screen::Topic(_) => self.focus > 0,
            Screen::Pending => false,
        }
    }

    /// The focused text field, if any
    pub fn field_mut(&mut self) -> Option<&mut String> {
        let focus = self.focus;
        match self.cli.screen_mut() {
            Screen::Login(s) => match focus {
                0 => Some(&mut s.email),
                _ => Some(&mut s.password),
            },
            Screen::Register(s) => match focus {
                0 => Some(&mut s.full_name),
                1 => Some(&mut s.email),
                2 => Some(&mut s.password),
                3 => Some(&mut s.confirm_password),
                _ => None,
            },
            Screen::Dashboard(s) if focus == 1 => Some(&mut s.new_topic),
            Screen::Topic(s) => match focus {
                1 => Some(&mut s.question),
                2 => Some(&mut s.answer),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn toggle_terms(&mut self) {
        if let Screen::Register(s) = self.cli.screen_mut() {
            s.accepted_terms = !s.accepted_terms;
        }
    }

    pub fn list_len(&self) -> usize {
        match self.screen() {
            Screen::Dashboard(s) => s.topics().len(),
            Screen::Topic(s) => s.cards().len(),
            _ => 0,
        }
    }

    pub fn move_down(&mut self) {
        let len = self.list_len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Reset focus when a different screen got mounted and keep the selection in range
    pub fn after_action(&mut self) {
        let route = self.cli.app.route().cloned();
        if route != self.mounted {
            self.mounted = route;
            self.focus = 0;
            self.selected = 0;
        }
        let len = self.list_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Enter: submit forms, open topics, flip cards
    pub fn activate(&mut self) {
        match self.screen() {
            Screen::Dashboard(_) if self.focus == 0 => {
                let index = self.selected;
                self.cli.open_topic(index);
            }
            Screen::Topic(_) if self.focus == 0 => self.flip_selected(),
            Screen::Pending => {}
            _ => self.cli.submit(),
        }
        self.after_action();
    }

    pub fn flip_selected(&mut self) {
        let index = self.selected;
        self.cli.app.flip(index);
    }

    pub fn back(&mut self) {
        self.cli.back();
        self.after_action();
    }

    pub fn sign_out(&mut self) {
        self.cli.sign_out();
        self.after_action();
    }

    pub fn reload(&mut self) {
        self.cli.reload();
        self.after_action();
    }

    /// Follow session changes made outside the current action
    pub fn tick(&mut self) {
        if self.cli.sync_session() {
            self.after_action();
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.cli.app.take_notice();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(offset: usize) -> ListHit {
        ListHit {
            area: Rect::new(2, 5, 20, 6),
            offset,
        }
    }

    #[test]
    fn test_item_at_skips_borders() {
        let list = hit(0);
        assert_eq!(list.item_at(5, 5), None);
        assert_eq!(list.item_at(5, 6), Some(0));
        assert_eq!(list.item_at(5, 9), Some(3));
        assert_eq!(list.item_at(5, 10), None);
        assert_eq!(list.item_at(2, 7), None);
        assert_eq!(list.item_at(21, 7), None);
    }

    #[test]
    fn test_item_at_adds_scroll_offset() {
        assert_eq!(hit(7).item_at(5, 6), Some(7));
        assert_eq!(hit(7).item_at(5, 9), Some(10));
    }
}

use ratatui::widgets::TableState;
use tracing::warn;

use crate::controller::RenderTarget;
use crate::options::OptionsMap;
use crate::prefs::{Preferences, Selection};
use crate::rank::RankedRow;

#[derive(Debug)]
pub enum Message {
    Quit,
    NextBrowser,
    PrevBrowser,
    NextOs,
    PrevOs,
    ToggleSort,
    NextRow,
    PrevRow,
    PageDown,
    PageUp,
    Activate,
    Refresh,
}

pub struct App {
    pub options: OptionsMap,
    pub browser_index: usize,
    pub os_index: usize,
    pub prefs: Preferences,
    pub rows: Vec<RankedRow>,
    pub loading: bool,
    pub selected_row: usize,
    pub table_state: TableState,
    pub status_message: Option<String>,
    /// Selection changed; the run loop owes the controller a refresh.
    needs_refresh: bool,
}

impl App {
    pub fn new(options: OptionsMap, prefs: Preferences) -> Self {
        let browser_index = options
            .browser
            .iter()
            .position(|b| *b == prefs.browser)
            .unwrap_or(0);
        let os_index = options.os.iter().position(|o| *o == prefs.os).unwrap_or(0);

        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            options,
            browser_index,
            os_index,
            prefs,
            rows: Vec::new(),
            loading: false,
            selected_row: 0,
            table_state,
            status_message: None,
            needs_refresh: true,
        }
    }

    pub fn browser(&self) -> &str {
        self.options
            .browser
            .get(self.browser_index)
            .map(String::as_str)
            .unwrap_or("Chrome")
    }

    pub fn os(&self) -> &str {
        self.options
            .os
            .get(self.os_index)
            .map(String::as_str)
            .unwrap_or("Windows")
    }

    /// Selection for the next refresh: the stored preferences with the
    /// browser/OS cursor (the view's source of truth) layered on top.
    pub fn selection(&self) -> Selection {
        let mut selection = self.prefs.selection();
        selection.browser = self.browser().to_string();
        selection.os = self.os().to_string();
        selection
    }

    pub fn take_needs_refresh(&mut self) -> bool {
        std::mem::take(&mut self.needs_refresh)
    }

    /// Returns false when the app should exit.
    pub fn update(&mut self, msg: Message) -> bool {
        self.status_message = None;
        match msg {
            Message::Quit => return false,
            Message::NextBrowser => {
                self.browser_index = (self.browser_index + 1) % self.options.browser.len().max(1);
                self.selection_changed();
            }
            Message::PrevBrowser => {
                let len = self.options.browser.len().max(1);
                self.browser_index = (self.browser_index + len - 1) % len;
                self.selection_changed();
            }
            Message::NextOs => {
                self.os_index = (self.os_index + 1) % self.options.os.len().max(1);
                self.selection_changed();
            }
            Message::PrevOs => {
                let len = self.options.os.len().max(1);
                self.os_index = (self.os_index + len - 1) % len;
                self.selection_changed();
            }
            Message::ToggleSort => {
                self.prefs.sort = self.prefs.sort.toggle();
                self.selection_changed();
            }
            Message::NextRow => {
                if self.selected_row < self.rows.len().saturating_sub(1) {
                    self.selected_row += 1;
                    self.table_state.select(Some(self.selected_row));
                }
            }
            Message::PrevRow => {
                if self.selected_row > 0 {
                    self.selected_row -= 1;
                    self.table_state.select(Some(self.selected_row));
                }
            }
            Message::PageDown => {
                let last = self.rows.len().saturating_sub(1);
                self.selected_row = (self.selected_row + 10).min(last);
                self.table_state.select(Some(self.selected_row));
            }
            Message::PageUp => {
                self.selected_row = self.selected_row.saturating_sub(10);
                self.table_state.select(Some(self.selected_row));
            }
            Message::Activate => self.activate_selected(),
            Message::Refresh => self.needs_refresh = true,
        }
        true
    }

    /// Persist the filter change and queue a refresh. A failed save keeps
    /// the in-memory selection working for this session.
    fn selection_changed(&mut self) {
        self.prefs.browser = self.browser().to_string();
        self.prefs.os = self.os().to_string();
        if let Err(err) = self.prefs.save() {
            warn!("failed to save preferences: {err}");
        }
        self.selected_row = 0;
        self.table_state.select(Some(0));
        self.needs_refresh = true;
    }

    /// Make the highlighted row the active agent and re-mark rows in place.
    fn activate_selected(&mut self) {
        let Some(ua) = self.rows.get(self.selected_row).map(|r| r.record.ua.clone()) else {
            return;
        };

        self.prefs.ua = ua.clone();
        match self.prefs.save() {
            Ok(()) => self.status_message = Some("Active agent updated".to_string()),
            Err(err) => self.status_message = Some(format!("Failed to save: {err}")),
        }

        for row in &mut self.rows {
            row.is_active = row.record.ua == ua;
        }
    }
}

impl RenderTarget for App {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn replace_rows(&mut self, rows: Vec<RankedRow>) {
        self.rows = rows;
        if self.selected_row >= self.rows.len() {
            self.selected_row = 0;
        }
        self.table_state.select(Some(self.selected_row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record;
    use crate::rank::{annotate, SortDirection};

    fn options() -> OptionsMap {
        OptionsMap {
            browser: vec!["Chrome".to_string(), "Firefox".to_string()],
            os: vec!["Windows".to_string(), "Mac OS".to_string()],
        }
    }

    fn app() -> App {
        App::new(options(), Preferences::default())
    }

    #[test]
    fn test_new_app_needs_initial_refresh() {
        let mut app = app();
        assert!(app.take_needs_refresh());
        assert!(!app.take_needs_refresh());
    }

    #[test]
    fn test_browser_cycle_wraps() {
        let mut app = app();
        let _ = app.take_needs_refresh();

        assert!(app.update(Message::NextBrowser));
        assert_eq!(app.browser(), "Firefox");
        assert!(app.take_needs_refresh());

        assert!(app.update(Message::NextBrowser));
        assert_eq!(app.browser(), "Chrome");
    }

    #[test]
    fn test_selection_reflects_cursor_and_stored_ua() {
        let mut app = App::new(
            options(),
            Preferences {
                ua: "UA-stored".to_string(),
                ..Preferences::default()
            },
        );
        app.update(Message::NextBrowser);
        app.update(Message::NextOs);

        let selection = app.selection();
        assert_eq!(selection.browser, "Firefox");
        assert_eq!(selection.os, "Mac OS");
        assert_eq!(selection.active_ua, "UA-stored");
    }

    #[test]
    fn test_sort_toggle() {
        let mut app = app();
        assert_eq!(app.prefs.sort, SortDirection::Descending);
        app.update(Message::ToggleSort);
        assert_eq!(app.prefs.sort, SortDirection::Ascending);
    }

    #[test]
    fn test_replace_rows_resets_out_of_range_selection() {
        let mut app = app();
        app.replace_rows(annotate(
            vec![record("1.0.0", "UA-a"), record("2.0.0", "UA-b")],
            "",
        ));
        app.selected_row = 1;

        app.replace_rows(annotate(vec![record("1.0.0", "UA-a")], ""));
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn test_row_navigation_bounds() {
        let mut app = app();
        app.replace_rows(annotate(vec![record("1.0.0", "UA-a")], ""));

        app.update(Message::PrevRow);
        assert_eq!(app.selected_row, 0);
        app.update(Message::NextRow);
        assert_eq!(app.selected_row, 0); // single row, no movement
    }

    #[test]
    fn test_quit_message_stops_app() {
        let mut app = app();
        assert!(!app.update(Message::Quit));
    }
}

use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use super::Action;
use bundlescope_search::{CompiledFilter, RecordStore, search};
use bundlescope_types::SearchHit;

/// Screen enumeration
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    RecordSelect,
    RecordView,
}

/// UI-specific transient state
pub struct UiState {
    /// Is search/filter bar active?
    pub search_active: bool,

    /// Current search input text
    pub search_input: String,

    /// Is help overlay visible?
    pub help_visible: bool,

    /// List state for the record selection screen
    pub list_state: ListState,

    /// Error message to display (if any)
    pub error_message: Option<String>,

    /// Scroll position in the record view
    pub scroll: usize,

    /// Currently active filter (None = browsing without a pattern)
    pub active_filter: Option<CompiledFilter>,

    /// Filter input error message (e.g., invalid regex)
    pub filter_error: Option<String>,

    /// Case insensitive search?
    pub filter_case_insensitive: bool,

    /// Hits for the current filter/selection, refreshed on change
    pub hits: Vec<SearchHit>,

    /// Whether the last search stopped at the hit cap
    pub hit_limit_reached: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            search_active: false,
            search_input: String::new(),
            help_visible: false,
            list_state: ListState::default(),
            error_message: None,
            scroll: 0,
            active_filter: None,
            filter_error: None,
            filter_case_insensitive: true,
            hits: Vec::new(),
            hit_limit_reached: false,
        }
    }
}

/// Global application state
pub struct AppState {
    /// Current screen being displayed
    pub current_screen: Screen,

    /// Navigation stack for back navigation
    pub screen_stack: Vec<Screen>,

    /// Number of records available for selection
    pub record_count: usize,

    /// Record scoped for viewing/searching, as (id, name); None = all records
    pub selected_record: Option<(String, String)>,

    /// Archives that failed to load, with diagnostics (shown once at startup)
    pub load_failures: Vec<String>,

    /// UI state
    pub ui_state: UiState,

    /// Whether app should quit
    pub should_quit: bool,

    /// Channel sender for async actions
    pub action_tx: mpsc::UnboundedSender<Action>,
}

impl AppState {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        let mut ui_state = UiState::default();
        ui_state.list_state.select(Some(0));

        Self {
            current_screen: Screen::RecordSelect,
            screen_stack: Vec::new(),
            record_count: 0,
            selected_record: None,
            load_failures: Vec::new(),
            ui_state,
            should_quit: false,
            action_tx,
        }
    }

    /// Navigate to a new screen, pushing current to stack
    pub fn navigate_to(&mut self, screen: Screen) {
        self.screen_stack.push(self.current_screen.clone());
        self.current_screen = screen;
        self.ui_state.scroll = 0;
    }

    /// Go back to previous screen
    pub fn go_back(&mut self) -> bool {
        if let Some(prev_screen) = self.screen_stack.pop() {
            self.current_screen = prev_screen;
            true
        } else {
            false
        }
    }

    /// Length of the record list, including the all-records row
    pub fn list_len(&self) -> usize {
        self.record_count + 1
    }

    /// Move selection up
    pub fn list_up(&mut self) {
        let len = self.list_len();
        let i = match self.ui_state.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.ui_state.list_state.select(Some(i));
    }

    /// Move selection down
    pub fn list_down(&mut self) {
        let len = self.list_len();
        let i = match self.ui_state.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.ui_state.list_state.select(Some(i));
    }

    /// Get currently selected index
    pub fn selected_index(&self) -> Option<usize> {
        self.ui_state.list_state.selected()
    }

    /// Show an error message
    pub fn show_error(&mut self, msg: String) {
        self.ui_state.error_message = Some(msg);
    }

    /// Dismiss the error message
    pub fn dismiss_error(&mut self) {
        self.ui_state.error_message = None;
    }

    /// Start search/filter input mode
    pub fn start_search(&mut self) {
        self.ui_state.search_active = true;
        self.ui_state.search_input.clear();
        self.ui_state.filter_error = None;
    }

    /// Cancel search/filter input and clear the filter
    pub fn cancel_search(&mut self) {
        self.ui_state.search_active = false;
        self.ui_state.search_input.clear();
        self.ui_state.active_filter = None;
        self.ui_state.filter_error = None;
    }

    /// Apply the current search input as a filter
    pub fn apply_filter(&mut self) {
        self.ui_state.search_active = false;
        self.ui_state.filter_error = None;

        if self.ui_state.search_input.is_empty() {
            self.ui_state.active_filter = None;
            return;
        }

        let result = if self.ui_state.filter_case_insensitive {
            CompiledFilter::new_case_insensitive(&self.ui_state.search_input)
        } else {
            CompiledFilter::new(&self.ui_state.search_input)
        };

        match result {
            Ok(filter) => {
                self.ui_state.active_filter = Some(filter);
            }
            Err(e) => {
                self.ui_state.filter_error = Some(format!("Invalid regex: {}", e));
                self.ui_state.search_active = true; // Keep input open to fix
            }
        }
    }

    /// Clear the active filter
    pub fn clear_filter(&mut self) {
        self.ui_state.active_filter = None;
        self.ui_state.search_input.clear();
        self.ui_state.filter_error = None;
    }

    /// Add a character to search input
    pub fn search_input_char(&mut self, c: char) {
        self.ui_state.search_input.push(c);
    }

    /// Remove last character from search input
    pub fn search_input_backspace(&mut self) {
        self.ui_state.search_input.pop();
    }

    /// Re-run the search against the store and cache the hits.
    ///
    /// With no active filter the scoped record's lines are listed (browse
    /// mode); with neither a filter nor a scope the hit list stays empty.
    pub fn refresh_hits(&mut self, store: &RecordStore, limit: usize) {
        let scope = self.selected_record.as_ref().map(|(id, _)| id.clone());

        let filter = match &self.ui_state.active_filter {
            Some(active) => active.clone().scoped_to(scope),
            None => CompiledFilter::empty().scoped_to(scope),
        };

        self.ui_state.hits = search(store, &filter, limit);
        self.ui_state.hit_limit_reached = self.ui_state.hits.len() >= limit;
        self.ui_state.scroll = self.ui_state.scroll.min(self.ui_state.hits.len());
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::app::Action;

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context for keybindings
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    ListNavigation,
    RecordView,
    FilterInput,
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Global bindings
        let mut global = HashMap::new();
        global.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        global.insert(KeyBinding::new(KeyCode::Esc), Action::GoBack);
        global.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('q')), Action::Quit);
        bindings.insert(KeyContext::Global, global);

        // Record list bindings
        let mut list_nav = HashMap::new();
        list_nav.insert(KeyBinding::new(KeyCode::Char('j')), Action::ListDown);
        list_nav.insert(KeyBinding::new(KeyCode::Down), Action::ListDown);
        list_nav.insert(KeyBinding::new(KeyCode::Char('k')), Action::ListUp);
        list_nav.insert(KeyBinding::new(KeyCode::Up), Action::ListUp);
        list_nav.insert(KeyBinding::new(KeyCode::Enter), Action::ListSelect);
        bindings.insert(KeyContext::ListNavigation, list_nav);

        // Record view bindings - less-like navigation
        let mut record_view = HashMap::new();
        record_view.insert(KeyBinding::new(KeyCode::Char('j')), Action::ScrollDown(1));
        record_view.insert(KeyBinding::new(KeyCode::Down), Action::ScrollDown(1));
        record_view.insert(KeyBinding::new(KeyCode::Char('k')), Action::ScrollUp(1));
        record_view.insert(KeyBinding::new(KeyCode::Up), Action::ScrollUp(1));
        record_view.insert(KeyBinding::ctrl(KeyCode::Char('f')), Action::PageDown);
        record_view.insert(KeyBinding::ctrl(KeyCode::Char('b')), Action::PageUp);
        record_view.insert(KeyBinding::ctrl(KeyCode::Char('d')), Action::PageDown);
        record_view.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::PageUp);
        record_view.insert(KeyBinding::new(KeyCode::PageDown), Action::PageDown);
        record_view.insert(KeyBinding::new(KeyCode::PageUp), Action::PageUp);
        record_view.insert(KeyBinding::new(KeyCode::Char('g')), Action::ScrollToTop);
        record_view.insert(KeyBinding::shift(KeyCode::Char('G')), Action::ScrollToBottom);
        record_view.insert(KeyBinding::new(KeyCode::Home), Action::ScrollToTop);
        record_view.insert(KeyBinding::new(KeyCode::End), Action::ScrollToBottom);
        record_view.insert(KeyBinding::new(KeyCode::Char('/')), Action::OpenSearch);
        record_view.insert(KeyBinding::new(KeyCode::Char('n')), Action::ClearFilter);
        record_view.insert(
            KeyBinding::new(KeyCode::Char('i')),
            Action::ToggleCaseSensitive,
        );
        record_view.insert(KeyBinding::new(KeyCode::Char('e')), Action::ExportHits);
        bindings.insert(KeyContext::RecordView, record_view);

        // Filter input bindings (when search bar is active)
        let mut filter_input = HashMap::new();
        filter_input.insert(KeyBinding::new(KeyCode::Enter), Action::ApplyFilter);
        filter_input.insert(KeyBinding::new(KeyCode::Esc), Action::CloseSearch);
        filter_input.insert(KeyBinding::new(KeyCode::Backspace), Action::SearchBackspace);
        filter_input.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::SearchClear);
        filter_input.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::CloseSearch);
        bindings.insert(KeyContext::FilterInput, filter_input);

        Self { bindings }
    }

    /// Look up action for key event in given context
    pub fn get_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        // First check context-specific bindings
        if let Some(context_bindings) = self.bindings.get(&context) {
            if let Some(action) = context_bindings.get(&binding) {
                return Some(action.clone());
            }
        }

        // Fall back to global bindings
        self.bindings
            .get(&KeyContext::Global)?
            .get(&binding)
            .cloned()
    }

    /// Handle key event in filter input mode
    /// Returns Some(Action) for special keys, None for regular character input
    pub fn get_filter_input_action(&self, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        // Check filter input bindings first
        if let Some(filter_bindings) = self.bindings.get(&KeyContext::FilterInput) {
            if let Some(action) = filter_bindings.get(&binding) {
                return Some(action.clone());
            }
        }

        // For regular characters, return SearchInput action
        if let KeyCode::Char(c) = key.code {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                return Some(Action::SearchInput(c));
            }
        }

        None
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

/// All possible actions in the application (command pattern)
#[derive(Clone, Debug)]
pub enum Action {
    // Navigation
    GoBack,
    Quit,

    // Record list
    ListUp,
    ListDown,
    ListSelect,

    // Search input
    OpenSearch,
    CloseSearch,
    SearchInput(char),
    SearchBackspace,
    SearchClear,
    ApplyFilter,
    ClearFilter,
    ToggleCaseSensitive,

    // Record view scrolling
    ScrollUp(usize),
    ScrollDown(usize),
    ScrollToTop,
    ScrollToBottom,
    PageUp,
    PageDown,

    // Export current hits to a file
    ExportHits,

    // UI toggles
    ToggleHelp,

    // Error handling
    ShowError(String),
    DismissError,

    // Tick (for periodic updates)
    Tick,

    // Render request
    Render,
}

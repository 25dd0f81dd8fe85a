use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;

use bundlescope_archive::extract_archive;
use bundlescope_search::{CompiledFilter, DEFAULT_HIT_LIMIT, RecordStore, search};
use bundlescope_tui::{
    Action, AppState, Event, EventHandler, HelpOverlay, KeyBindings, KeyContext,
    RecordSelectScreen, RecordViewScreen, Screen, Tui,
};

/// Bundlescope - a terminal UI for searching logs inside compressed archives
#[derive(Parser, Debug)]
#[command(name = "bundlescope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log archives to load (.tar.gz, .tgz or .gz)
    #[arg(value_name = "ARCHIVE", required = true)]
    archives: Vec<PathBuf>,

    /// Run one search over the loaded archives, print the hits, and exit
    #[arg(long, value_name = "PATTERN")]
    query: Option<String>,

    /// Maximum number of hits per search
    #[arg(long, default_value_t = DEFAULT_HIT_LIMIT)]
    limit: usize,

    /// Print --query hits as JSON, one object per line
    #[arg(long)]
    json: bool,

    /// Match case-sensitively in --query mode
    #[arg(long)]
    case_sensitive: bool,

    /// Directory where exported search results are written
    #[arg(long, value_name = "DIR", default_value = ".")]
    export_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run the application
    let result = run_app(args).await;

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

/// Load every archive concurrently, one blocking task per file.
///
/// Extraction calls are independent and side-effect-free, so one corrupt
/// archive never disturbs its siblings: successes land in the store in input
/// order, failures come back as per-archive diagnostics.
async fn load_archives(paths: &[PathBuf], store: &RecordStore) -> Vec<String> {
    let mut tasks = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.clone();
        tasks.push(tokio::task::spawn_blocking(move || {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let raw = match std::fs::read(&path) {
                Ok(raw) => raw,
                Err(e) => return Err(format!("{}: {}", path.display(), e)),
            };
            extract_archive(&raw, &name).map_err(|e| e.to_string())
        }));
    }

    let mut failures = Vec::new();
    for task in tasks {
        match task.await {
            Ok(Ok(records)) => store.extend(records),
            Ok(Err(message)) => {
                tracing::warn!(error = %message, "failed to load archive");
                failures.push(message);
            }
            Err(e) => failures.push(format!("extraction task failed: {}", e)),
        }
    }
    failures
}

async fn run_app(args: Args) -> Result<()> {
    let store = RecordStore::new();
    let failures = load_archives(&args.archives, &store).await;

    if store.is_empty() && !failures.is_empty() {
        anyhow::bail!("no archives could be loaded:\n  {}", failures.join("\n  "));
    }

    // Non-interactive mode: run the search once and print the hits
    if let Some(pattern) = &args.query {
        return run_query(&store, pattern, &args);
    }

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Initialize state
    let mut state = AppState::new(action_tx.clone());
    state.record_count = store.len();
    state.load_failures = failures;
    let failure_note = match state.load_failures.as_slice() {
        [] => None,
        [failure] => Some(failure.clone()),
        many => Some(format!("{} archives failed to load (see stderr)", many.len())),
    };
    if let Some(note) = failure_note {
        state.show_error(note);
    }

    // Initialize TUI
    let mut tui = Tui::new()?;

    // Initialize event handler
    let mut events = EventHandler::new(Duration::from_millis(100));

    // Initialize keybindings
    let keybindings = KeyBindings::new();

    // Initial render
    render(&mut tui, &mut state, &store)?;

    // Main event loop
    loop {
        tokio::select! {
            // Handle terminal events
            Some(event) = events.next() => {
                match event {
                    Event::Key(key) => {
                        // Check if we're in search input mode
                        if state.ui_state.search_active && state.current_screen == Screen::RecordView {
                            if let Some(action) = keybindings.get_filter_input_action(&key) {
                                let _ = action_tx.send(action);
                            }
                        } else {
                            let context = match state.current_screen {
                                Screen::RecordSelect => KeyContext::ListNavigation,
                                Screen::RecordView => KeyContext::RecordView,
                            };

                            if let Some(action) = keybindings.get_action(context, &key) {
                                let _ = action_tx.send(action);
                            }
                        }
                    }
                    Event::Tick => {}
                    Event::Resize(_, _) => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Error(e) => {
                        state.show_error(e);
                    }
                }
            }

            // Handle user actions
            Some(action) = action_rx.recv() => {
                handle_action(&mut state, &store, &args, action);
            }
        }

        if state.should_quit {
            break;
        }

        render(&mut tui, &mut state, &store)?;
    }

    // Cleanup
    events.shutdown();
    tui.restore()?;

    Ok(())
}

fn run_query(store: &RecordStore, pattern: &str, args: &Args) -> Result<()> {
    let filter = if args.case_sensitive {
        CompiledFilter::new(pattern)?
    } else {
        CompiledFilter::new_case_insensitive(pattern)?
    };

    let hits = search(store, &filter, args.limit);
    let mut stdout = std::io::stdout().lock();
    for hit in &hits {
        if args.json {
            writeln!(stdout, "{}", serde_json::to_string(hit)?)?;
        } else {
            writeln!(
                stdout,
                "{}:{}:{}",
                hit.record_name, hit.line_number, hit.line
            )?;
        }
    }

    Ok(())
}

fn handle_action(state: &mut AppState, store: &RecordStore, args: &Args, action: Action) {
    let limit = args.limit;
    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::GoBack => {
            if state.ui_state.help_visible {
                state.ui_state.help_visible = false;
                return;
            }
            if state.ui_state.error_message.is_some() {
                state.dismiss_error();
                return;
            }
            // Leaving the record view drops its filter state
            if state.current_screen == Screen::RecordView {
                state.cancel_search();
                state.selected_record = None;
            }
            if !state.go_back() {
                state.should_quit = true;
            }
        }

        Action::ListUp => {
            state.list_up();
        }
        Action::ListDown => {
            state.list_down();
        }
        Action::ListSelect => {
            if let Some(idx) = state.selected_index() {
                // Row 0 is the all-records aggregate
                state.selected_record = if idx == 0 {
                    None
                } else {
                    store.at(idx - 1).map(|r| (r.id, r.name))
                };
                state.clear_filter();
                state.navigate_to(Screen::RecordView);
                state.refresh_hits(store, limit);
            }
        }

        // Search input
        Action::OpenSearch => {
            state.start_search();
        }
        Action::CloseSearch => {
            state.cancel_search();
            state.refresh_hits(store, limit);
        }
        Action::SearchInput(c) => {
            state.search_input_char(c);
        }
        Action::SearchBackspace => {
            state.search_input_backspace();
        }
        Action::SearchClear => {
            state.ui_state.search_input.clear();
        }
        Action::ApplyFilter => {
            state.apply_filter();
            state.ui_state.scroll = 0;
            state.refresh_hits(store, limit);
        }
        Action::ClearFilter => {
            state.clear_filter();
            state.refresh_hits(store, limit);
        }
        Action::ToggleCaseSensitive => {
            state.ui_state.filter_case_insensitive = !state.ui_state.filter_case_insensitive;
            // Re-apply filter with new case sensitivity if active
            if state.ui_state.active_filter.is_some() {
                state.apply_filter();
                state.refresh_hits(store, limit);
            }
        }

        // Record view scrolling
        Action::ScrollUp(n) => {
            state.ui_state.scroll = state.ui_state.scroll.saturating_sub(n);
        }
        Action::ScrollDown(n) => {
            // Don't cap here - render clamps to the actual hit count
            state.ui_state.scroll = state.ui_state.scroll.saturating_add(n);
        }
        Action::PageUp => {
            state.ui_state.scroll = state.ui_state.scroll.saturating_sub(20);
        }
        Action::PageDown => {
            state.ui_state.scroll = state.ui_state.scroll.saturating_add(20);
        }
        Action::ScrollToTop => {
            state.ui_state.scroll = 0;
        }
        Action::ScrollToBottom => {
            // Render clamps to the actual bottom
            state.ui_state.scroll = usize::MAX;
        }

        Action::ExportHits => {
            let scope = state
                .selected_record
                .as_ref()
                .map(|(_, name)| name.replace('/', "_"))
                .unwrap_or_else(|| "all".to_string());
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            let path = args
                .export_dir
                .join(format!("bundlescope_{}_{}.log", scope, timestamp));

            match export_hits_to_file(&path, state) {
                Ok(count) => {
                    state.show_error(format!(
                        "Exported {} lines to {}",
                        count,
                        path.display()
                    ));
                }
                Err(e) => {
                    state.show_error(format!("Export failed: {}", e));
                }
            }
        }

        Action::ToggleHelp => {
            state.ui_state.help_visible = !state.ui_state.help_visible;
        }
        Action::ShowError(msg) => {
            state.show_error(msg);
        }
        Action::DismissError => {
            state.dismiss_error();
        }

        Action::Tick | Action::Render => {
            // No-op, the loop re-renders after every action
        }
    }
}

fn render(tui: &mut Tui, state: &mut AppState, store: &RecordStore) -> Result<()> {
    tui.terminal().draw(|frame| {
        match state.current_screen {
            Screen::RecordSelect => {
                RecordSelectScreen::render(frame, state, store);
            }
            Screen::RecordView => {
                RecordViewScreen::render(frame, state);
            }
        }

        // Render help overlay if visible
        if state.ui_state.help_visible {
            HelpOverlay::render(frame);
        }
    })?;

    Ok(())
}

fn export_hits_to_file(path: &Path, state: &AppState) -> Result<usize> {
    let mut file = File::create(path)?;

    for hit in &state.ui_state.hits {
        writeln!(
            file,
            "{}:{}: {}",
            hit.record_name, hit.line_number, hit.line
        )?;
    }

    Ok(state.ui_state.hits.len())
}

use std::{
    io::{self, Write},
    panic,
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::DisableMouseCapture,
    execute,
    style::ResetColor,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use tuirealm::{
    PollStrategy, Update,
    listener::EventListenerCfg,
    terminal::{CrosstermTerminalAdapter, TerminalBridge},
};

use finform::{
    catalog::CategoryCatalog,
    form::FormState,
    logging::{init_logging, print_log_location},
    settings::Settings,
    submit::SubmitConfig,
    theme::{Theme, ThemePreset},
    ui_realm::{application::TuiApplication, model::Model},
};

#[derive(Parser, Debug)]
#[command(
    name = "finform",
    about = "Terminal data-entry form for retirement and goal planning requests",
    version = env!("FINFORM_BUILD_VERSION"),
    author
)]
struct Cli {
    /// Submission endpoint, overriding the configured one.
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Number of goal rows to render.
    #[arg(long, value_name = "COUNT")]
    rows: Option<usize>,

    #[arg(long, value_name = "PRESET")]
    theme: Option<String>,

    /// Preview the submission payload instead of sending it.
    #[arg(long)]
    dry_run: bool,
}

static TERMINAL_RESTORED: AtomicBool = AtomicBool::new(false);

fn main() -> Result<()> {
    let log_path = match init_logging() {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!("warning: failed to initialize logging: {err}");
            None
        }
    };
    if let Some(path) = log_path.as_ref() {
        install_panic_hook_with_log(path.clone());
    }

    let result = run_app();
    if let Some(path) = log_path.as_ref() {
        print_log_location(path);
    }
    result
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load();
    settings.validate();

    let endpoint = cli.endpoint.unwrap_or_else(|| settings.endpoint.clone());
    let rows = cli.rows.unwrap_or(settings.goal_rows);
    let preset = resolve_theme(cli.theme.as_deref(), &settings.theme);
    let theme = Theme::from_preset(preset);

    let catalog = CategoryCatalog::new(settings.categories.clone());
    let form = FormState::new(catalog, rows);
    let submit_config = SubmitConfig {
        endpoint,
        request_timeout: Duration::from_millis(settings.request_timeout_ms),
        dry_run: cli.dry_run,
    };
    let mut model = Model::new(form, submit_config);

    let _guard = TerminalGuard;
    let mut terminal = setup_terminal()?;

    let listener_cfg = EventListenerCfg::default()
        .crossterm_input_listener(Duration::from_millis(20), 3)
        .poll_timeout(Duration::from_millis(10))
        .tick_interval(Duration::from_millis(500));
    let mut realm = TuiApplication::with_listener(theme, listener_cfg);
    realm
        .mount_all(&model)
        .context("failed to mount form components")?;

    let mut redraw = true;
    while !model.should_quit {
        if redraw {
            terminal
                .draw(|frame| realm.view_all(frame, &model))
                .context("failed to render frame")?;
            redraw = false;
        }

        let messages = realm
            .tick(PollStrategy::Once)
            .context("failed to process tui-realm tick")?;

        if !messages.is_empty() {
            redraw = true;
        }

        for message in messages {
            realm
                .handle_focus(&message)
                .context("failed to route section focus")?;
            let mut next = Some(message);
            while next.is_some() {
                next = model.update(next);
            }
        }

        realm
            .sync(&model)
            .context("failed to sync form state into the view")?;
    }

    let _ = terminal.disable_raw_mode();
    let _ = terminal.leave_alternate_screen();
    let _ = terminal.clear_screen();
    TERMINAL_RESTORED.store(true, Ordering::SeqCst);

    Ok(())
}

fn resolve_theme(cli_theme: Option<&str>, settings_theme: &str) -> ThemePreset {
    cli_theme
        .and_then(|value| ThemePreset::from_str(value).ok())
        .or_else(|| ThemePreset::from_str(settings_theme).ok())
        .unwrap_or_default()
}

fn setup_terminal() -> Result<TerminalBridge<CrosstermTerminalAdapter>> {
    TERMINAL_RESTORED.store(false, Ordering::SeqCst);

    let mut terminal =
        TerminalBridge::new_crossterm().context("failed to initialize terminal bridge")?;

    terminal
        .enable_raw_mode()
        .context("failed to enable raw mode")?;
    terminal
        .enter_alternate_screen()
        .context("failed to enter alternate screen")?;

    Ok(terminal)
}

fn install_panic_hook_with_log(log_path: std::path::PathBuf) {
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        eprintln!();
        eprintln!("═════════════════════════════════════════════════════════════════");
        eprintln!("  📁 Log file: {}", log_path.display());
        eprintln!("═════════════════════════════════════════════════════════════════");
        eprintln!();
        previous_hook(panic_info);
    }));
}

fn restore_terminal() -> Result<()> {
    if TERMINAL_RESTORED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let _ = disable_raw_mode();

    let mut stderr = io::stderr();
    let _ = execute!(
        stderr,
        LeaveAlternateScreen,
        DisableMouseCapture,
        Show,
        ResetColor
    );
    let _ = stderr.write_all(
        b"\x1b[?1049l\x1b[?1000l\x1b[?1002l\x1b[?1003l\x1b[?1004l\x1b[?1006l\x1b[?1015l\x1b[?2004l\x1b[?7h\x1b[?25h\x1b[0m\x1b[2J\x1b[H",
    );
    let _ = stderr.flush();

    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

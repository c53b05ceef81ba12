mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::ForecastService;
use error::{HarvestError, Result};
use logic::mean_humidity;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{CropsScreen, DashboardScreen, ForecastScreen, WeekScreen};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; -v raises the default filter
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Some(Commands::Init) => {
            let (_, path) = Config::setup_interactive()?;
            println!("Run `harvestcast` to start. Config: {}", path.display());
            return Ok(());
        }
        Some(Commands::Check) => {
            return run_check(cli.config).await;
        }
        None => {}
    }

    // Load configuration, offering first-run setup when none exists
    let config = if Config::exists(cli.config.as_ref()) {
        Config::load(cli.config)?
    } else {
        let (config, _) = Config::setup_interactive()?;
        config
    };

    let location = cli
        .location
        .unwrap_or_else(|| config.location.name.clone());

    let service = ForecastService::new(&config);
    let mut app = App::new(config, location);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_check(config_override: Option<std::path::PathBuf>) -> Result<()> {
    let config = Config::load(config_override)?;
    println!("Config OK (default location: {})", config.location.name);

    let service = ForecastService::new(&config);
    let status = service.check_connections().await;
    println!(
        "Geocoder (Nominatim): {}",
        if status.geocoder { "OK" } else { "OFFLINE" }
    );
    println!(
        "Forecast (Open-Meteo): {}",
        if status.forecast { "OK" } else { "OFFLINE" }
    );

    if status.geocoder && status.forecast {
        Ok(())
    } else {
        Err(HarvestError::DataSourceUnavailable(
            "one or more endpoints unreachable".into(),
        ))
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    service: &ForecastService,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let window = app.daytime_window();
                    let (today_hum, tomorrow_hum) = match &app.bundle {
                        Some(b) => (
                            b.today().and_then(|d| mean_humidity(b, d.date, window)),
                            b.tomorrow().and_then(|d| mean_humidity(b, d.date, window)),
                        ),
                        None => (None, None),
                    };
                    let input_buffer = app
                        .location_input
                        .editing
                        .then_some(app.location_input.buffer.as_str());
                    let screen = DashboardScreen::new(app.bundle.as_ref(), &app.location_query)
                        .with_humidity(today_hum, tomorrow_hum)
                        .editing_location(input_buffer)
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Forecast => {
                    let today = app.today_series();
                    let tomorrow = app.tomorrow_series();
                    f.render_widget(ForecastScreen::new(&today, &tomorrow), area);
                }
                Screen::Week => {
                    f.render_widget(WeekScreen::new(app.bundle.as_ref()), area);
                }
                Screen::Crops => {
                    let screen = CropsScreen::new(&app.assessments, &app.selection)
                        .with_selection(app.crops_state.selected_index);
                    f.render_widget(screen, area);
                }
            }
        })?;

        // Handle input with timeout for async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if app.location_input.editing {
                    handle_location_input(app, key.code);
                } else {
                    match key.code {
                        KeyCode::Char('q') => app.quit(),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.quit();
                        }
                        KeyCode::Esc => app.switch_screen(Screen::Dashboard),
                        KeyCode::Char('r') => app.request_refresh(),
                        KeyCode::Char('l') => {
                            let current = app.location_query.clone();
                            app.location_input.start_editing(&current);
                            app.switch_screen(Screen::Dashboard);
                        }
                        KeyCode::Char(c) => {
                            if let Some(screen) = Screen::from_key(c) {
                                app.switch_screen(screen);
                            } else {
                                handle_screen_input(app, key.code);
                            }
                        }
                        _ => handle_screen_input(app, key.code),
                    }
                }
            }
        }

        // Handle refresh request: the load runs to completion before the
        // decision logic ever sees the bundle, so it is complete or absent.
        if app.needs_refresh {
            app.needs_refresh = false;
            app.refreshing = true;
            match service.load(&app.location_query.clone()).await {
                Ok(bundle) => {
                    app.update_bundle(bundle);
                    app.set_status("Forecast loaded");
                }
                Err(HarvestError::LocationNotFound(place)) => {
                    // Previous results stay on screen.
                    app.set_status(&format!("Location not found: {}", place));
                }
                Err(e) => {
                    tracing::error!("Forecast load failed: {}", e);
                    app.set_status("Failed to load weather data");
                }
            }
            app.refreshing = false;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_location_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.location_input.cancel_editing(),
        KeyCode::Enter => {
            let place = app.location_input.finish_editing();
            app.change_location(place);
        }
        KeyCode::Backspace => {
            app.location_input.buffer.pop();
        }
        KeyCode::Char(c) => app.location_input.buffer.push(c),
        _ => {}
    }
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    if app.screen == Screen::Crops {
        match code {
            KeyCode::Up => app.crops_state.prev(),
            KeyCode::Down => app.crops_state.next(models::Crop::ALL.len()),
            KeyCode::Char(' ') => {
                if let Some(crop) = app.crops_state.highlighted_crop() {
                    app.toggle_crop(crop);
                }
            }
            KeyCode::Char('m') => app.cycle_selection_mode(),
            _ => {}
        }
    }
}

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::{info, warn};

use caninewatch::app::{App, AppOptions, View};
use caninewatch::data::fertility::{parse_heat_date, request_for};
use caninewatch::data::thresholds::classify;
use caninewatch::format::fertility::prediction_result_text;
use caninewatch::format::profile::{profile_loaded_text, profile_saved_text, profile_text};
use caninewatch::format::{
    breeds_or_default, export_document, format_timestamp, AlertsView, AssessmentView,
    CurrentSample, DashboardView, HistoryView,
};
use caninewatch::logging::{self, LogTarget};
use caninewatch::settings::{Settings, DEFAULT_CONFIG_FILE};
use caninewatch::source::FixtureFeed;
use caninewatch::{events, ui};
use caninewatch_client::SensorFeed;
use caninewatch_types::DogProfile;

#[derive(Parser, Debug)]
#[command(name = "caninewatch")]
#[command(about = "Terminal monitor for a dog's collar telemetry, alerts and fertility history")]
struct Args {
    /// Configuration file (TOML); missing is fine
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Backend base URL (e.g. "http://127.0.0.1:5000/api/")
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Serve data from a JSON fixture file instead of the backend
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Dashboard refresh interval (e.g., "10s", "500ms")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Name of the monitored dog
    #[arg(short, long)]
    dog: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive dashboard (default)
    Watch,
    /// Print the latest alerts
    Alerts {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Print the latest reading and backend status
    Status,
    /// Submit a health check; uses the latest reading unless both values are given
    Check {
        #[arg(short, long, requires = "activity")]
        temperature: Option<f64>,
        #[arg(short, long, requires = "temperature")]
        activity: Option<i32>,
    },
    /// Request a fertility prediction; missing fields come from the stored profile
    Predict {
        #[arg(long)]
        breed: Option<String>,
        /// Age in months
        #[arg(long)]
        age: Option<u32>,
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Date of the last heat (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        last_heat: Option<String>,
    },
    /// Print stored heat-cycle predictions
    History {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show or save the dog's profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// List breeds known to the backend
    Breeds,
    /// Export the latest reading, its local tier and the alerts to JSON
    Export { path: PathBuf },
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    Show,
    Save {
        #[arg(long)]
        breed: String,
        /// Age in months
        #[arg(long)]
        age: u32,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(&args.config)?;
    if let Some(url) = args.url {
        settings.base_url = url;
    }
    if let Some(refresh) = args.refresh {
        settings.home_refresh = refresh;
    }
    if let Some(dog) = args.dog {
        settings.dog_name = dog;
    }

    let feed: Arc<dyn SensorFeed> = match &args.file {
        Some(path) => Arc::new(FixtureFeed::new(path)),
        None => Arc::new(settings.http_feed()?),
    };

    let rt = tokio::runtime::Runtime::new()?;

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => {
            logging::init(LogTarget::File(&settings.log_file))?;
            let options = AppOptions::from_settings(&settings)?;
            let _guard = rt.enter();
            info!(feed = %feed.description(), "starting dashboard");
            run_tui(feed, options)
        }
        command => {
            logging::init(LogTarget::Stderr)?;
            rt.block_on(run_command(command, feed.as_ref(), &settings))
        }
    }
}

/// Run a one-shot command and print its result.
async fn run_command(command: Command, feed: &dyn SensorFeed, settings: &Settings) -> Result<()> {
    let dog_name = settings.dog_name.as_str();

    match command {
        Command::Watch => bail!("watch is interactive and cannot run as a one-shot command"),
        Command::Alerts { limit } => {
            let result = feed.fetch_alerts(limit.unwrap_or(settings.alerts_limit)).await;
            let view = AlertsView::from_result(&result);
            if let AlertsView::Failed(err) = view {
                return Err(err.into());
            }
            if let Some(summary) = view.summary() {
                println!("{}\n", summary);
            }
            print!("{}", view.text());
        }
        Command::Status => {
            match feed.api_health().await {
                Ok(health) => println!(
                    "Backend: {} (models loaded: {})",
                    health.status,
                    if health.models_loaded { "yes" } else { "no" }
                ),
                Err(err) => println!("Backend: Error: {}", err),
            }
            let readings = feed.fetch_latest_readings(1).await;
            let view = DashboardView::next(&DashboardView::loading(), &readings);
            readings?;
            print_dashboard(&view, dog_name);
        }
        Command::Check {
            temperature,
            activity,
        } => {
            let sample = match (temperature, activity) {
                (Some(temperature), Some(activity_percent)) => CurrentSample {
                    dog_name: dog_name.to_string(),
                    temperature,
                    activity_percent,
                },
                _ => {
                    let readings = feed.fetch_latest_readings(1).await?;
                    let Some(reading) = readings.first() else {
                        bail!("No sensor data available");
                    };
                    CurrentSample::from_reading(dog_name, reading)
                }
            };
            println!(
                "Checking {}: {}, activity {}\n",
                sample.dog_name,
                sample.temperature_text(),
                sample.activity_text()
            );
            let result = feed.submit_health_check(&sample.request()).await;
            print_assessment(&AssessmentView::from_result(&result));
            result?;
        }
        Command::Predict {
            breed,
            age,
            weight,
            last_heat,
        } => {
            let mut profile = match (&breed, age, weight) {
                (Some(breed), Some(age), Some(weight)) => {
                    DogProfile::new(dog_name, breed.as_str(), age, weight)
                }
                _ => {
                    let result = feed.fetch_profile(dog_name).await;
                    println!("{}", profile_loaded_text(&result));
                    result?
                }
            };
            if let Some(breed) = breed {
                profile.breed = breed;
            }
            if let Some(age) = age {
                profile.age_months = age;
            }
            if let Some(weight) = weight {
                profile.weight_kg = weight;
            }

            let last_heat = last_heat.as_deref().map(parse_heat_date).transpose()?;
            let today = chrono::Local::now().date_naive();
            let request = request_for(&profile, last_heat, today)?;
            let result = feed.submit_fertility_prediction(&request).await;
            println!("{}", prediction_result_text(&result));
            result?;
        }
        Command::History { limit } => {
            let result = feed
                .fetch_heat_cycles(dog_name, limit.unwrap_or(settings.heat_history_limit))
                .await;
            let view = HistoryView::from_result(&result);
            match &view {
                HistoryView::Rows(rows) => {
                    for row in rows {
                        println!(
                            "{}\n{}\n{}\n{}\n{}\n",
                            row.prediction_type,
                            row.value,
                            row.estimated_date,
                            row.fertility_status,
                            row.recorded
                        );
                    }
                }
                HistoryView::NoData { note } => {
                    println!("{}", view.message().unwrap_or_default());
                    if let Some(note) = note {
                        warn!(note = %note, "heat cycle storage reported a problem");
                    }
                }
                _ => {}
            }
            result?;
        }
        Command::Profile { action } => match action {
            ProfileAction::Show => {
                let result = feed.fetch_profile(dog_name).await;
                println!("{}", profile_loaded_text(&result));
                println!("{}", profile_text(&result?));
            }
            ProfileAction::Save { breed, age, weight } => {
                let profile = DogProfile::new(dog_name, breed, age, weight);
                let result = feed.save_profile(&profile).await;
                println!("{}", profile_saved_text(&result));
                println!("{}", profile_text(&result?));
            }
        },
        Command::Breeds => {
            for breed in breeds_or_default(feed).await {
                println!("{}", breed);
            }
        }
        Command::Export { path } => export_to_file(feed, settings, &path).await?,
    }

    Ok(())
}

fn print_dashboard(view: &DashboardView, dog_name: &str) {
    println!("Dog: {}", view.dog_name.as_deref().unwrap_or(dog_name));
    println!("Temperature: {}", view.temperature);
    println!("Activity: {}", view.activity);
    println!("Location: {}", view.location);
    if let Some(status) = &view.health_status {
        println!("Health: {}", status);
    }
    if let Some(tier) = view.tier {
        let flags: Vec<&str> = tier.flags().iter().map(|f| f.label()).collect();
        if flags.is_empty() {
            println!("Local tier: NORMAL");
        } else {
            println!(
                "Local tier: {} (urgency {})",
                flags.join(" + "),
                tier.urgency().label()
            );
        }
    }
    if let Some(updated) = &view.updated {
        println!("Updated: {}", format_timestamp(updated));
    }
    println!("{}", view.status);
}

fn print_assessment(view: &AssessmentView) {
    match view {
        AssessmentView::Pending => {}
        AssessmentView::Failed(text) => println!("{}", text),
        AssessmentView::Ready {
            status,
            severity,
            basis,
            findings,
            recommendations,
        } => {
            println!("{}", status);
            println!("{}", severity);
            if basis.is_local() {
                println!("Local estimate: {}", basis.severity().label());
            }
            for finding in findings {
                println!("• {}", finding);
            }
            println!("\n{}", recommendations);
        }
    }
}

/// Export the latest reading and alerts to a JSON file
async fn export_to_file(feed: &dyn SensorFeed, settings: &Settings, path: &Path) -> Result<()> {
    let readings = feed.fetch_latest_readings(1).await?;
    let alerts = match AlertsView::from_result(&feed.fetch_alerts(settings.alerts_limit).await) {
        AlertsView::Loaded { alerts, .. } => alerts,
        AlertsView::Failed(err) => {
            warn!(error = %err, "exporting without alerts");
            Vec::new()
        }
        _ => Vec::new(),
    };

    if let Some(reading) = readings.first() {
        let tier = classify(reading.temperature, reading.activity_percent);
        info!(urgency = %tier.urgency(), alerts = alerts.len(), "exporting");
    }

    let doc = export_document(readings.first(), &alerts);
    std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;

    println!("Exported monitoring state to: {}", path.display());
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(feed: Arc<dyn SensorFeed>, options: AppOptions) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(feed, options);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Where the "terminal too small" message goes; never outside `area`.
fn too_small_rect(area: ratatui::layout::Rect) -> ratatui::layout::Rect {
    let y = (area.height / 2).saturating_sub(2);
    let height = (area.height - y).min(5);
    ratatui::layout::Rect::new(area.x, area.y + y, area.width, height)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        app.update();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = too_small_rect(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(12),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Dashboard => ui::dashboard::render(frame, app, chunks[2]),
                View::Alerts => ui::alerts::render(frame, app, chunks[2]),
                View::Location => ui::location::render(frame, app, chunks[2]),
                View::Health => ui::health::render(frame, app, chunks[2]),
                View::History => ui::history::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

//! Employee Form - terminal form for employee records
//!
//! A Ratatui-based TUI that creates and edits employee records held by a
//! JSON REST service, validating every field as it is typed.

mod app;
mod config;
mod platform;
mod service;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use service::HttpEmployeeService;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Create and edit employee records
#[derive(Debug, Parser)]
#[command(name = "employee-form", version, about)]
struct Cli {
    /// Open the edit form for this employee id instead of the list
    #[arg(long)]
    id: Option<u64>,

    /// Base URL of the employee record service
    #[arg(long, env = "EMPLOYEE_SERVICE_URL")]
    service_url: Option<String>,

    /// Domain employee emails must belong to
    #[arg(long)]
    email_domain: Option<String>,

    /// Write the effective settings to the config file before starting
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line overrides on top of the config file
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = &self.service_url {
            config.service_url = Some(url.clone());
        }
        if let Some(domain) = &self.email_domain {
            config.email_domain = Some(domain.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "employee_form=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = cli.apply(AppConfig::load()?);
    if cli.save_config {
        config.save()?;
    }

    let service = HttpEmployeeService::new(config.service_url());
    tracing::info!(service_url = service.base_url(), "Starting employee form");
    let mut app = App::new(Arc::new(service), config.form_settings());
    match cli.id {
        Some(id) => app.open_edit_form(id),
        None => app.request_employees(),
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply records that arrived since the last frame
        app.poll_fetches();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                app.handle_key(key).await?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "employee-form",
            "--service-url",
            "http://records:8080",
            "--email-domain",
            "corp.io",
        ]);
        let config = cli.apply(AppConfig {
            service_url: Some("http://old".into()),
            name_max_length: Some(30),
            ..Default::default()
        });
        assert_eq!(config.service_url(), "http://records:8080");
        assert_eq!(config.form_settings().email_domain, "corp.io");
        assert_eq!(config.form_settings().name_max_length, 30);
    }

    #[test]
    fn test_cli_id_flag() {
        let cli = Cli::parse_from(["employee-form", "--id", "7"]);
        assert_eq!(cli.id, Some(7));
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

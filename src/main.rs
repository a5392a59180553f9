use anyhow::Result;
use clap::Parser;
use filter_toggle::app::{self, App};
use filter_toggle::app::controller::ToggleController;
use filter_toggle::app::sc::ScCommand;
use filter_toggle::config::Cli;
use filter_toggle::{elevation, logging};

fn main() -> Result<()> {
    let settings = Cli::parse().into_settings()?;
    logging::init()?;

    let elevated = elevation::is_elevated();
    tracing::info!(
        "service={} elevated={} policy={:?}",
        settings.service,
        elevated,
        settings.policy
    );

    let controller = ToggleController::new(ScCommand, settings.service, settings.policy);

    if settings.headless {
        app::check_once(&controller);
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let result = App::new(controller, elevated).run(&mut terminal);
    ratatui::restore();
    result
}

mod api;
mod app;
mod config;
mod model;
mod state;
mod style;
mod view;

use eframe::egui;

use api::client::ApiClient;
use app::Dekanat;
use config::Config;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = Config::load();
    if let Err(e) = Config::create_default() {
        log::warn!("could not write default config: {e}");
    }

    let client = match ApiClient::new(config.server_url(), config.timeout()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("cannot initialize http client: {e}");
            return Ok(());
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_title("Dekanat"),
        ..Default::default()
    };

    eframe::run_native(
        "Dekanat",
        options,
        Box::new(move |cc| Ok(Box::new(Dekanat::new(cc, config, client)))),
    )
}

use anyhow::Result;
use eframe::egui;

mod app;
mod config;
mod core;
mod messaging;
mod ui;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("starting MIDI radar");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "MIDI Radar",
        options,
        Box::new(|_cc| {
            let app = match app::RadarApp::new() {
                Ok(app) => app,
                Err(err) => {
                    log::error!("failed to create app: {err:#}");
                    std::process::exit(1);
                }
            };
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("application error: {err}"))
}

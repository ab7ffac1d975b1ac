use egui::Context;

/// Floating settings window over the trail: attached MIDI ports, a rescan
/// button, the last event seen, and the stats-overlay toggle.
/// Returns true when the user asked to rescan MIDI ports.
pub fn show(
    ctx: &Context,
    port_names: &[String],
    last_event: Option<&str>,
    show_stats: &mut bool,
) -> bool {
    let mut rescan = false;

    egui::Window::new("MIDI Radar")
        .default_open(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("MIDI inputs:");
            if port_names.is_empty() {
                ui.label("none attached");
            }
            for name in port_names {
                ui.label(format!("• {name}"));
            }

            if ui.button("Rescan ports").clicked() {
                rescan = true;
            }

            ui.separator();

            if let Some(event) = last_event {
                ui.label(format!("Last event: {event}"));
            } else {
                ui.label("No MIDI events received yet");
            }

            ui.checkbox(show_stats, "Show stats overlay");
        });

    rescan
}

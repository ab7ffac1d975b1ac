use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::config::{DisplayConfig, VizConfig};
use crate::core::midi::MidiBridge;
use crate::core::{HistoryBuffer, NoteStore};
use crate::messaging::{MessageBus, RadarMessage};
use crate::ui;
use crate::ui::stats::FrameStats;

// Main app state
pub struct RadarApp {
    viz: VizConfig,
    display: DisplayConfig,
    store: NoteStore,
    history: HistoryBuffer,
    message_bus: MessageBus,
    midi: MidiBridge,
    /// Monotonic frame counter; indexes the history ring and drives the
    /// rotation, never reset.
    frame: u64,
    highest_note_max: u8,
    last_event: Option<String>,
    app_settings: AppSettings,
}

impl eframe::App for RadarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // MIDI events queued since the last frame are applied to completion
        // before anything renders.
        self.drain_events();

        // The snapshot must hold pre-decay volumes, so it is taken first and
        // the decay pass runs only after the planning pass has read the
        // store.
        self.history.snapshot(self.frame, &self.store);

        let arcs = ui::radar::plan_frame(&self.viz, &self.history, &self.store, self.frame);

        let highest_note = self
            .store
            .decay_tick(self.viz.volume_decay_per_frame, self.viz.draw_volume_cutoff)
            .unwrap_or(0);
        if highest_note > self.highest_note_max {
            self.highest_note_max = highest_note;
            log::debug!("new highest note: {highest_note}");
        }

        let stats = FrameStats {
            objects_drawn: arcs.len(),
            highest_note,
        };

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let viewport = response.rect;

                crate::ui::radar::paint_frame(
                    &painter,
                    viewport.center(),
                    &self.viz,
                    &arcs,
                    self.frame,
                );

                if self.app_settings.show_stats {
                    crate::ui::stats::paint_stats(
                        &painter,
                        viewport,
                        self.display.stats_text_size,
                        &stats,
                    );
                }
            });

        let mut show_stats = self.app_settings.show_stats;
        let rescan = ui::settings_panel::show(
            ctx,
            self.midi.port_names(),
            self.last_event.as_deref(),
            &mut show_stats,
        );

        if show_stats != self.app_settings.show_stats {
            self.app_settings.show_stats = show_stats;
            if let Err(err) = self.save_app_settings() {
                log::warn!("failed to save settings: {err:#}");
            }
        }

        if rescan {
            match self.midi.connect_all() {
                Ok(count) => log::info!("rescan attached {count} MIDI input port(s)"),
                Err(err) => log::warn!("MIDI rescan failed: {err:#}"),
            }
        }

        self.frame += 1;

        ctx.request_repaint_after(Duration::from_secs_f32(1.0 / self.display.frame_rate));
    }
}

impl RadarApp {
    pub fn new() -> Result<Self> {
        let viz = VizConfig::default();
        let display = DisplayConfig::default();

        let message_bus = MessageBus::new();
        let mut midi = MidiBridge::new(message_bus.sender());

        // An absent device degrades to an empty trail; reported once, not
        // retried.
        match midi.connect_all() {
            Ok(0) => log::warn!("no MIDI input ports found; the trail will stay empty"),
            Ok(count) => log::info!("attached {count} MIDI input port(s)"),
            Err(err) => log::warn!("MIDI input unavailable: {err:#}"),
        }

        let app_settings = Self::load_app_settings().unwrap_or_default();
        let history = HistoryBuffer::new(viz.history_size);

        Ok(RadarApp {
            viz,
            display,
            store: NoteStore::new(),
            history,
            message_bus,
            midi,
            frame: 0,
            highest_note_max: 0,
            last_event: None,
            app_settings,
        })
    }

    /// Apply every queued MIDI event to the note store.
    fn drain_events(&mut self) {
        while let Ok(msg) = self.message_bus.try_receive() {
            match msg {
                RadarMessage::NoteOn(note, velocity) => {
                    log::debug!("note on: note={note} velocity={velocity}");
                    self.store.note_on(note, velocity);
                    self.last_event = Some(format!("note on {note} vel {velocity}"));
                }
                RadarMessage::NoteOff(note) => {
                    log::debug!("note off: note={note}");
                    self.store.note_off(note);
                    self.last_event = Some(format!("note off {note}"));
                }
                RadarMessage::ControlChange(controller, value) => {
                    // Control changes are surfaced for debugging only.
                    log::debug!("control change: controller={controller} value={value}");
                }
            }
        }
    }

    fn save_app_settings(&self) -> Result<()> {
        let settings_dir = Self::settings_dir()?;
        fs::create_dir_all(&settings_dir)?;

        let path = settings_dir.join("settings.json");
        let file = File::create(path)?;

        serde_json::to_writer_pretty(file, &self.app_settings)?;
        Ok(())
    }

    fn settings_dir() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        path.push("midi-radar");
        Ok(path)
    }

    fn load_app_settings() -> Result<AppSettings> {
        let path = Self::settings_dir()?.join("settings.json");
        if path.exists() {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(file)?)
        } else {
            Ok(AppSettings::default())
        }
    }
}

// App settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppSettings {
    show_stats: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { show_stats: true }
    }
}

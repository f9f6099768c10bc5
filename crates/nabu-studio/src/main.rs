//! Headless tour of the widget set.
//!
//! Builds a small control panel for a fixed number of frames against the
//! headless backend, scripting pointer input along the way, and logs what
//! every frame submitted. Run with `RUST_LOG=debug` for the per-frame detail.

use anyhow::{bail, Result};
use nabu_engine::input::Buttons;
use nabu_engine::logging::{init_logging, LoggingConfig};
use nabu_ui::prelude::*;

const FRAMES: u64 = 240;
const SCRIPTED: u64 = 60;

struct Panel {
    frame: u64,
    launches: u32,
    armed: bool,
    thrust: f32,
    gain: f32,
    trim: f32,
    callsign: String,
    accent: Color,
    split: f32,
    node_pos: Vec2,
    telemetry: Vec<f32>,
    expanded: bool,
    dropped: Option<u64>,
}

impl Panel {
    fn new() -> Self {
        Self {
            frame: 0,
            launches: 0,
            armed: false,
            thrust: 0.25,
            gain: 0.5,
            trim: 0.0,
            callsign: "nabu-1".to_string(),
            accent: Color::new(0.3, 0.6, 1.0, 1.0),
            split: 0.3,
            node_pos: Vec2::new(20.0, 20.0),
            telemetry: Vec::with_capacity(64),
            expanded: false,
            dropped: None,
        }
    }

    fn sidebar(&mut self, ui: &mut Ui<'_>) {
        ui.column().padding(8.0).gap(6.0);
        ui.text("SYSTEMS").color(Color::new(0.6, 0.6, 0.7, 1.0));
        if ui.button("Launch").size(120.0, 30.0).clicked() {
            self.launches += 1;
            log::info!("launch #{}", self.launches);
        }
        ui.toggle("Armed", &mut self.armed);
        ui.slider("Thrust", &mut self.thrust, 0.0, 1.0);
        ui.row().gap(8.0);
        ui.knob("Gain", &mut self.gain, 0.0, 1.0);
        ui.fader("Trim", &mut self.trim, -1.0, 1.0);
        ui.end();
        ui.text_input("Callsign", &mut self.callsign, 16).placeholder("callsign");
        if ui.tree_node("Diagnostics", &mut self.expanded).expanded() {
            ui.text("all nominal");
            ui.end();
        }
        ui.end();
    }

    fn workspace(&mut self, ui: &mut Ui<'_>) {
        ui.column().padding(8.0).gap(6.0).grow(1.0);
        ui.plot(&self.telemetry).height(80.0);
        ui.color_picker("Accent", &mut self.accent);
        ui.table("log", 200, 20.0, "EVENT LOG", log_row, self.launches as usize);

        ui.row().gap(8.0);
        ui.drag_source("crate", "cargo", 7).size(60.0, 40.0).bg(self.accent);
        ui.end();
        if let Some(v) = ui.drop_target("bay", "cargo").size(80.0, 40.0).bg(Color::new(0.2, 0.2, 0.25, 1.0)).dropped() {
            self.dropped = Some(v);
        }
        ui.end();
        ui.end();

        ui.canvas("graph").height(200.0);
        ui.graph_node("Source", &mut self.node_pos);
        ui.text("out");
        ui.end();
        ui.bezier().points(
            self.node_pos + Vec2::new(120.0, 30.0),
            self.node_pos + Vec2::new(180.0, 30.0),
            Vec2::new(220.0, 120.0),
            Vec2::new(280.0, 120.0),
        );
        ui.end();
        ui.end();
    }
}

fn log_row(ui: &mut Ui<'_>, row: usize, launches: usize) {
    let text = if row < launches { format!("{row:03}  launch") } else { format!("{row:03}  idle") };
    ui.text(&text);
}

impl App for Panel {
    fn build(&mut self, ui: &mut Ui<'_>) -> AppControl {
        self.frame += 1;
        let t = self.frame as f32 / 30.0;
        self.telemetry.push((t * 2.0).sin() * self.thrust);
        if self.telemetry.len() > 64 {
            self.telemetry.remove(0);
        }

        let mut control = AppControl::Continue;
        ui.menu_bar();
        if ui.menu("File").expanded() {
            ui.menu_item("New", "Ctrl+N");
            if ui.menu_item("Quit", "Ctrl+Q").clicked() {
                control = AppControl::Exit;
            }
            ui.end();
        }
        ui.end();

        ui.splitter(&mut self.split, false);
        ui.scroll(true);
        self.sidebar(ui);
        ui.end();
        self.workspace(ui);
        ui.end();
        control
    }

    fn on_report(&mut self, report: &FrameReport) {
        log::debug!(
            "frame {}: {} nodes, {} bytes, {} commands",
            report.frame_index,
            report.node_count,
            report.arena_used,
            report.command_count
        );
    }
}

/// Scripted pointer: hover the sidebar, click, then wander.
fn script(backend: &mut HeadlessBackend, frame: u64) {
    let pos = match frame {
        0..=9 => Vec2::new(40.0, 60.0),
        10..=19 => Vec2::new(60.0, 60.0),
        _ => Vec2::new(200.0 + (frame % 50) as f32 * 4.0, 300.0),
    };
    backend.move_pointer(pos);
    backend.set_buttons(Buttons { left: frame == 12, ..Buttons::default() });
    if frame == 40 {
        backend.scroll(Vec2::new(0.0, -3.0));
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut cx = Context::new(Config::default().with_strict(false));
    let mut backend = HeadlessBackend::new(Viewport::new(1024.0, 640.0)).with_max_frames(FRAMES);
    let mut panel = Panel::new();

    // Scripted warm-up, one frame at a time.
    let mut frames = 0;
    while frames < SCRIPTED && backend.is_running() {
        script(&mut backend, frames);
        let report = cx.run_frame(&mut backend, |ui| {
            panel.build(ui);
        })?;
        panel.on_report(&report);
        frames += 1;
    }
    // Then idle until the backend's frame budget runs out.
    frames += run(&mut cx, &mut backend, &mut panel)?;

    let submissions = backend.submissions();
    if submissions.iter().any(|s| !s.well_formed) {
        bail!("malformed draw list submitted");
    }
    let commands: usize = submissions.iter().map(|s| s.commands).sum();
    log::info!(
        "{frames} frames, {commands} commands total, {} launches, dropped {:?}",
        panel.launches,
        panel.dropped
    );
    Ok(())
}

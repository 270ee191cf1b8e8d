use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::egui;
use log::{error, info, warn};
use sketchbook::session::Session;
use sketchbook::{Color, HostConfig, MidiPad, Shape, SignalSource, SketchRegistry};

const PANEL_WIDTH: f32 = 240.0;
// Frames drawn per repaint at most; a longer stall drops the backlog.
const MAX_CATCH_UP: u32 = 4;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "sketchbook")]
#[command(about = "Generative sketches driven by a signal and note pads", long_about = None)]
struct Args {
    /// RON config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Sketch to start with (see --list)
    #[arg(long, value_name = "NAME")]
    sketch: Option<String>,

    /// Seed for the sketch random number generator
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Run without a window and print a summary
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode
    #[arg(long, value_name = "N", default_value_t = 600)]
    frames: u64,

    /// Print the available sketches and exit
    #[arg(long)]
    list: bool,
}

impl Args {
    fn load_config(&self) -> Result<HostConfig> {
        let mut config = match &self.config {
            Some(path) => HostConfig::load_from_file(path)?,
            None => HostConfig::default(),
        };
        if let Some(sketch) = &self.sketch {
            config.sketch = sketch.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn paint_shapes<'a>(painter: &egui::Painter, rect: egui::Rect, shapes: impl Iterator<Item = &'a Shape>) {
    let at = |p: cgmath::Vector2<f32>| rect.min + egui::vec2(p.x, p.y);
    for shape in shapes {
        match *shape {
            Shape::Background(color) => {
                painter.rect_filled(rect, 0.0, to_color32(color));
            }
            Shape::Ellipse {
                center,
                diameter,
                style,
            } => {
                let fill = style.fill.map_or(egui::Color32::TRANSPARENT, to_color32);
                let stroke = style
                    .stroke
                    .map_or(egui::Stroke::NONE, |c| egui::Stroke::new(style.stroke_weight, to_color32(c)));
                painter.circle(at(center), diameter.abs() / 2.0, fill, stroke);
            }
            Shape::Line { from, to, style } => {
                if let Some(color) = style.stroke {
                    painter.line_segment(
                        [at(from), at(to)],
                        egui::Stroke::new(style.stroke_weight, to_color32(color)),
                    );
                }
            }
        }
    }
}

struct SketchHost {
    session: Session,
    pads: Vec<MidiPad>,
    frame_rate: f32,
    trail_frames: usize,
    last_frame_time: Instant,
    accumulated_time: Duration,
    draw_time: Duration,
    last_error: Option<String>,
}

impl SketchHost {
    fn new(config: &HostConfig) -> Result<Self> {
        Ok(Self {
            session: Session::new(config)?,
            pads: config.pads.clone(),
            frame_rate: config.frame_rate.clamp(1.0, 240.0),
            trail_frames: config.trail_frames.max(1),
            last_frame_time: Instant::now(),
            accumulated_time: Duration::ZERO,
            draw_time: Duration::ZERO,
            last_error: None,
        })
    }

    /// Whole sketch frames owed for the wall time elapsed so far.
    fn due_frames(&mut self, frame_time: Duration) -> u32 {
        self.accumulated_time += frame_time;
        let step = Duration::from_secs_f32(1.0 / self.frame_rate);
        let mut frames = 0;
        while self.accumulated_time >= step && frames < MAX_CATCH_UP {
            self.accumulated_time -= step;
            frames += 1;
        }
        if frames == MAX_CATCH_UP {
            self.accumulated_time = Duration::ZERO;
        }
        frames
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            if let Some(pad) = self.pads.first() {
                self.session.queue_note(pad.note, pad.velocity);
            }
        }
    }

    fn render_ui_panel(&mut self, ui: &mut egui::Ui, frame_time: f32, draw_time: f64) {
        ui.label(format!("FPS: {:.3}", 1.0 / frame_time.max(f32::EPSILON)));
        ui.label(format!("Frame Time: {:.3}ms", frame_time * 1000.0));
        ui.label(format!("Draw Time: {:.3}ms", draw_time * 1000.0));
        ui.separator();

        let mut selected = self.session.active().to_owned();
        egui::ComboBox::from_label("Sketch")
            .selected_text(selected.clone())
            .show_ui(ui, |ui| {
                for name in self.session.names() {
                    ui.selectable_value(&mut selected, name.to_owned(), name);
                }
            });
        if selected != self.session.active() {
            if let Err(e) = self.session.select(&selected) {
                self.last_error = Some(format!("{e:#}"));
            }
        }
        if ui.button("Restart").clicked() {
            self.session.restart();
        }
        ui.label(format!("Entities: {}", self.session.entity_count()));
        ui.label(format!("Frame: {}", self.session.frame_index()));
        ui.separator();

        ui.heading("Signal");
        let mut signal = self.session.signal();
        ui.horizontal(|ui| {
            let last = self.session.last_signal();
            if ui.radio(matches!(signal, SignalSource::Constant(_)), "Manual").clicked() {
                signal = SignalSource::Constant(last);
            }
            if ui.radio(matches!(signal, SignalSource::Sine { .. }), "Sine").clicked() {
                signal = SignalSource::default();
            }
            if ui
                .radio(matches!(signal, SignalSource::Alternating { .. }), "Alternating")
                .clicked()
            {
                signal = SignalSource::Alternating { low: 0.0, high: 10.0 };
            }
        });
        match &mut signal {
            SignalSource::Constant(value) => {
                ui.add(egui::Slider::new(value, -10.0..=100.0).text("Level"));
            }
            SignalSource::Sine {
                amplitude,
                period_frames,
            } => {
                ui.add(egui::Slider::new(amplitude, 0.0..=100.0).text("Amplitude"));
                ui.add(egui::Slider::new(period_frames, 1.0..=2_000.0).text("Period"));
            }
            SignalSource::Alternating { low, high } => {
                ui.add(egui::Slider::new(low, -10.0..=100.0).text("Low"));
                ui.add(egui::Slider::new(high, -10.0..=100.0).text("High"));
            }
        }
        self.session.set_signal(signal);
        ui.label(format!("Current: {:.2} ({})", self.session.last_signal(), signal.label()));
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Frame Rate: ");
            ui.add(egui::Slider::new(&mut self.frame_rate, 1.0..=240.0));
        });
        ui.horizontal(|ui| {
            ui.label("Trail Frames: ");
            if ui
                .add(egui::Slider::new(&mut self.trail_frames, 1..=600))
                .changed()
            {
                self.session.set_trail_frames(self.trail_frames);
            }
        });
        ui.separator();

        ui.heading("Notes");
        ui.horizontal_wrapped(|ui| {
            for pad in &self.pads {
                if ui
                    .button(pad.label.as_str())
                    .on_hover_text(format!("note {} velocity {}", pad.note, pad.velocity))
                    .clicked()
                {
                    self.session.queue_note(pad.note, pad.velocity);
                }
            }
        });

        if let Some(e) = &self.last_error {
            ui.separator();
            ui.colored_label(egui::Color32::RED, e.as_str());
        }
    }
}

impl eframe::App for SketchHost {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let current_time = Instant::now();
        let frame_time = current_time.duration_since(self.last_frame_time);
        self.last_frame_time = current_time;
        let due = self.due_frames(frame_time);

        self.handle_keys(ctx);

        let draw_time = self.draw_time.as_secs_f64();
        egui::SidePanel::left("Control Panel")
            .exact_width(PANEL_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_ui_panel(ui, frame_time.as_secs_f32(), draw_time);
                    ui.allocate_space(ui.available_size());
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                if let Some(pos) = response.hover_pos() {
                    let local = pos - rect.min;
                    self.session.pointer = cgmath::vec2(local.x, local.y);
                }
                self.session.pointer_down = response.is_pointer_button_down_on();

                let start = Instant::now();
                if let Err(e) = self.session.step(rect.width(), rect.height(), due) {
                    error!("{e:#}");
                    self.last_error = Some(format!("{e:#}"));
                }
                self.draw_time = start.elapsed();

                paint_shapes(&ui.painter_at(rect), rect, self.session.canvas().shapes());
            });

        ctx.request_repaint();
    }
}

fn run_headless(config: &HostConfig, frames: u64) -> Result<()> {
    let mut session = Session::new(config)?;
    let (width, height) = (config.window.width, config.window.height);
    session.step(width, height, 0)?;
    for n in 1..=frames {
        session.step(width, height, 1)?;
        if n % 60 == 0 {
            info!(
                "{}: frame {n}, signal {:.2}, {} entities, {} shapes retained",
                session.active(),
                session.last_signal(),
                session.entity_count(),
                session.canvas().shape_count()
            );
        }
    }
    println!(
        "{}: {} frames on {width}x{height}, {} entities, {} shapes retained over {} frames",
        session.active(),
        session.frame_index(),
        session.entity_count(),
        session.canvas().shape_count(),
        session.canvas().retained_frames()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for name in SketchRegistry::builtin().names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = args.load_config()?;
    for warning in config.validate() {
        warn!("config: {warning}");
    }

    if args.headless {
        return run_headless(&config, args.frames);
    }

    info!("starting '{}' at {} fps", config.sketch, config.frame_rate);
    let host = SketchHost::new(&config)?;
    let options = eframe::NativeOptions {
        renderer: eframe::Renderer::Wgpu,
        initial_window_size: Some(egui::vec2(
            config.window.width + PANEL_WIDTH,
            config.window.height,
        )),
        ..Default::default()
    };
    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |_cc| Box::new(host)),
    )
    .map_err(|e| anyhow!("window closed with an error: {e}"))
}

//! Interactive forest growth control panel built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! (forest, current environment, text log) and implements [`eframe::App`]
//! to drive the core through its two commands, grow and reset, and to
//! chart every tree's height history.

use eframe::App;
use forest_core::{Environment, EnvironmentBounds, Forest};
use glam::Vec2;
use tracing::error;

/// Oldest log lines are dropped past this many.
const MAX_LOG_LINES: usize = 500;

/// Line colors, cycled in forest order.
const PALETTE: [egui::Color32; 6] = [
    egui::Color32::from_rgb(139, 90, 43),
    egui::Color32::from_rgb(34, 139, 34),
    egui::Color32::from_rgb(200, 200, 200),
    egui::Color32::from_rgb(220, 80, 30),
    egui::Color32::from_rgb(220, 60, 120),
    egui::Color32::from_rgb(70, 130, 220),
];

/// Maps chart data `(period, height)` into a screen rectangle.
///
/// The x-axis spans `[0, x_max]` periods; the y-axis spans
/// `[y_min, y_max]` meters with positive heights going up.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ChartView {
    x_max: f32,
    y_min: f32,
    y_max: f32,
}

impl ChartView {
    /// Fits the axes to the current forest with 10% headroom.
    fn fit(forest: &Forest) -> Self {
        let lowest = forest
            .trees()
            .iter()
            .flat_map(|t| t.history().iter().copied())
            .fold(0.0, f64::min);
        let highest = forest.max_height();
        let span = (highest - lowest).max(1.0);
        Self {
            x_max: forest.period().max(1) as f32,
            y_min: lowest as f32,
            y_max: (lowest + span * 1.1) as f32,
        }
    }

    fn to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let t = Vec2::new(p.x / self.x_max, (p.y - self.y_min) / (self.y_max - self.y_min));
        egui::pos2(
            rect.left() + t.x * rect.width(),
            rect.bottom() - t.y * rect.height(),
        )
    }

    fn from_screen(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let tx = (p.x - rect.left()) / rect.width();
        let ty = (rect.bottom() - p.y) / rect.height();
        Vec2::new(
            tx * self.x_max,
            self.y_min + ty * (self.y_max - self.y_min),
        )
    }
}

/// Main application state for the control panel.
///
/// The per-frame update is:
/// 1. Sliders edit `environment` in place; nothing is recomputed.
/// 2. "Grow" calls [`Viewer::grow`], "Reset" calls [`Viewer::reset`].
/// 3. The log and the chart are redrawn from the forest.
pub struct Viewer {
    forest: Forest,
    environment: Environment,
    bounds: EnvironmentBounds,

    rng: rand::rngs::ThreadRng,

    log: Vec<String>,
}

impl Viewer {
    pub fn new(forest: Forest, environment: Environment) -> Self {
        Self {
            forest,
            environment,
            bounds: EnvironmentBounds::SLIDERS,
            rng: rand::rng(),
            log: Vec::with_capacity(64),
        }
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    /// Advances every tree by one period with the current slider values.
    fn grow(&mut self) {
        match self.forest.advance_all(&self.environment) {
            Ok(report) => {
                let e = report.environment;
                self.push_log(format!(
                    "Period {}: T={:.1} °C, H={:.1} %, L={:.0} lux, S={:.1}, P={:.1} mm; total {:.2} m",
                    report.period,
                    e.temperature,
                    e.humidity,
                    e.light,
                    e.soil_quality,
                    e.precipitation,
                    report.total_growth()
                ));
                for record in &report.records {
                    self.push_log(record.to_string());
                }
                self.push_log(String::new());
            }
            Err(err) => {
                error!(%err, "grow failed");
                self.push_log(format!("Error: {err}"));
            }
        }
    }

    /// Returns every tree to its initial state. The environment is kept.
    fn reset(&mut self) {
        self.forest.reset_all();
        self.push_log("Simulation reset.".to_owned());
        self.push_log(String::new());
    }

    /// Draws new readings uniformly inside the slider ranges.
    fn randomize(&mut self) {
        self.environment = Environment::random_within(&self.bounds, &mut self.rng);
    }

    /// Builds the left-hand control panel: sliders, buttons, species list.
    fn ui_control_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Environment");
                ui.separator();

                let b = self.bounds;
                let env = &mut self.environment;
                let sliders: [(&str, &mut f64, (f64, f64)); 5] = [
                    ("Temperature (°C)", &mut env.temperature, b.temperature),
                    ("Humidity (%)", &mut env.humidity, b.humidity),
                    ("Light (lux)", &mut env.light, b.light),
                    ("Soil quality (0-100)", &mut env.soil_quality, b.soil_quality),
                    ("Precipitation (mm)", &mut env.precipitation, b.precipitation),
                ];
                for (label, value, (lo, hi)) in sliders {
                    ui.label(label);
                    ui.add(egui::Slider::new(value, lo..=hi));
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Grow trees").clicked() {
                        self.grow();
                    }
                    if ui.button("Reset").clicked() {
                        self.reset();
                    }
                    if ui.button("Randomize").clicked() {
                        self.randomize();
                    }
                });

                ui.separator();
                ui.collapsing("Species", |ui| {
                    for tree in self.forest.trees() {
                        let p = tree.profile();
                        let strategies: Vec<String> =
                            p.strategies.iter().map(ToString::to_string).collect();
                        ui.label(format!(
                            "{} ({:.2} m) - {}",
                            p.name,
                            tree.height(),
                            strategies.join(", ")
                        ));
                        if !p.characteristics.is_empty() {
                            ui.small(&p.characteristics);
                        }
                    }
                });
            });
    }

    /// Builds the bottom log panel with the text of every period report.
    fn ui_log_panel(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| {
                ui.label(format!("period = {}", self.forest.period()));
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.log {
                            ui.monospace(line);
                        }
                    });
            });
    }

    /// Builds the central height chart.
    fn ui_chart(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect.shrink(24.0);
            let painter = ui.painter_at(response.rect);
            let view = ChartView::fit(&self.forest);
            let text_color = ui.visuals().text_color();
            let axis = egui::Stroke::new(1.0, text_color);

            // Axes.
            let origin = view.to_screen(Vec2::new(0.0, view.y_min), rect);
            painter.line_segment([origin, egui::pos2(rect.right(), origin.y)], axis);
            painter.line_segment([origin, egui::pos2(origin.x, rect.top())], axis);
            painter.text(
                egui::pos2(rect.right(), origin.y + 4.0),
                egui::Align2::RIGHT_TOP,
                "Period",
                egui::FontId::proportional(12.0),
                text_color,
            );
            painter.text(
                egui::pos2(origin.x + 4.0, rect.top()),
                egui::Align2::LEFT_TOP,
                format!("Height (m), max {:.2}", view.y_max),
                egui::FontId::proportional(12.0),
                text_color,
            );

            // One line per tree, plus a legend entry.
            for (i, tree) in self.forest.trees().iter().enumerate() {
                let color = PALETTE[i % PALETTE.len()];
                let points: Vec<egui::Pos2> = tree
                    .history()
                    .iter()
                    .enumerate()
                    .map(|(period, &h)| view.to_screen(Vec2::new(period as f32, h as f32), rect))
                    .collect();
                if points.len() > 1 {
                    painter.add(egui::Shape::line(points, egui::Stroke::new(2.0, color)));
                } else if let Some(&p) = points.first() {
                    painter.circle_filled(p, 3.0, color);
                }

                painter.text(
                    egui::pos2(rect.left() + 12.0, rect.top() + 20.0 + i as f32 * 16.0),
                    egui::Align2::LEFT_TOP,
                    tree.name(),
                    egui::FontId::proportional(13.0),
                    color,
                );
            }

            // Hover readout in data coordinates.
            if let Some(pos) = response.hover_pos()
                && rect.contains(pos)
            {
                let d = view.from_screen(pos, rect);
                painter.text(
                    pos + egui::vec2(8.0, -8.0),
                    egui::Align2::LEFT_BOTTOM,
                    format!("period {:.1}, {:.2} m", d.x, d.y),
                    egui::FontId::monospace(11.0),
                    text_color,
                );
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_control_panel(ctx);
        self.ui_log_panel(ctx);
        self.ui_chart(ctx);
    }
}

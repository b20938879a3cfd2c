/*!
 * Interactive chart window.
 *
 * The chart is rendered with the same plotters pipeline as file export, into
 * an RGB buffer sized to the window, and shown as an egui texture. Resizing
 * the window re-renders at the new size; "Save as…" exports what is on screen.
 */

use anyhow::{Result, anyhow};
use eframe::egui;
use log::{debug, error, info};
use std::path::PathBuf;

use crate::models::ChartData;
use crate::viz::{self, ChartOptions};

/// Open a window showing the chart; returns when the window is closed.
pub fn show(data: ChartData, options: ChartOptions) -> Result<()> {
    let title = options
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "wcchart".to_string());

    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([options.width as f32, options.height as f32])
            .with_min_inner_size([320.0, 240.0])
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        "wcchart",
        native,
        Box::new(|_cc| Ok(Box::new(ChartViewer::new(data, options)))),
    )
    .map_err(|e| anyhow!("failed to open chart window: {e}"))
}

/// Pixel size of the canvas for an available area in points; never below the
/// renderer's minimum.
pub fn canvas_pixels(available: egui::Vec2, pixels_per_point: f32) -> (u32, u32) {
    let w = (available.x * pixels_per_point).round().max(100.0) as u32;
    let h = (available.y * pixels_per_point).round().max(100.0) as u32;
    (w, h)
}

struct ChartViewer {
    data: ChartData,
    options: ChartOptions,
    texture: Option<egui::TextureHandle>,
    rendered: Option<(u32, u32)>,
    status: String,
}

impl ChartViewer {
    fn new(data: ChartData, options: ChartOptions) -> Self {
        Self {
            data,
            options,
            texture: None,
            rendered: None,
            status: String::new(),
        }
    }

    fn rerender(&mut self, ctx: &egui::Context, size: (u32, u32)) {
        self.rendered = Some(size);
        match viz::render_to_rgb(&self.data, &self.options, size.0, size.1) {
            Ok(rgb) => {
                let image = egui::ColorImage::from_rgb([size.0 as usize, size.1 as usize], &rgb);
                match self.texture.as_mut() {
                    Some(tex) => tex.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.texture =
                            Some(ctx.load_texture("chart", image, egui::TextureOptions::LINEAR))
                    }
                }
                debug!("rendered chart at {}x{}", size.0, size.1);
            }
            Err(e) => {
                error!("render failed: {e:#}");
                self.status = format!("Render failed: {e}");
            }
        }
    }

    fn save_as(&mut self) {
        let start_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .add_filter("SVG image", &["svg"])
            .set_directory(start_dir)
            .set_file_name("chart.png")
            .save_file()
        else {
            return;
        };

        let mut opts = self.options.clone();
        if let Some((w, h)) = self.rendered {
            opts.width = w;
            opts.height = h;
        }
        self.status = match viz::render_to_file(&self.data, &opts, &path) {
            Ok(()) => {
                info!("saved chart to {}", path.display());
                format!("Saved {}", path.display())
            }
            Err(e) => {
                error!("save failed: {e:#}");
                format!("Save failed: {e}")
            }
        };
    }
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Save as…").clicked() {
                    self.save_as();
                }
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let size = canvas_pixels(available, ctx.pixels_per_point());
                if self.rendered != Some(size) {
                    self.rerender(ctx, size);
                }
                if let Some(tex) = &self.texture {
                    ui.image((tex.id(), available));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_follows_pixel_density() {
        assert_eq!(canvas_pixels(egui::vec2(400.0, 300.0), 2.0), (800, 600));
        assert_eq!(canvas_pixels(egui::vec2(10.0, 300.0), 1.0), (100, 300));
    }
}

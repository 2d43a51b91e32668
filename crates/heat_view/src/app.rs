use std::time::Instant;

use eframe::egui::{self, Color32, TextStyle};
use heat_render::{
    compute_visible_labels, overlay_alpha, Colormap, Point, Size, Tensor, TensorRasterizer,
    ViewportQuery, LABEL_MIN_STEP,
};

pub struct ViewerApp {
    tensor: Tensor,
    colormap: Colormap,
    scale: f32,
    texture: Option<egui::TextureHandle>,
    frames: u32,
    fps_window: Instant,
}

impl ViewerApp {
    pub fn new(tensor: Tensor, colormap: Colormap, scale: f32) -> Self {
        Self {
            tensor,
            colormap,
            scale: scale.clamp(0.0, 100.0),
            texture: None,
            frames: 0,
            fps_window: Instant::now(),
        }
    }

    /// Upload the heatmap texture on first use; the tensor never changes, so
    /// the raster pass runs exactly once.
    fn texture_id(&mut self, ctx: &egui::Context) -> egui::TextureId {
        if self.texture.is_none() {
            let buffer = TensorRasterizer::new(self.colormap).rasterize(&self.tensor);
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [buffer.width, buffer.height],
                &buffer.pixels,
            );
            // Nearest filtering keeps cell boundaries crisp when zoomed in.
            self.texture = Some(ctx.load_texture(
                self.tensor.name.clone(),
                image,
                egui::TextureOptions::NEAREST,
            ));
        }
        self.texture.as_ref().map(|t| t.id()).unwrap_or_default()
    }

    fn update_fps_title(&mut self, ctx: &egui::Context) {
        self.frames += 1;
        let elapsed = self.fps_window.elapsed();
        if elapsed.as_secs_f32() >= 1.0 {
            let fps = (self.frames as f32 / elapsed.as_secs_f32()).round() as u32;
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "heat_view : {} [{fps}FPS]",
                self.tensor.name
            )));
            self.frames = 0;
            self.fps_window = Instant::now();
        }
    }

    fn draw_heatmap(&self, ui: &mut egui::Ui, texture: egui::TextureId) {
        let step = self.scale;
        let viewport = ui.clip_rect();
        let image_origin = ui.cursor().min;

        let size = egui::vec2(step * self.tensor.cols as f32, step * self.tensor.rows as f32);
        ui.image(egui::load::SizedTexture::new(texture, size));

        if step <= LABEL_MIN_STEP {
            return;
        }

        let offset = image_origin - viewport.min;
        let query = ViewportQuery {
            offset: Point::new(offset.x, offset.y),
            step,
            window: Size::new(viewport.width(), viewport.height()),
            alpha: overlay_alpha(step),
        };

        let font = TextStyle::Body.resolve(ui.style());
        let labels = compute_visible_labels(&self.tensor, &query, |text| {
            let galley =
                ui.fonts(|f| f.layout_no_wrap(text.to_string(), font.clone(), Color32::WHITE));
            Size::new(galley.size().x, galley.size().y)
        });

        let painter = ui.painter();
        for label in &labels {
            if let Some(background) = &label.background {
                let rect = egui::Rect::from_min_max(
                    viewport.min + egui::vec2(background.rect.min.x, background.rect.min.y),
                    viewport.min + egui::vec2(background.rect.max.x, background.rect.max.y),
                );
                painter.rect_filled(rect, 4.0, rgba(background.color));
            }
            let pos = viewport.min + egui::vec2(label.pos.x, label.pos.y);
            painter.text(pos, egui::Align2::LEFT_TOP, &label.text, font.clone(), rgba(label.color));
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_fps_title(ctx);

        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let texture = self.texture_id(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(Color32::from_rgb(13, 13, 20)).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.label(format!(
                    "Tensor : {} ({}x{})",
                    self.tensor.name, self.tensor.rows, self.tensor.cols
                ));
                ui.add(egui::Slider::new(&mut self.scale, 0.0..=100.0).text("scale"));
                ui.separator();

                egui::ScrollArea::both().show(ui, |ui| {
                    self.draw_heatmap(ui, texture);
                });
            });

        // Keep the frame loop running so the FPS readout stays current.
        ctx.request_repaint();
    }
}

fn rgba(c: [f32; 4]) -> Color32 {
    Color32::from(egui::Rgba::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
}

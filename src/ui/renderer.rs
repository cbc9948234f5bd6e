//! Panel rendering
//!
//! Rasterises a [`FormView`] with tiny-skia: page background, decorative
//! blobs, the glass panel and its controls. Geometry comes from
//! [`PanelLayout`]; text is only drawn when a font has been loaded.

use std::path::{Path, PathBuf};

use log::debug;
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, Path as SkiaPath, PathBuilder, Pixmap,
    PixmapPaint, Point, SpreadMode, Stroke, Transform,
};

use crate::config::Settings;
use crate::domain::LabelTone;
use crate::ui::blob::{BlobStyle, render_blob};
use crate::ui::layout::{Frame, PanelLayout};
use crate::ui::text::TextPainter;
use crate::ui::view::{
    BRAND, BRAND_SUBTITLE, EMPTY_HINT, FormView, PREDICTION_PREFIX, PROMO_BODY, PROMO_HEADING,
    PROMO_POINTS, RESULT_FOOTNOTE, ResultPanel, VERSION_TAG,
};

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Cannot read font file {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File {} is not a usable font", path.display())]
    InvalidFont { path: PathBuf },

    #[error("Failed to write PNG to {}: {reason}", path.display())]
    PngExport { path: PathBuf, reason: String },
}

const PAGE_BACKGROUND: (u8, u8, u8) = (0x0b, 0x10, 0x20);
const TONE_STRIPE_WIDTH: f32 = 6.0;
const CORNER_RADIUS: f32 = 18.0;
const CONTROL_RADIUS: f32 = 10.0;

fn white(alpha: u8) -> Color {
    Color::from_rgba8(255, 255, 255, alpha)
}

fn tone_color(tone: LabelTone) -> Color {
    let (r, g, b) = tone.rgb();
    Color::from_rgba8(r, g, b, 255)
}

/// Renders the form page to pixmaps
#[derive(Debug)]
pub struct PanelRenderer {
    width: u32,
    height: u32,
    text: Option<TextPainter>,
}

impl PanelRenderer {
    /// Creates a renderer for a canvas of the given size, without text
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            text: None,
        }
    }

    /// Creates a renderer from settings, loading the font if one is set
    pub fn from_settings(settings: &Settings) -> Result<Self, RendererError> {
        let mut renderer = Self::new(settings.canvas_width, settings.canvas_height);
        if let Some(path) = &settings.font_path {
            renderer = renderer.with_font(TextPainter::from_file(path)?);
        }
        Ok(renderer)
    }

    /// Uses `painter` for every text run
    pub fn with_font(mut self, painter: TextPainter) -> Self {
        self.text = Some(painter);
        self
    }

    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    /// Layout used for this renderer's canvas
    pub fn layout(&self) -> PanelLayout {
        PanelLayout::compute(self.width as f32, self.height as f32)
    }

    /// Renders a view to a new pixmap
    pub fn render(&self, view: &FormView) -> Result<Pixmap, RendererError> {
        if self.width == 0 || self.height == 0 {
            return Err(RendererError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        let mut pixmap =
            Pixmap::new(self.width, self.height).ok_or(RendererError::PixmapCreationFailed)?;

        let (r, g, b) = PAGE_BACKGROUND;
        pixmap.fill(Color::from_rgba8(r, g, b, 255));

        let layout = self.layout();
        self.render_panel(&mut pixmap, &layout)?;
        self.render_header(&mut pixmap, &layout);
        self.render_promo(&mut pixmap, &layout);
        self.render_fields(&mut pixmap, &layout, view);
        self.render_buttons(&mut pixmap, &layout, view);
        self.render_result(&mut pixmap, &layout, view);

        debug!("Rendered {}x{} panel", self.width, self.height);
        Ok(pixmap)
    }

    /// Writes a pixmap as PNG
    pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<(), RendererError> {
        pixmap.save_png(path).map_err(|e| RendererError::PngExport {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Panel background with the blobs clipped to it
    fn render_panel(&self, pixmap: &mut Pixmap, layout: &PanelLayout) -> Result<(), RendererError> {
        let panel = layout.panel;
        if panel.w < 1.0 || panel.h < 1.0 {
            return Ok(());
        }

        let mut layer = Pixmap::new(panel.w as u32, panel.h as u32)
            .ok_or(RendererError::PixmapCreationFailed)?;
        render_blob(&mut layer, &BlobStyle::violet_cyan());
        render_blob(&mut layer, &BlobStyle::gold_violet());

        let local = Frame::new(0.0, 0.0, panel.w, panel.h);
        fill_rounded(&mut layer, &local, CORNER_RADIUS, white(12));
        stroke_rounded(&mut layer, &local.inset(0.5), CORNER_RADIUS, white(28), 1.0);

        let (x, y) = layout.panel_origin();
        pixmap.draw_pixmap(
            x as i32,
            y as i32,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn render_header(&self, pixmap: &mut Pixmap, layout: &PanelLayout) {
        let Some(text) = &self.text else {
            return;
        };
        let header = layout.header;
        text.draw(pixmap, BRAND, header.x, header.y + 26.0, 26.0, white(255));
        text.draw(pixmap, BRAND_SUBTITLE, header.x, header.y + 48.0, 14.0, white(170));

        let tag_width = text.measure(VERSION_TAG, 13.0);
        text.draw(pixmap, VERSION_TAG, header.right() - tag_width, header.y + 26.0, 13.0, white(150));
    }

    fn render_promo(&self, pixmap: &mut Pixmap, layout: &PanelLayout) {
        let Some(text) = &self.text else {
            return;
        };
        let promo = layout.promo;
        let mut y = text.draw_wrapped(pixmap, PROMO_HEADING, promo.x, promo.y, promo.w, 30.0, white(255));
        y = text.draw_wrapped(pixmap, PROMO_BODY, promo.x, y + 12.0, promo.w, 15.0, white(170));
        y += 18.0;
        for point in PROMO_POINTS {
            y = text.draw_wrapped(pixmap, &format!("• {}", point), promo.x, y, promo.w, 15.0, white(170));
        }
    }

    fn render_fields(&self, pixmap: &mut Pixmap, layout: &PanelLayout, view: &FormView) {
        for (label_frame, input_frame, field) in [
            (layout.title_label, layout.title_input, &view.title),
            (layout.body_label, layout.body_input, &view.body),
        ] {
            fill_rounded(pixmap, &input_frame, CONTROL_RADIUS, white(16));
            stroke_rounded(pixmap, &input_frame, CONTROL_RADIUS, white(40), 1.0);

            if let Some(text) = &self.text {
                text.draw(pixmap, field.label, label_frame.x, label_frame.bottom() - 4.0, 14.0, white(170));
                let color = if field.shows_placeholder() { white(110) } else { white(240) };
                let inner = input_frame.inset(12.0);
                text.draw_wrapped(pixmap, field.display_text(), inner.x, inner.y, inner.w, 15.0, color);
            }
        }
    }

    fn render_buttons(&self, pixmap: &mut Pixmap, layout: &PanelLayout, view: &FormView) {
        let submit = layout.submit_button;
        let opacity = if view.submit.enabled { 1.0 } else { 0.45 };
        fill_gradient_rounded(
            pixmap,
            &submit,
            CONTROL_RADIUS,
            Color::from_rgba8(0x7c, 0x3a, 0xed, 255),
            Color::from_rgba8(0x00, 0xd1, 0xff, 255),
            opacity,
        );

        let clear = layout.clear_button;
        stroke_rounded(pixmap, &clear, CONTROL_RADIUS, white(90), 1.0);

        if let Some(text) = &self.text {
            for (frame, label) in [(submit, view.submit.label), (clear, view.clear.label)] {
                let width = text.measure(label, 15.0);
                let x = frame.x + (frame.w - width) / 2.0;
                text.draw(pixmap, label, x, frame.y + frame.h / 2.0 + 5.0, 15.0, white(255));
            }
        }
    }

    fn render_result(&self, pixmap: &mut Pixmap, layout: &PanelLayout, view: &FormView) {
        let frame = layout.result;
        fill_rounded(pixmap, &frame, CONTROL_RADIUS, white(10));

        match &view.result {
            ResultPanel::Empty => {
                if let Some(text) = &self.text {
                    let inner = frame.inset(16.0);
                    text.draw_wrapped(pixmap, EMPTY_HINT, inner.x, inner.y, inner.w, 14.0, white(150));
                }
            }
            ResultPanel::Ready(result) => {
                let stripe = Frame::new(frame.x, frame.y, TONE_STRIPE_WIDTH, frame.h);
                fill_rect(pixmap, &stripe, tone_color(result.tone));

                let Some(text) = &self.text else {
                    return;
                };
                let inner = frame.inset(16.0);
                let baseline = inner.y + 18.0;
                text.draw(pixmap, PREDICTION_PREFIX, inner.x, baseline, 16.0, white(255));
                let offset = text.measure(PREDICTION_PREFIX, 16.0);
                text.draw(pixmap, &result.prediction, inner.x + offset, baseline, 16.0, tone_color(result.tone));

                let confidence = result.confidence_line();
                let width = text.measure(&confidence, 14.0);
                text.draw(pixmap, &confidence, inner.right() - width, baseline, 14.0, white(170));

                text.draw_wrapped(pixmap, RESULT_FOOTNOTE, inner.x, baseline + 14.0, inner.w, 13.0, white(150));
            }
        }
    }
}

/// Builds a rounded rectangle path
fn rounded_path(frame: &Frame, radius: f32) -> Option<SkiaPath> {
    if frame.w <= 0.0 || frame.h <= 0.0 {
        return None;
    }
    let r = radius.min(frame.w / 2.0).min(frame.h / 2.0).max(0.0);
    let (x, y, right, bottom) = (frame.x, frame.y, frame.right(), frame.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.quad_to(right, y, right, y + r);
    pb.line_to(right, bottom - r);
    pb.quad_to(right, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.quad_to(x, bottom, x, bottom - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

fn fill_rect(pixmap: &mut Pixmap, frame: &Frame, color: Color) {
    if let Some(rect) = frame.to_skia() {
        let mut paint = Paint::default();
        paint.set_color(color);
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

fn fill_rounded(pixmap: &mut Pixmap, frame: &Frame, radius: f32, color: Color) {
    if let Some(path) = rounded_path(frame, radius) {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn stroke_rounded(pixmap: &mut Pixmap, frame: &Frame, radius: f32, color: Color, width: f32) {
    if let Some(path) = rounded_path(frame, radius) {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn fill_gradient_rounded(
    pixmap: &mut Pixmap,
    frame: &Frame,
    radius: f32,
    from: Color,
    to: Color,
    opacity: f32,
) {
    let Some(path) = rounded_path(frame, radius) else {
        return;
    };
    let mut from = from;
    let mut to = to;
    from.apply_opacity(opacity);
    to.apply_opacity(opacity);

    let mut paint = Paint::default();
    paint.anti_alias = true;
    match LinearGradient::new(
        Point::from_xy(frame.x, frame.y),
        Point::from_xy(frame.right(), frame.bottom()),
        vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        SpreadMode::Pad,
        Transform::identity(),
    ) {
        Some(shader) => paint.shader = shader,
        None => paint.set_color(from),
    }
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{FormState, RequestStatus};
    use crate::domain::{FormInput, PredictionResult};

    fn view_for(result: Option<PredictionResult>, status: RequestStatus) -> FormView {
        FormView::from_state(&FormState {
            input: FormInput::new("Test", ""),
            result,
            status,
        })
    }

    fn centre_of(frame: &Frame) -> (u32, u32) {
        ((frame.x + frame.w / 2.0) as u32, (frame.y + frame.h / 2.0) as u32)
    }

    fn stripe_point(renderer: &PanelRenderer) -> (u32, u32) {
        let result = renderer.layout().result;
        ((result.x + 2.0) as u32, (result.y + result.h / 2.0) as u32)
    }

    fn rgb_at(pixmap: &Pixmap, (x, y): (u32, u32)) -> (u8, u8, u8) {
        let px = pixmap.pixel(x, y).unwrap().demultiply();
        (px.red(), px.green(), px.blue())
    }

    #[test]
    fn renders_canvas_of_requested_size() {
        let renderer = PanelRenderer::new(1100, 720);
        let pixmap = renderer.render(&view_for(None, RequestStatus::Idle)).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (1100, 720));
        assert!(!renderer.has_font());
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let renderer = PanelRenderer::new(0, 720);
        let err = renderer.render(&view_for(None, RequestStatus::Idle)).unwrap_err();
        assert!(matches!(err, RendererError::InvalidCanvas { width: 0, height: 720 }));
    }

    #[test]
    fn result_stripe_uses_label_tone() {
        let renderer = PanelRenderer::new(1100, 720);

        let real = renderer
            .render(&view_for(Some(PredictionResult::new("Real", 1, 0.87)), RequestStatus::Idle))
            .unwrap();
        assert_eq!(rgb_at(&real, stripe_point(&renderer)), LabelTone::Positive.rgb());

        let fake = renderer
            .render(&view_for(Some(PredictionResult::new("Fake", 0, 0.42)), RequestStatus::Idle))
            .unwrap();
        assert_eq!(rgb_at(&fake, stripe_point(&renderer)), LabelTone::Negative.rgb());
    }

    #[test]
    fn empty_result_has_no_stripe() {
        let renderer = PanelRenderer::new(1100, 720);
        let pixmap = renderer.render(&view_for(None, RequestStatus::Idle)).unwrap();
        let colour = rgb_at(&pixmap, stripe_point(&renderer));
        assert_ne!(colour, LabelTone::Positive.rgb());
        assert_ne!(colour, LabelTone::Negative.rgb());
    }

    #[test]
    fn disabled_trigger_is_dimmer() {
        let renderer = PanelRenderer::new(1100, 720);
        let point = centre_of(&renderer.layout().submit_button);

        let idle = renderer.render(&view_for(None, RequestStatus::Idle)).unwrap();
        let pending = renderer.render(&view_for(None, RequestStatus::Pending)).unwrap();

        let brightness = |(r, g, b): (u8, u8, u8)| r as u32 + g as u32 + b as u32;
        assert!(brightness(rgb_at(&pending, point)) < brightness(rgb_at(&idle, point)));
    }

    #[test]
    fn png_export_reports_bad_path() {
        let pixmap = Pixmap::new(4, 4).unwrap();
        let err = PanelRenderer::save_png(&pixmap, Path::new("/no/such/dir/panel.png")).unwrap_err();
        assert!(matches!(err, RendererError::PngExport { .. }));
    }

    #[test]
    fn png_export_writes_file() {
        let path = std::env::temp_dir().join(format!("veritium-test-{}.png", std::process::id()));
        let renderer = PanelRenderer::new(640, 480);
        let pixmap = renderer.render(&view_for(None, RequestStatus::Idle)).unwrap();

        PanelRenderer::save_png(&pixmap, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_font_fails_settings_construction() {
        let settings = Settings::from_lookup(|key| match key {
            crate::config::settings::ENV_FONT => Some("/nowhere/font.ttf".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(matches!(
            PanelRenderer::from_settings(&settings),
            Err(RendererError::FontRead { .. })
        ));
    }
}

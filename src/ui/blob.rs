//! Decorative gradient blobs
//!
//! Soft, blurred ellipses painted behind the form panel. They carry no data
//! and cannot fail: a style that makes no sense simply paints nothing.

use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, PixmapPaint, Point,
    Rect as SkiaRect, SpreadMode, Transform,
};

/// Gaussian blur radius applied to every blob, in pixels
pub const BLOB_BLUR_RADIUS: f32 = 60.0;

/// Opacity every blob is composited with
pub const BLOB_OPACITY: f32 = 0.26;

/// Two-colour linear gradient, angle in CSS convention (0 = upwards, clockwise)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobGradient {
    pub angle_deg: f32,
    pub from: Color,
    pub to: Color,
}

/// Placement, size and colour of one blob
///
/// Offsets follow absolute positioning rules: `left` wins over `right`,
/// `top` wins over `bottom`, and a missing pair pins the blob to the
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobStyle {
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub width: f32,
    pub height: f32,
    pub gradient: BlobGradient,
}

/// Blob bounds resolved against a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobBounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BlobStyle {
    /// Violet to cyan blob hanging off the top-left corner
    pub fn violet_cyan() -> Self {
        Self {
            left: Some(-120.0),
            top: Some(-40.0),
            right: None,
            bottom: None,
            width: 360.0,
            height: 360.0,
            gradient: BlobGradient {
                angle_deg: 135.0,
                from: Color::from_rgba8(0x7c, 0x3a, 0xed, 0xff),
                to: Color::from_rgba8(0x00, 0xd1, 0xff, 0xff),
            },
        }
    }

    /// Gold to violet blob hanging off the bottom-right corner
    pub fn gold_violet() -> Self {
        Self {
            left: None,
            top: None,
            right: Some(-160.0),
            bottom: Some(-60.0),
            width: 420.0,
            height: 420.0,
            gradient: BlobGradient {
                angle_deg: 135.0,
                from: Color::from_rgba8(0xff, 0xd1, 0x66, 0xff),
                to: Color::from_rgba8(0x7c, 0x3a, 0xed, 0xff),
            },
        }
    }

    /// Resolves the blob against a canvas of the given size
    ///
    /// # Returns
    /// `None` when the size or a used offset is not a finite positive number
    pub fn resolve(&self, canvas_w: f32, canvas_h: f32) -> Option<BlobBounds> {
        let (w, h) = (self.width, self.height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return None;
        }

        let x = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => canvas_w - right - w,
            (None, None) => 0.0,
        };
        let y = match (self.top, self.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => canvas_h - bottom - h,
            (None, None) => 0.0,
        };

        if !(x.is_finite() && y.is_finite()) {
            return None;
        }

        Some(BlobBounds { x, y, w, h })
    }
}

/// Paints a blob onto the canvas
///
/// The ellipse is filled with its gradient on a scratch layer, blurred,
/// then composited at [`BLOB_OPACITY`].
pub fn render_blob(canvas: &mut Pixmap, style: &BlobStyle) {
    let canvas_w = canvas.width() as f32;
    let canvas_h = canvas.height() as f32;
    let Some(bounds) = style.resolve(canvas_w, canvas_h) else {
        return;
    };

    // Blur tails reach about three radii past the shape
    let spread = BLOB_BLUR_RADIUS * 3.0;
    let x0 = (bounds.x - spread).max(-spread).floor();
    let y0 = (bounds.y - spread).max(-spread).floor();
    let x1 = (bounds.x + bounds.w + spread).min(canvas_w + spread).ceil();
    let y1 = (bounds.y + bounds.h + spread).min(canvas_h + spread).ceil();
    if x1 <= x0 || y1 <= y0 || x1 <= 0.0 || y1 <= 0.0 || x0 >= canvas_w || y0 >= canvas_h {
        return;
    }

    let Some(mut layer) = Pixmap::new((x1 - x0) as u32, (y1 - y0) as u32) else {
        return;
    };

    let local = BlobBounds {
        x: bounds.x - x0,
        y: bounds.y - y0,
        ..bounds
    };
    let Some(oval) = SkiaRect::from_xywh(local.x, local.y, local.w, local.h) else {
        return;
    };
    let Some(path) = PathBuilder::from_oval(oval) else {
        return;
    };

    let mut paint = Paint::default();
    paint.anti_alias = true;
    match gradient_shader(&style.gradient, &local) {
        Some(shader) => paint.shader = shader,
        None => paint.set_color(style.gradient.from),
    }
    layer.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

    box_blur(&mut layer, BLOB_BLUR_RADIUS);

    let layer_paint = PixmapPaint {
        opacity: BLOB_OPACITY,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(
        x0 as i32,
        y0 as i32,
        layer.as_ref(),
        &layer_paint,
        Transform::identity(),
        None,
    );
}

/// Builds the gradient shader spanning the blob box
///
/// The gradient line runs through the box centre at the requested angle and
/// is long enough for both corners to hit the end colours.
fn gradient_shader(gradient: &BlobGradient, bounds: &BlobBounds) -> Option<tiny_skia::Shader<'static>> {
    let angle = gradient.angle_deg.to_radians();
    let (dx, dy) = (angle.sin(), -angle.cos());
    let half = (bounds.w * dx.abs() + bounds.h * dy.abs()) / 2.0;
    let cx = bounds.x + bounds.w / 2.0;
    let cy = bounds.y + bounds.h / 2.0;

    LinearGradient::new(
        Point::from_xy(cx - dx * half, cy - dy * half),
        Point::from_xy(cx + dx * half, cy + dy * half),
        vec![
            GradientStop::new(0.0, gradient.from),
            GradientStop::new(1.0, gradient.to),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
}

/// Approximates a gaussian blur with three box blur passes
///
/// Works on premultiplied data; pixels outside the layer count as
/// transparent.
fn box_blur(pixmap: &mut Pixmap, sigma: f32) {
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let radius = box_radius(sigma);
    if radius == 0 || width == 0 || height == 0 {
        return;
    }

    let data = pixmap.data_mut();
    let mut scratch = vec![0u8; data.len()];
    for _ in 0..3 {
        blur_pass(data, &mut scratch, width, height, radius, Axis::Horizontal);
        blur_pass(&scratch, data, width, height, radius, Axis::Vertical);
    }
}

/// Box radius whose three passes match a gaussian of `sigma`
fn box_radius(sigma: f32) -> usize {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    let ideal_width = (12.0 * sigma * sigma / 3.0 + 1.0).sqrt();
    (ideal_width / 2.0).floor() as usize
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize, axis: Axis) {
    let (lines, len, line_stride, step) = match axis {
        Axis::Horizontal => (height, width, width * 4, 4),
        Axis::Vertical => (width, height, 4, width * 4),
    };
    let window = (2 * radius + 1) as u32;

    for line in 0..lines {
        let base = line * line_stride;
        for channel in 0..4 {
            let at = |i: usize| base + i * step + channel;

            let mut sum: u32 = (0..=radius.min(len - 1)).map(|i| src[at(i)] as u32).sum();
            for i in 0..len {
                dst[at(i)] = (sum / window) as u8;
                if i + radius + 1 < len {
                    sum += src[at(i + radius + 1)] as u32;
                }
                if i >= radius {
                    sum -= src[at(i - radius)] as u32;
                }
            }
        }
    }
}

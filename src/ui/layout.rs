//! Panel layout calculation
//!
//! Computes where every element of the form page goes for a given canvas
//! size. Kept apart from drawing so the geometry can be tested on its own.

use tiny_skia::Rect as SkiaRect;

/// Axis-aligned box in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Shrinks the frame by `d` on every side
    pub fn inset(&self, d: f32) -> Frame {
        Frame::new(self.x + d, self.y + d, self.w - 2.0 * d, self.h - 2.0 * d)
    }

    /// Cuts a strip of height `h` off the top
    ///
    /// # Returns
    /// The strip, and what remains below it after `gap`
    pub fn take_top(&self, h: f32, gap: f32) -> (Frame, Frame) {
        let h = h.min(self.h);
        let strip = Frame::new(self.x, self.y, self.w, h);
        let rest = Frame::new(self.x, self.y + h + gap, self.w, self.h - h - gap);
        (strip, rest)
    }

    /// Cuts a column of width `w` off the left
    pub fn take_left(&self, w: f32, gap: f32) -> (Frame, Frame) {
        let w = w.min(self.w);
        let column = Frame::new(self.x, self.y, w, self.h);
        let rest = Frame::new(self.x + w + gap, self.y, self.w - w - gap, self.h);
        (column, rest)
    }

    pub fn to_skia(&self) -> Option<SkiaRect> {
        SkiaRect::from_xywh(self.x, self.y, self.w, self.h)
    }
}

const PAGE_MARGIN: f32 = 32.0;
const PANEL_PADDING: f32 = 32.0;
const HEADER_HEIGHT: f32 = 56.0;
const SECTION_GAP: f32 = 24.0;
const COLUMN_GAP: f32 = 40.0;
const PROMO_SHARE: f32 = 0.45;
const LABEL_HEIGHT: f32 = 20.0;
const FIELD_GAP: f32 = 16.0;
const TITLE_INPUT_HEIGHT: f32 = 44.0;
const BODY_INPUT_HEIGHT: f32 = 184.0;
const BUTTON_HEIGHT: f32 = 44.0;
const PRIMARY_BUTTON_WIDTH: f32 = 140.0;
const GHOST_BUTTON_WIDTH: f32 = 100.0;
const BUTTON_GAP: f32 = 12.0;

/// Where every element of the page goes
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub canvas: Frame,
    pub panel: Frame,
    pub header: Frame,
    pub promo: Frame,
    pub form: Frame,
    pub title_label: Frame,
    pub title_input: Frame,
    pub body_label: Frame,
    pub body_input: Frame,
    pub submit_button: Frame,
    pub clear_button: Frame,
    pub result: Frame,
}

impl PanelLayout {
    /// Lays the page out on a canvas of the given size
    pub fn compute(canvas_width: f32, canvas_height: f32) -> Self {
        let canvas = Frame::new(0.0, 0.0, canvas_width, canvas_height);
        let panel = canvas.inset(PAGE_MARGIN);
        let inner = panel.inset(PANEL_PADDING);

        let (header, content) = inner.take_top(HEADER_HEIGHT, SECTION_GAP);
        let (promo, form) = content.take_left(content.w * PROMO_SHARE, COLUMN_GAP);

        let (title_label, rest) = form.take_top(LABEL_HEIGHT, 6.0);
        let (title_input, rest) = rest.take_top(TITLE_INPUT_HEIGHT, FIELD_GAP);
        let (body_label, rest) = rest.take_top(LABEL_HEIGHT, 6.0);
        let (body_input, rest) = rest.take_top(BODY_INPUT_HEIGHT, FIELD_GAP + 6.0);
        let (buttons, result) = rest.take_top(BUTTON_HEIGHT, FIELD_GAP);
        let (submit_button, buttons) = buttons.take_left(PRIMARY_BUTTON_WIDTH, BUTTON_GAP);
        let (clear_button, _) = buttons.take_left(GHOST_BUTTON_WIDTH, 0.0);

        Self {
            canvas,
            panel,
            header,
            promo,
            form,
            title_label,
            title_input,
            body_label,
            body_input,
            submit_button,
            clear_button,
            result,
        }
    }

    /// Offset of the panel inside the canvas
    pub fn panel_origin(&self) -> (f32, f32) {
        (self.panel.x, self.panel.y)
    }
}

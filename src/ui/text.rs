//! Text rasterisation with ab_glyph
//!
//! Glyph coverage is blended straight into the pixmap. No shaping beyond
//! kerning pairs, which is plenty for labels and short paragraphs.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use tiny_skia::{Color, Pixmap, PremultipliedColorU8};

use crate::ui::renderer::RendererError;

/// Draws text runs with a single loaded font
pub struct TextPainter {
    font: FontVec,
}

impl std::fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPainter").finish_non_exhaustive()
    }
}

impl TextPainter {
    /// Loads a TTF/OTF font from disk
    pub fn from_file(path: &Path) -> Result<Self, RendererError> {
        let bytes = std::fs::read(path).map_err(|source| RendererError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes, path)
    }

    /// Parses font data already in memory
    ///
    /// `origin` only shows up in error messages.
    pub fn from_bytes(bytes: Vec<u8>, origin: &Path) -> Result<Self, RendererError> {
        let font = FontVec::try_from_vec(bytes).map_err(|_| RendererError::InvalidFont {
            path: PathBuf::from(origin),
        })?;
        Ok(Self { font })
    }

    /// Advance width of `text` at `size` pixels
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Height of one line of text at `size` pixels
    pub fn line_height(&self, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        scaled.height() + scaled.line_gap()
    }

    /// Draws a single line with its baseline at `baseline_y`
    pub fn draw(&self, pixmap: &mut Pixmap, text: &str, x: f32, baseline_y: f32, size: f32, color: Color) {
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);
        let mut caret = x;
        let mut previous = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline_y));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                blend_pixel(pixmap, px, py, color, coverage);
            });
        }
    }

    /// Draws `text` wrapped to `max_width`, starting at the top of `y`
    ///
    /// # Returns
    /// The y coordinate just below the last line drawn
    pub fn draw_wrapped(
        &self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        y: f32,
        max_width: f32,
        size: f32,
        color: Color,
    ) -> f32 {
        let line_height = self.line_height(size);
        let ascent = self.font.as_scaled(PxScale::from(size)).ascent();
        let mut top = y;
        for line in wrap_words(text, max_width, |s| self.measure(s, size)) {
            self.draw(pixmap, &line, x, top + ascent, size, color);
            top += line_height;
        }
        top
    }
}

/// Splits `text` into lines no wider than `max_width`
///
/// Words are never broken; a single word wider than the limit gets a line
/// of its own. Explicit newlines are kept.
pub fn wrap_words<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}

/// Source-over blend of `color` scaled by `coverage` into one pixel
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= pixmap.width() as i32 || y >= pixmap.height() as i32 {
        return;
    }
    let index = y as usize * pixmap.width() as usize + x as usize;
    let Some(dst) = pixmap.pixels_mut().get_mut(index) else {
        return;
    };

    let src_a = (color.alpha() * coverage.clamp(0.0, 1.0)).clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let inv = 1.0 - src_a;
    let mix = |src: f32, dst: u8| (src * src_a * 255.0 + dst as f32 * inv).round().clamp(0.0, 255.0) as u8;

    let a = (src_a * 255.0 + dst.alpha() as f32 * inv).round().clamp(0.0, 255.0) as u8;
    let r = mix(color.red(), dst.red()).min(a);
    let g = mix(color.green(), dst.green()).min(a);
    let b = mix(color.blue(), dst.blue()).min(a);

    if let Some(blended) = PremultipliedColorU8::from_rgba(r, g, b, a) {
        *dst = blended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_chars(s: &str) -> f32 {
        s.chars().count() as f32
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_words("News integrity", 40.0, by_chars), vec!["News integrity"]);
    }

    #[test]
    fn words_wrap_at_limit() {
        let lines = wrap_words("Fast lightweight classification of news", 16.0, by_chars);
        assert_eq!(lines, vec!["Fast lightweight", "classification", "of news"]);
    }

    #[test]
    fn long_word_gets_own_line() {
        let lines = wrap_words("a supercalifragilistic b", 5.0, by_chars);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn newlines_are_preserved() {
        let lines = wrap_words("first\nsecond line", 100.0, by_chars);
        assert_eq!(lines, vec!["first", "second line"]);
    }

    #[test]
    fn garbage_font_data_is_rejected() {
        let err = TextPainter::from_bytes(vec![0, 1, 2, 3], Path::new("broken.ttf")).unwrap_err();
        assert!(matches!(err, RendererError::InvalidFont { .. }));
    }

    #[test]
    fn missing_font_file_is_reported() {
        let err = TextPainter::from_file(Path::new("/definitely/not/here.ttf")).unwrap_err();
        assert!(matches!(err, RendererError::FontRead { .. }));
    }

    #[test]
    fn blend_pixel_over_transparent_and_out_of_bounds() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        let white = Color::from_rgba8(255, 255, 255, 255);

        blend_pixel(&mut pixmap, 1, 1, white, 1.0);
        blend_pixel(&mut pixmap, 2, 2, white, 0.5);
        blend_pixel(&mut pixmap, -1, 9, white, 1.0);

        assert_eq!(pixmap.pixel(1, 1).unwrap().alpha(), 255);
        let half = pixmap.pixel(2, 2).unwrap();
        assert!((127..=128).contains(&half.alpha()));
        assert!(half.red() <= half.alpha());
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
    }
}

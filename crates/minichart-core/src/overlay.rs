// File: crates/minichart-core/src/overlay.rs
// Summary: Decorative trend tint painted behind a mini-chart's line.

use skia_safe as skia;

use crate::geometry::PixelSize;
use crate::trend::TrendDirection;

/// Vertical gradient tinted by trend: full color at the top fading to clear at the bottom,
/// the whole layer drawn at `opacity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendOverlay {
    pub direction: TrendDirection,
    pub color: skia::Color,
    pub opacity: f32,
}

impl TrendOverlay {
    pub fn for_direction(direction: TrendDirection) -> Self {
        let color = match direction {
            TrendDirection::Up => skia::Color::from_argb(255, 0x22, 0xc5, 0x5e),
            TrendDirection::Down => skia::Color::from_argb(255, 0xef, 0x44, 0x44),
            TrendDirection::Stagnant => skia::Color::from_argb(255, 0x6b, 0x72, 0x80),
        };
        Self { direction, color, opacity: 0.2 }
    }

    /// Tint at the top edge, with `opacity` folded into alpha.
    pub fn top_color(&self) -> skia::Color {
        let alpha = (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        skia::Color::from_argb(alpha, self.color.r(), self.color.g(), self.color.b())
    }

    pub fn paint(&self, canvas: &skia::Canvas, size: PixelSize) {
        let (w, h) = (size.width as f32, size.height as f32);
        let top = self.top_color();
        let clear = skia::Color::from_argb(0, top.r(), top.g(), top.b());
        let colors = [top, clear];
        let Some(shader) = skia::Shader::linear_gradient(
            ((0.0, 0.0), (0.0, h)),
            &colors[..],
            None,
            skia::TileMode::Clamp,
            None,
            None,
        ) else {
            tracing::debug!("gradient shader unavailable; overlay skipped");
            return;
        };
        let mut paint = skia::Paint::default();
        paint.set_style(skia::paint::Style::Fill);
        paint.set_shader(shader);
        canvas.draw_rect(skia::Rect::from_wh(w, h), &paint);
    }
}

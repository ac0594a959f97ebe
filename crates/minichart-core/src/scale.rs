// File: crates/minichart-core/src/scale.rs
// Summary: Linear domain-to-pixel transform used for both hidden axes.

/// Maps a value domain onto a pixel range. The range may be inverted
/// (start > end), which is how the Y axis grows upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain_min: f64,
    pub domain_max: f64,
    pub range_start: f32,
    pub range_end: f32,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_start: f32, range_end: f32) -> Self {
        Self { domain_min, domain_max, range_start, range_end }
    }

    /// Degenerate domains map everything to the middle of the range.
    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let span = self.domain_max - self.domain_min;
        if span.abs() < 1e-12 || !span.is_finite() {
            return (self.range_start + self.range_end) * 0.5;
        }
        let t = ((v - self.domain_min) / span) as f32;
        self.range_start + t * (self.range_end - self.range_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_grows_upward() {
        let s = LinearScale::new(0.0, 10.0, 40.0, 0.0);
        assert_eq!(s.to_px(0.0), 40.0);
        assert_eq!(s.to_px(10.0), 0.0);
        assert_eq!(s.to_px(5.0), 20.0);
    }

    #[test]
    fn flat_domain_centers() {
        let s = LinearScale::new(3.0, 3.0, 0.0, 100.0);
        assert_eq!(s.to_px(3.0), 50.0);
    }
}

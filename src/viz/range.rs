//! Axis ranges and auto-expand padding.

/// Fraction of the data span added beyond the extremes of an axis.
pub const AUTO_EXPAND_RATIO: f64 = 0.05;

/// Closed numeric interval of an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Min/max over the finite values; `None` if there are none.
    pub fn scan<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(AxisRange { min: v, max: v }),
                Some(r) => Some(AxisRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Absolute padding for `ratio`. A zero span falls back to the magnitude
    /// (at least 1) so the padded range is never empty.
    fn padding(&self, ratio: f64) -> f64 {
        let span = self.span();
        if span.abs() < f64::EPSILON {
            self.max.abs().max(self.min.abs()).max(1.0) * ratio
        } else {
            span * ratio
        }
    }

    /// Pad both ends (scatter axes).
    pub fn expand(self, ratio: f64) -> Self {
        let extra = self.padding(ratio);
        AxisRange {
            min: self.min - extra,
            max: self.max + extra,
        }
    }

    /// Range for a bar value axis: bars grow from zero, so zero is always
    /// included and only the side(s) holding data are padded.
    pub fn value_axis(self, ratio: f64) -> Self {
        let extra = self.padding(ratio);
        let min = if self.min >= 0.0 { 0.0 } else { self.min - extra };
        let max = if self.max <= 0.0 { 0.0 } else { self.max + extra };
        if max > min {
            AxisRange { min, max }
        } else {
            // all zero
            AxisRange { min: 0.0, max: 1.0 }
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        AxisRange {
            min: self.min / factor,
            max: self.max / factor,
        }
    }

    pub fn as_range(&self) -> std::ops::Range<f64> {
        self.min..self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn scan_ignores_non_finite() {
        let r = AxisRange::scan([3.0, f64::NAN, -1.0, f64::INFINITY, 7.5]).unwrap();
        assert_eq!(r, AxisRange { min: -1.0, max: 7.5 });
        assert!(AxisRange::scan(Vec::<f64>::new()).is_none());
    }

    #[test]
    fn scan_handles_large_values() {
        let r = AxisRange::scan([250_000.0, 400_000.0]).unwrap();
        assert_eq!(r.min, 250_000.0);
    }

    #[test]
    fn expand_pads_five_percent_of_span() {
        let r = AxisRange { min: 10.0, max: 30.0 }.expand(AUTO_EXPAND_RATIO);
        assert!(close(r.min, 9.0));
        assert!(close(r.max, 31.0));
    }

    #[test]
    fn value_axis_is_anchored_at_zero() {
        let r = AxisRange { min: 2.0, max: 12.0 }.value_axis(AUTO_EXPAND_RATIO);
        assert_eq!(r.min, 0.0);
        assert!(close(r.max, 12.5));

        let neg = AxisRange { min: -8.0, max: -2.0 }.value_axis(AUTO_EXPAND_RATIO);
        assert!(close(neg.min, -8.3));
        assert_eq!(neg.max, 0.0);

        let mixed = AxisRange { min: -10.0, max: 10.0 }.value_axis(AUTO_EXPAND_RATIO);
        assert!(close(mixed.min, -11.0));
        assert!(close(mixed.max, 11.0));
    }

    #[test]
    fn degenerate_span_still_has_room() {
        let r = AxisRange { min: 5.0, max: 5.0 };
        let e = r.expand(AUTO_EXPAND_RATIO);
        assert!(e.min < 5.0 && e.max > 5.0);
        let v = r.value_axis(AUTO_EXPAND_RATIO);
        assert_eq!(v.min, 0.0);
        assert!(close(v.max, 5.25));

        let zero = AxisRange { min: 0.0, max: 0.0 };
        let e = zero.expand(AUTO_EXPAND_RATIO);
        assert!(close(e.min, -0.05) && close(e.max, 0.05));
        assert_eq!(
            zero.value_axis(AUTO_EXPAND_RATIO),
            AxisRange { min: 0.0, max: 1.0 }
        );
    }
}

use geo::Rect;

use crate::map::Coordinate;

/// Extent of the visible region in degrees.
///
/// Both deltas are kept strictly positive and never exceed the whole globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    latitude_delta: f64,
    longitude_delta: f64,
}

impl Span {
    pub const MIN_DELTA: f64 = 1e-6;
    pub const MAX_LATITUDE_DELTA: f64 = 180.0;
    pub const MAX_LONGITUDE_DELTA: f64 = 360.0;

    /// Non-finite or non-positive deltas fall back to the minimum delta.
    pub fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta: clamp_delta(latitude_delta, Self::MAX_LATITUDE_DELTA),
            longitude_delta: clamp_delta(longitude_delta, Self::MAX_LONGITUDE_DELTA),
        }
    }

    pub fn latitude_delta(&self) -> f64 {
        self.latitude_delta
    }

    pub fn longitude_delta(&self) -> f64 {
        self.longitude_delta
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.latitude_delta * factor, self.longitude_delta * factor)
    }
}

fn clamp_delta(delta: f64, max: f64) -> f64 {
    if delta.is_nan() || delta <= 0.0 {
        Span::MIN_DELTA
    } else {
        delta.clamp(Span::MIN_DELTA, max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub span: Span,
}

impl Viewport {
    /// Roughly half a kilometre.
    pub const MIN_FITTED_DELTA: f64 = 0.005;

    pub fn new(center: Coordinate, span: Span) -> Self {
        Self { center, span }
    }

    pub fn recentered(&self, center: Coordinate) -> Self {
        Self {
            center,
            span: self.span,
        }
    }

    pub fn zoomed_in(&self) -> Self {
        Self {
            center: self.center,
            span: self.span.scaled(0.5),
        }
    }

    pub fn zoomed_out(&self) -> Self {
        Self {
            center: self.center,
            span: self.span.scaled(2.0),
        }
    }

    /// Region covering `bounds` with `padding` added as a fraction of each side's extent.
    ///
    /// Each delta is at least [`Viewport::MIN_FITTED_DELTA`], so flat or
    /// single-point bounds still show their surroundings.
    pub fn fitting(bounds: Rect, padding: f64) -> Self {
        let scale = 1.0 + padding.max(0.0);
        let center = Coordinate::from(bounds.center());

        Self {
            center,
            span: Span::new(
                (bounds.height() * scale).max(Self::MIN_FITTED_DELTA),
                (bounds.width() * scale).max(Self::MIN_FITTED_DELTA),
            ),
        }
    }
}

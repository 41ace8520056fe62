// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Screen geometry for timeline events.

/// Axis-aligned on-screen rectangle of an event element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check whether two boxes overlap on both axes
    ///
    /// Boxes that only share an edge have zero overlap area and do not
    /// intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        let overlap_x = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_y = self.bottom().min(other.bottom()) - self.y.max(other.y);
        overlap_x > 0.0 && overlap_y > 0.0
    }
}

/// Conversion between timeline seconds and screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineLayout {
    /// Horizontal pixels per second of audio
    pub pixels_per_second: f64,
    /// Height of one track band in pixels
    pub band_height: f64,
    /// Height of the header above the first band
    pub header_offset: f64,
}

impl Default for TimelineLayout {
    fn default() -> Self {
        Self {
            pixels_per_second: 100.0,
            band_height: 50.0,
            header_offset: 40.0,
        }
    }
}

impl TimelineLayout {
    /// Convert seconds to a horizontal pixel position
    pub fn seconds_to_x(&self, seconds: f64) -> f64 {
        seconds * self.pixels_per_second
    }

    /// Convert a horizontal pixel position to seconds
    pub fn x_to_seconds(&self, x: f64) -> f64 {
        if self.pixels_per_second <= 0.0 {
            return 0.0;
        }
        x / self.pixels_per_second
    }

    /// Top of the band for the track at `index`, relative to the header
    pub fn band_top(&self, index: usize) -> f64 {
        index as f64 * self.band_height
    }
}

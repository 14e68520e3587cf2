//! Drop region geometry
//!
//! Pure functions for classifying a pointer position inside a region's
//! bounding box, so drop behaviour can be tested without a windowing
//! toolkit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::SplitDirection;

/// Default width of the edge band that triggers a spatial split.
pub const DROP_REGION_LENGTH_PX: f64 = 100.0;

/// Part of a region a pointer is hovering over during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropRegion {
    /// Top edge band.
    Top,
    /// Left edge band.
    Left,
    /// Bottom edge band.
    Bottom,
    /// Right edge band.
    Right,
    /// Anywhere away from the edges.
    Cover,
}

impl DropRegion {
    /// Axis of the split created by dropping on this region.
    ///
    /// `Cover` never splits and returns `None`.
    #[must_use]
    pub const fn split_direction(self) -> Option<SplitDirection> {
        match self {
            Self::Left | Self::Right => Some(SplitDirection::Row),
            Self::Top | Self::Bottom => Some(SplitDirection::Column),
            Self::Cover => None,
        }
    }

    /// Returns true when new content goes after the existing content.
    #[must_use]
    pub const fn places_after(self) -> bool {
        matches!(self, Self::Bottom | Self::Right)
    }
}

impl fmt::Display for DropRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Left => write!(f, "left"),
            Self::Bottom => write!(f, "bottom"),
            Self::Right => write!(f, "right"),
            Self::Cover => write!(f, "cover"),
        }
    }
}

impl FromStr for DropRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "left" => Ok(Self::Left),
            "bottom" => Ok(Self::Bottom),
            "right" => Ok(Self::Right),
            "cover" => Ok(Self::Cover),
            other => Err(format!("unknown drop region: {other}")),
        }
    }
}

/// A pointer position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Extent along a split axis: width for rows, height for columns.
    #[must_use]
    pub const fn extent(&self, direction: SplitDirection) -> f64 {
        match direction {
            SplitDirection::Row => self.width,
            SplitDirection::Column => self.height,
        }
    }
}

/// Classifies a pointer position using the default band width.
///
/// See [`drop_region_with_band`].
#[must_use]
pub fn drop_region(bounds: &Rect, pointer: Point) -> DropRegion {
    drop_region_with_band(bounds, pointer, DROP_REGION_LENGTH_PX)
}

/// Classifies a pointer position within `bounds`.
///
/// Edges are checked in a fixed order (top, bottom, left, right), so a
/// pointer in a corner resolves to the vertical edge. Anything outside every
/// band is `Cover`.
///
/// # Arguments
/// * `bounds` - Bounding box of the hovered region
/// * `pointer` - Pointer position in the same coordinate space
/// * `band` - Width of each edge band in pixels
#[must_use]
pub fn drop_region_with_band(bounds: &Rect, pointer: Point, band: f64) -> DropRegion {
    if pointer.y < bounds.y + band {
        return DropRegion::Top;
    }
    if pointer.y > bounds.y + bounds.height - band {
        return DropRegion::Bottom;
    }
    if pointer.x < bounds.x + band {
        return DropRegion::Left;
    }
    if pointer.x > bounds.x + bounds.width - band {
        return DropRegion::Right;
    }
    DropRegion::Cover
}

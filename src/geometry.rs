//! Geometric primitives and chart dimensions.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by another point's coordinates.
    #[must_use]
    pub fn offset(self, by: Self) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Surface size and margins around the plotting area.
///
/// The plotting area is what remains after subtracting opposing margins:
/// `plot_width = width - left - right`, `plot_height = height - top - bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Total surface width.
    pub width: f32,
    /// Total surface height.
    pub height: f32,
    /// Top margin.
    pub top: f32,
    /// Bottom margin.
    pub bottom: f32,
    /// Left margin.
    pub left: f32,
    /// Right margin.
    pub right: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { width: 900.0, height: 700.0, top: 50.0, bottom: 50.0, left: 60.0, right: 30.0 }
    }
}

impl Dimensions {
    /// Create dimensions with the default margins.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Replace all four margins.
    #[must_use]
    pub fn margins(mut self, top: f32, bottom: f32, left: f32, right: f32) -> Self {
        self.top = top;
        self.bottom = bottom;
        self.left = left;
        self.right = right;
        self
    }

    /// Width of the plotting area.
    #[must_use]
    pub fn plot_width(&self) -> f32 {
        self.width - self.left - self.right
    }

    /// Height of the plotting area.
    #[must_use]
    pub fn plot_height(&self) -> f32 {
        self.height - self.top - self.bottom
    }

    /// Offset of the plotting area inside the surface.
    #[must_use]
    pub fn plot_origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Whether the derived plotting area is non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.plot_width() >= 0.0 && self.plot_height() >= 0.0
    }
}

/// Required total across the four categories.
pub const TOTAL: i32 = 100;

/// Number of life-balance categories. Closed set, not extensible at runtime.
pub const CATEGORY_COUNT: usize = 4;

/// Full turn in degrees.
pub const FULL_CIRCLE: f64 = 360.0;

/// Span above which a wedge must take the long way around the circle.
pub const HALF_CIRCLE: f64 = 180.0;

/// Default canvas edge in SVG user units (square viewport).
pub const DEFAULT_CANVAS: f64 = 300.0;

/// Default pie radius within the canvas.
pub const DEFAULT_RADIUS: f64 = 120.0;

//! Integer geometry used by map views. All values are in view pixels.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The zero point is the archive's marker for "no geometry".
    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rect from the archive's `x,y,width,height` encoding.
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub const fn is_zero(&self) -> bool {
        self.left == 0 && self.top == 0 && self.right == 0 && self.bottom == 0
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }
}

/// Extra control points drawn between two stations of a segment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Spline {
    pub is_spline: bool,
    pub points: Vec<Point>,
}

impl Spline {
    /// A spline without any non-zero point collapses the segment to nothing.
    pub fn is_zero(&self) -> bool {
        self.points.iter().all(Point::is_zero)
    }

    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.points
            .iter_mut()
            .for_each(|point| point.offset(dx, dy));
    }
}

/// An ARGB color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);

    /// Parses an `RRGGBB` hex string into an opaque color.
    pub fn from_hex(value: &str) -> Option<Self> {
        let value = value.trim().trim_start_matches('#');
        let value = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        if value.is_empty() || value.len() > 8 {
            return None;
        }
        let rgb = u32::from_str_radix(value, 16).ok()?;
        Some(Self(0xFF00_0000 | (rgb & 0x00FF_FFFF)))
    }

    pub const fn argb(&self) -> u32 {
        self.0
    }
}

#[test]
fn rect_from_origin_size_test() {
    let rect = Rect::from_origin_size(10, 20, 30, 5);
    assert_eq!(rect, Rect::new(10, 20, 40, 25));
    assert_eq!(rect.width(), 30);
    assert_eq!(rect.height(), 5);
}

#[test]
fn spline_zero_test() {
    let empty = Spline::default();
    assert!(empty.is_zero());

    let zero = Spline {
        is_spline: false,
        points: vec![Point::new(0, 0)],
    };
    assert!(zero.is_zero());

    let real = Spline {
        is_spline: true,
        points: vec![Point::new(0, 0), Point::new(4, 5)],
    };
    assert!(!real.is_zero());
}

#[test]
fn color_from_hex_test() {
    assert_eq!(Color::from_hex("FF0000"), Some(Color(0xFFFF_0000)));
    assert_eq!(Color::from_hex("00ff00"), Some(Color(0xFF00_FF00)));
    assert_eq!(Color::from_hex(""), None);
    assert_eq!(Color::from_hex("zz"), None);
}

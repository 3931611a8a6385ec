use std::fmt;
use std::ops::AddAssign;

/// A length that is either absolute, relative to the parent, or left to layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Dimension {
    Points(f32),
    /// Fraction of the parent in percent, `50.0` being half.
    Percent(f32),
    #[default]
    Auto,
}

impl Dimension {
    pub fn points(value: f32) -> Self {
        Dimension::Points(value)
    }

    pub fn percent(value: f32) -> Self {
        Dimension::Percent(value)
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Dimension::Auto)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Points(value) => write!(f, "{value}pt"),
            Dimension::Percent(value) => write!(f, "{value}%"),
            Dimension::Auto => f.write_str("auto"),
        }
    }
}

impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Dimension::Points(value)
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Dimension::Points(value as f32)
    }
}

impl From<i32> for Dimension {
    fn from(value: i32) -> Self {
        Dimension::Points(value as f32)
    }
}

/// Size constraints for a component. Unset entries leave the axis to layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComponentSize {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
    pub max_width: Option<Dimension>,
    pub max_height: Option<Dimension>,
}

impl ComponentSize {
    pub fn new(width: impl Into<Dimension>, height: impl Into<Dimension>) -> Self {
        Self {
            width: Some(width.into()),
            height: Some(height.into()),
            ..Self::default()
        }
    }

    pub fn points(width: f32, height: f32) -> Self {
        Self::new(Dimension::Points(width), Dimension::Points(height))
    }

    /// Both axes as percentages of the parent.
    pub fn relative(width: f32, height: f32) -> Self {
        Self::new(Dimension::Percent(width), Dimension::Percent(height))
    }

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn min(mut self, width: impl Into<Dimension>, height: impl Into<Dimension>) -> Self {
        self.min_width = Some(width.into());
        self.min_height = Some(height.into());
        self
    }

    pub fn max(mut self, width: impl Into<Dimension>, height: impl Into<Dimension>) -> Self {
        self.max_width = Some(width.into());
        self.max_height = Some(height.into());
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for ComponentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = [
            ("width", self.width),
            ("height", self.height),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("max_width", self.max_width),
            ("max_height", self.max_height),
        ];
        let mut first = true;
        for (name, value) in entries {
            let Some(value) = value else { continue };
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{name}: {value}")?;
        }
        if first {
            f.write_str("unconstrained")?;
        }
        Ok(())
    }
}

/// Insets for each edge of a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn uniform(all: f32) -> Self {
        Self {
            top: all,
            left: all,
            bottom: all,
            right: all,
        }
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            left: horizontal,
            bottom: vertical,
            right: horizontal,
        }
    }

    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl AddAssign for EdgeInsets {
    fn add_assign(&mut self, rhs: Self) {
        self.top += rhs.top;
        self.left += rhs.left;
        self.bottom += rhs.bottom;
        self.right += rhs.right;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Linear RGBA color, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color(0.0, 0.0, 0.0, 0.0);

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color(r, g, b, 1.0)
    }

    /// Builds a color from `0xRRGGBB`.
    pub fn hex(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Color(channel(16), channel(8), channel(0), 1.0)
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Color(self.0, self.1, self.2, alpha)
    }
}

//! Core data types for the camera measuring overlay.
//! Everything here is plain data so it can be exercised without a browser.

/// Largest number of decimals the formatters accept from configuration.
pub const MAX_DECIMALS: usize = 6;

/// A clicked position in the overlay's backing pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(self, other)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Backing resolution of the overlay canvas. Always the video's intrinsic
/// resolution, never its CSS size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// `None` while the video has not reported a usable size yet.
    pub fn from_intrinsic(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }
}

/// On-screen bounding rectangle of the canvas, in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A raw pointer click: viewport coordinates plus the target's rectangle at
/// the time of the click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerClick {
    pub client_x: f64,
    pub client_y: f64,
    pub rect: ViewportRect,
}

pub fn distance(a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Viewport coordinate of a click. Browsers may report fractional
/// `clientX`/`clientY`; the whole-pixel value is used when they do not.
pub fn client_coord(precise: Option<f64>, whole: i32) -> f64 {
    precise.filter(|v| v.is_finite()).unwrap_or(whole as f64)
}

/// Fixed-point text for `value`. Exact ties round away from zero, as
/// `Number.prototype.toFixed` does; `{:.*}` alone would round them to even.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() || decimals > MAX_DECIMALS {
        return format!("{:.*}", decimals, value);
    }
    let Some(q) = tie_rounded_up(value.abs(), decimals) else {
        return format!("{:.*}", decimals, value);
    };
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let pow = 10u128.pow(decimals as u32);
    if decimals == 0 {
        format!("{}{}", sign, q)
    } else {
        format!("{}{}.{:0width$}", sign, q / pow, q % pow, width = decimals)
    }
}

// x = m * 2^e exactly; scaled by 10^decimals it is a tie iff the bits below
// the binary point are exactly one half. Returns the rounded-up integer.
fn tie_rounded_up(x: f64, decimals: usize) -> Option<u128> {
    let bits = x.to_bits();
    let exp = ((bits >> 52) & 0x7ff) as i32;
    let frac = bits & ((1u64 << 52) - 1);
    let (m, e) = if exp == 0 {
        (frac, -1074)
    } else {
        (frac | (1u64 << 52), exp - 1075)
    };
    if m == 0 || e >= 0 {
        return None;
    }
    let k = e.unsigned_abs();
    // m * 10^6 < 2^73, so no tie can sit below 2^-127
    if k >= 127 {
        return None;
    }
    let n = m as u128 * 10u128.pow(decimals as u32);
    let below_point = n & ((1u128 << k) - 1);
    if below_point == 1u128 << (k - 1) {
        Some((n >> k) + 1)
    } else {
        None
    }
}

/// Text shown in the distance readout, e.g. `5.00`.
pub fn format_readout(distance: f64, decimals: usize) -> String {
    to_fixed(distance, decimals)
}

/// Label drawn at the middle of the measured segment, e.g. `5.0px`.
pub fn format_label(distance: f64, decimals: usize, suffix: &str) -> String {
    format!("{}{}", to_fixed(distance, decimals), suffix)
}

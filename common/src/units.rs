use serde::{Deserialize, Serialize};

/// English Metric Units per inch, the native unit of Open XML drawing.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMU per typographic point (1/72 inch).
pub const EMU_PER_POINT: i64 = 12_700;

pub fn emu_from_inches(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

/// DrawingML font sizes are serialized in hundredths of a point
/// (`sz="4000"` is 40 pt).
pub fn centi_points(points: u32) -> u32 {
    points * 100
}

/// An sRGB color, serialized by the writer as an uppercase hex triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

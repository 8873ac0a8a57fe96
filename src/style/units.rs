use serde::{Deserialize, Serialize};

/// Font size in half-points (`w:sz`). Configured in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct HalfPoints(pub u32);

impl HalfPoints {
    pub fn from_points(points: f32) -> Self {
        Self((points * 2.0).round().max(0.0) as u32)
    }

    pub fn points(self) -> f32 {
        self.0 as f32 / 2.0
    }
}

impl From<f32> for HalfPoints {
    fn from(points: f32) -> Self {
        Self::from_points(points)
    }
}

impl From<HalfPoints> for f32 {
    fn from(size: HalfPoints) -> f32 {
        size.points()
    }
}

/// Length in twentieths of a point (twips). Configured in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Twips(pub u32);

impl Twips {
    pub const PER_POINT: f32 = 20.0;
    pub const PER_CM: f32 = 1440.0 / 2.54;

    pub fn from_points(points: f32) -> Self {
        Self((points * Self::PER_POINT).round().max(0.0) as u32)
    }

    /// ```
    /// use tansiq::style::Twips;
    ///
    /// assert_eq!(Twips::from_cm(3.0), Twips(1701));
    /// assert_eq!(Twips::from_cm(2.5), Twips(1417));
    /// ```
    pub fn from_cm(cm: f32) -> Self {
        Self((cm * Self::PER_CM).round().max(0.0) as u32)
    }

    pub fn points(self) -> f32 {
        self.0 as f32 / Self::PER_POINT
    }

    pub fn cm(self) -> f32 {
        self.0 as f32 / Self::PER_CM
    }
}

impl From<f32> for Twips {
    fn from(points: f32) -> Self {
        Self::from_points(points)
    }
}

impl From<Twips> for f32 {
    fn from(length: Twips) -> f32 {
        length.points()
    }
}

/// Serde adapter reading and writing [`Twips`] as centimeters.
pub(crate) mod centimeters {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Twips;

    pub fn serialize<S: Serializer>(value: &Twips, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(value.cm())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Twips, D::Error> {
        f32::deserialize(deserializer).map(Twips::from_cm)
    }
}

/// Line spacing as a multiple of single spacing (`w:line` with
/// `w:lineRule="auto"`, where 240 means one line).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineSpacing(pub f32);

impl LineSpacing {
    pub const SINGLE: LineSpacing = LineSpacing(1.0);
    pub const ONE_AND_HALF: LineSpacing = LineSpacing(1.5);

    /// Finite and above zero.
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// The `w:line` value in 240ths of a line.
    pub fn line_value(self) -> u32 {
        (self.0 * 240.0).round().max(0.0) as u32
    }

    pub fn from_line_value(value: u32) -> Self {
        Self(value as f32 / 240.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_points() {
        assert_eq!(HalfPoints::from_points(18.0), HalfPoints(36));
        assert_eq!(HalfPoints::from_points(10.5), HalfPoints(21));
        assert_eq!(HalfPoints(32).points(), 16.0);
    }

    #[test]
    fn test_twips() {
        assert_eq!(Twips::from_points(12.0), Twips(240));
        assert_eq!(Twips::from_cm(3.0), Twips(1701));
        assert_eq!(Twips::from_cm(2.5), Twips(1417));
        assert_eq!(Twips::from_cm(21.0), Twips(11906));
    }

    #[test]
    fn test_line_spacing() {
        assert_eq!(LineSpacing::ONE_AND_HALF.line_value(), 360);
        assert_eq!(LineSpacing::SINGLE.line_value(), 240);
        assert_eq!(LineSpacing::from_line_value(360), LineSpacing(1.5));
    }
}

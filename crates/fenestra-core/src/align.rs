//! The nine anchors a component can be placed against.
//!
//! An [`Alignment`] is validated where it is parsed: numeric codes go through
//! [`Alignment::from_code`], symbolic `("center", "top")` pairs through
//! [`Alignment::from_parts`] or [`str::parse`]. Anything outside the nine
//! anchors is an [`Error::InvalidAlignment`], there is no fallback anchor.

use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    LeftTop,
    CenterTop,
    RightTop,
    LeftCenter,
    Center,
    RightCenter,
    LeftBottom,
    CenterBottom,
    RightBottom,
}

impl Alignment {
    pub const ALL: [Alignment; 9] = [
        Alignment::LeftTop,
        Alignment::CenterTop,
        Alignment::RightTop,
        Alignment::LeftCenter,
        Alignment::Center,
        Alignment::RightCenter,
        Alignment::LeftBottom,
        Alignment::CenterBottom,
        Alignment::RightBottom,
    ];

    pub fn new(h: HAlign, v: VAlign) -> Self {
        use Alignment::*;
        match (h, v) {
            (HAlign::Left, VAlign::Top) => LeftTop,
            (HAlign::Center, VAlign::Top) => CenterTop,
            (HAlign::Right, VAlign::Top) => RightTop,
            (HAlign::Left, VAlign::Center) => LeftCenter,
            (HAlign::Center, VAlign::Center) => Center,
            (HAlign::Right, VAlign::Center) => RightCenter,
            (HAlign::Left, VAlign::Bottom) => LeftBottom,
            (HAlign::Center, VAlign::Bottom) => CenterBottom,
            (HAlign::Right, VAlign::Bottom) => RightBottom,
        }
    }

    /// Row-major codes: 0 = left/top ... 4 = center ... 8 = right/bottom.
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| Error::InvalidAlignment(format!("code {code}")))
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parses a `(horizontal, vertical)` pair such as `("center", "top")`.
    pub fn from_parts(horizontal: &str, vertical: &str) -> Result<Self> {
        let h = match horizontal.trim() {
            "left" => HAlign::Left,
            "center" => HAlign::Center,
            "right" => HAlign::Right,
            other => return Err(Error::InvalidAlignment(format!("horizontal '{other}'"))),
        };
        let v = match vertical.trim() {
            "top" => VAlign::Top,
            "center" => VAlign::Center,
            "bottom" => VAlign::Bottom,
            other => return Err(Error::InvalidAlignment(format!("vertical '{other}'"))),
        };
        Ok(Self::new(h, v))
    }

    pub fn horizontal(self) -> HAlign {
        match self.code() % 3 {
            0 => HAlign::Left,
            1 => HAlign::Center,
            _ => HAlign::Right,
        }
    }

    pub fn vertical(self) -> VAlign {
        match self.code() / 3 {
            0 => VAlign::Top,
            1 => VAlign::Center,
            _ => VAlign::Bottom,
        }
    }
}

impl TryFrom<u8> for Alignment {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}

/// Accepts `"center"` alone or a `"<horizontal> <vertical>"` pair,
/// separated by whitespace, `-` or `,`.
impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "center" {
            return Ok(Alignment::Center);
        }
        let mut parts = s
            .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
            .filter(|p| !p.is_empty());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(v), None) => Self::from_parts(h, v),
            _ => Err(Error::InvalidAlignment(format!("'{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_all_anchors() {
        for (i, a) in Alignment::ALL.iter().enumerate() {
            assert_eq!(Alignment::from_code(i as u8).unwrap(), *a);
            assert_eq!(a.code(), i as u8);
        }
        assert!(matches!(
            Alignment::from_code(9),
            Err(Error::InvalidAlignment(_))
        ));
    }

    #[test]
    fn parses_symbolic_pairs() {
        assert_eq!(
            Alignment::from_parts("center", "top").unwrap(),
            Alignment::CenterTop
        );
        assert_eq!(
            "right bottom".parse::<Alignment>().unwrap(),
            Alignment::RightBottom
        );
        assert_eq!("center".parse::<Alignment>().unwrap(), Alignment::Center);
        assert!("middle top".parse::<Alignment>().is_err());
        assert!("left".parse::<Alignment>().is_err());
        assert!("left top bottom".parse::<Alignment>().is_err());
    }

    #[test]
    fn splits_into_axes() {
        assert_eq!(Alignment::RightCenter.horizontal(), HAlign::Right);
        assert_eq!(Alignment::RightCenter.vertical(), VAlign::Center);
        assert_eq!(Alignment::CenterBottom.horizontal(), HAlign::Center);
        assert_eq!(Alignment::CenterBottom.vertical(), VAlign::Bottom);
    }
}

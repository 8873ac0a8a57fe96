use serde::{Deserialize, Serialize};

use super::Twips;
use super::units::centimeters;

/// The side of the page where sheets are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingSide {
    Left,
    /// Right-to-left documents are bound on the right.
    #[default]
    Right,
}

/// Page margins, in centimeters in configuration files.
///
/// The binding margin is a named parameter of its own and must be the
/// widest of the four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMargins {
    #[serde(with = "centimeters")]
    pub top: Twips,
    #[serde(with = "centimeters")]
    pub bottom: Twips,
    #[serde(with = "centimeters")]
    pub binding: Twips,
    /// The side opposite the binding.
    #[serde(with = "centimeters")]
    pub outer: Twips,
    #[serde(with = "centimeters")]
    pub header: Twips,
    #[serde(with = "centimeters")]
    pub footer: Twips,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            top: Twips(1417),
            bottom: Twips(1417),
            binding: Twips(1701),
            outer: Twips(1417),
            header: Twips(709),
            footer: Twips(709),
        }
    }
}

/// Margins mapped onto physical page sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedMargins {
    pub top: Twips,
    pub right: Twips,
    pub bottom: Twips,
    pub left: Twips,
    pub header: Twips,
    pub footer: Twips,
}

/// Page size, margins, and binding side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    #[serde(with = "centimeters")]
    pub width: Twips,
    #[serde(with = "centimeters")]
    pub height: Twips,
    pub binding_side: BindingSide,
    pub margins: PageMargins,
}

impl Default for PageGeometry {
    /// A4 portrait, bound on the right.
    fn default() -> Self {
        Self {
            width: Twips(11906),
            height: Twips(16838),
            binding_side: BindingSide::Right,
            margins: PageMargins::default(),
        }
    }
}

impl PageGeometry {
    pub fn resolved_margins(&self) -> ResolvedMargins {
        let m = &self.margins;
        let (right, left) = match self.binding_side {
            BindingSide::Right => (m.binding, m.outer),
            BindingSide::Left => (m.outer, m.binding),
        };
        ResolvedMargins {
            top: m.top,
            right,
            bottom: m.bottom,
            left,
            header: m.header,
            footer: m.footer,
        }
    }

    /// True when the binding margin is strictly wider than the other three.
    pub fn binding_is_widest(&self) -> bool {
        let m = &self.margins;
        m.binding > m.top && m.binding > m.bottom && m.binding > m.outer
    }
}

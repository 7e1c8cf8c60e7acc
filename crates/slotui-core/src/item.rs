//! The [`Item`] display payload occupying a single surface slot.

/// A display item: a glyph identifying it visually plus a human label.
///
/// Items are pure payload; how a host renders them is up to the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub glyph: char,
    pub label: String,
}

impl Item {
    /// Create a new item.
    pub fn new(glyph: char, label: impl Into<String>) -> Self {
        Self {
            glyph,
            label: label.into(),
        }
    }

    /// Set the glyph (builder).
    #[inline]
    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    /// Set the label (builder).
    #[inline]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain() {
        let item = Item::new('s', "Sword").with_glyph('S').with_label("Long Sword");
        assert_eq!(item.glyph, 'S');
        assert_eq!(item.label, "Long Sword");
    }
}

//! Logical color pairs and the attribute registry.

use std::collections::HashMap;

use crate::core::screen::{Attr, Screen};

/// A foreground/background color pair; `-1` selects the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub foreground: i16,
    pub background: i16,
}

impl ColorPair {
    pub const fn new(foreground: i16, background: i16) -> Self {
        Self {
            foreground,
            background,
        }
    }

    /// A pair over the terminal's default background.
    pub const fn fg(foreground: i16) -> Self {
        Self::new(foreground, -1)
    }
}

pub const DEFAULT: ColorPair = ColorPair::fg(-1);
pub const BLACK: ColorPair = ColorPair::fg(0);
pub const RED: ColorPair = ColorPair::fg(1);
pub const GREEN: ColorPair = ColorPair::fg(2);
pub const YELLOW: ColorPair = ColorPair::fg(3);
pub const BLUE: ColorPair = ColorPair::fg(4);
pub const MAGENTA: ColorPair = ColorPair::fg(5);
pub const CYAN: ColorPair = ColorPair::fg(6);
pub const WHITE: ColorPair = ColorPair::fg(7);

/// Caller-owned registry mapping logical pairs to backend attributes.
///
/// There is no process-global table; whoever resolves colors at paint time
/// owns a `Palette` and passes it where it is needed.
#[derive(Debug, Default)]
pub struct Palette {
    pairs: HashMap<ColorPair, Attr>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pair` with the backend.
    ///
    /// Returns `false` when the backend rejects the pair; the failure is
    /// logged and later lookups fall back to the default attribute.
    pub fn register(&mut self, screen: &mut dyn Screen, pair: ColorPair) -> bool {
        match screen.register_color_pair(pair) {
            Some(attr) => {
                self.pairs.insert(pair, attr);
                true
            }
            None => {
                tracing::warn!(
                    foreground = pair.foreground,
                    background = pair.background,
                    "failed to register color pair"
                );
                false
            }
        }
    }

    /// The attribute for `pair`, registering it on first use.
    ///
    /// The all-default pair is always attribute 0. A pair the backend cannot
    /// register resolves to the default attribute.
    pub fn attr(&mut self, screen: &mut dyn Screen, pair: ColorPair) -> Attr {
        if pair == DEFAULT {
            return Attr::default();
        }
        if let Some(attr) = self.pairs.get(&pair) {
            return *attr;
        }
        if self.register(screen, pair) {
            self.pairs[&pair]
        } else {
            Attr::default()
        }
    }

    /// Number of pairs registered so far.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorPair, Palette, DEFAULT, RED};
    use crate::testing::TestScreen;

    #[test]
    fn default_pair_is_attribute_zero_without_registration() {
        let mut screen = TestScreen::new(10, 10);
        let mut palette = Palette::new();

        assert_eq!(palette.attr(&mut screen, DEFAULT).0, 0);
        assert!(screen.registered_pairs().is_empty());
    }

    #[test]
    fn attr_registers_once_and_caches() {
        let mut screen = TestScreen::new(10, 10);
        let mut palette = Palette::new();

        let first = palette.attr(&mut screen, RED);
        let second = palette.attr(&mut screen, RED);

        assert_eq!(first, second);
        assert_eq!(screen.registered_pairs(), &[RED]);
    }

    #[test]
    fn rejected_registration_falls_back_to_default() {
        let mut screen = TestScreen::new(10, 10);
        screen.reject_color_pairs(true);
        let mut palette = Palette::new();

        let attr = palette.attr(&mut screen, ColorPair::new(3, 5));
        assert_eq!(attr.0, 0);
        assert!(palette.is_empty());
    }
}

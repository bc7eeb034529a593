//! RGB colors and the named color table.

use lumen_math::DVec3;

/// RGB color type (linear, nominally in [0, 1] but unclamped).
pub type Color = DVec3;

/// Shorthand constructor, mirroring `point` / `vector`.
#[inline]
pub const fn color(r: f64, g: f64, b: f64) -> Color {
    DVec3::new(r, g, b)
}

/// Read-only table of named colors.
pub mod colors {
    use super::{color, Color};

    pub const BLACK: Color = color(0.0, 0.0, 0.0);
    pub const WHITE: Color = color(1.0, 1.0, 1.0);
    pub const RED: Color = color(1.0, 0.0, 0.0);
    pub const GREEN: Color = color(0.0, 1.0, 0.0);
    pub const BLUE: Color = color(0.0, 0.0, 1.0);
    pub const YELLOW: Color = color(1.0, 1.0, 0.0);
    pub const CYAN: Color = color(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = color(1.0, 0.0, 1.0);
    pub const ORANGE: Color = color(1.0, 0.5, 0.0);
    pub const PURPLE: Color = color(0.5, 0.0, 0.5);
    pub const BROWN: Color = color(0.5, 0.25, 0.0);
    pub const GRAY: Color = color(0.5, 0.5, 0.5);
    pub const DARK_GRAY: Color = color(0.25, 0.25, 0.25);
    pub const LIGHT_GRAY: Color = color(0.75, 0.75, 0.75);

    const TABLE: &[(&str, Color)] = &[
        ("black", BLACK),
        ("white", WHITE),
        ("red", RED),
        ("green", GREEN),
        ("blue", BLUE),
        ("yellow", YELLOW),
        ("cyan", CYAN),
        ("magenta", MAGENTA),
        ("orange", ORANGE),
        ("purple", PURPLE),
        ("brown", BROWN),
        ("gray", GRAY),
        ("grey", GRAY),
        ("dark_gray", DARK_GRAY),
        ("light_gray", LIGHT_GRAY),
    ];

    /// Look up a color by name, ignoring case and treating spaces and
    /// dashes as underscores.
    pub fn by_name(name: &str) -> Option<Color> {
        let key: String = name
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        TABLE.iter().find(|(n, _)| *n == key).map(|(_, c)| *c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_arithmetic() {
        let a = color(0.9, 0.6, 0.75);
        let b = color(0.7, 0.1, 0.25);
        assert!((a + b - color(1.6, 0.7, 1.0)).length() < 1e-9);
        assert!((a - b - color(0.2, 0.5, 0.5)).length() < 1e-9);
        assert_eq!(color(0.2, 0.3, 0.4) * 2.0, color(0.4, 0.6, 0.8));
        // Hadamard product
        let c = color(1.0, 0.2, 0.4) * color(0.9, 1.0, 0.1);
        assert!((c - color(0.9, 0.2, 0.04)).length() < 1e-9);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(colors::by_name("White"), Some(colors::WHITE));
        assert_eq!(colors::by_name("light gray"), Some(colors::LIGHT_GRAY));
        assert_eq!(colors::by_name("Dark-Gray"), Some(colors::DARK_GRAY));
        assert_eq!(colors::by_name("grey"), colors::by_name("gray"));
        assert_eq!(colors::by_name("chartreuse"), None);
    }
}

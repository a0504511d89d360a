//! Built-in presentation themes. Each theme is a fixed bundle of colors,
//! fonts, sizes, and layout metrics applied uniformly to a deck.

use crate::units::Rgb;

/// 10 x 7.5 in canvas, in EMU.
pub const SLIDE_WIDTH_EMU: i64 = 9_144_000;
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgb,
    pub title_color: Rgb,
    pub text_color: Rgb,
    pub accent_color: Rgb,
    pub font_family: &'static str,
    /// Font sizes in points.
    pub title_size: u32,
    pub subtitle_size: u32,
    pub body_size: u32,
    pub bullet_size: u32,
    /// Layout metrics in EMU.
    pub margin: i64,
    pub image_width: i64,
    pub image_height: i64,
}

pub static THEMES: [Theme; 6] = [
    Theme {
        name: "modern",
        background: Rgb(250, 250, 250),
        title_color: Rgb(33, 33, 33),
        text_color: Rgb(66, 66, 66),
        accent_color: Rgb(0, 122, 255),
        font_family: "Montserrat",
        title_size: 40,
        subtitle_size: 28,
        body_size: 24,
        bullet_size: 22,
        margin: 914_400,
        image_width: 3_657_600,
        image_height: 2_743_200,
    },
    Theme {
        name: "dark",
        background: Rgb(33, 33, 33),
        title_color: Rgb(255, 255, 255),
        text_color: Rgb(200, 200, 200),
        accent_color: Rgb(0, 199, 190),
        font_family: "Roboto",
        title_size: 40,
        subtitle_size: 28,
        body_size: 24,
        bullet_size: 22,
        margin: 914_400,
        image_width: 3_657_600,
        image_height: 2_743_200,
    },
    Theme {
        name: "nature",
        background: Rgb(245, 245, 240),
        title_color: Rgb(46, 64, 46),
        text_color: Rgb(64, 64, 64),
        accent_color: Rgb(76, 175, 80),
        font_family: "Open Sans",
        title_size: 40,
        subtitle_size: 28,
        body_size: 24,
        bullet_size: 22,
        margin: 914_400,
        image_width: 3_657_600,
        image_height: 2_743_200,
    },
    Theme {
        name: "coding",
        background: Rgb(30, 32, 34),
        title_color: Rgb(80, 250, 123),
        text_color: Rgb(248, 248, 242),
        accent_color: Rgb(139, 233, 253),
        font_family: "Consolas",
        title_size: 40,
        subtitle_size: 28,
        body_size: 22,
        bullet_size: 20,
        margin: 640_080,
        image_width: 3_200_400,
        image_height: 2_468_880,
    },
    Theme {
        name: "academic",
        background: Rgb(255, 255, 255),
        title_color: Rgb(20, 20, 140),
        text_color: Rgb(50, 50, 50),
        accent_color: Rgb(100, 100, 255),
        font_family: "Times New Roman",
        title_size: 44,
        subtitle_size: 30,
        body_size: 26,
        bullet_size: 24,
        margin: 1_097_280,
        image_width: 3_474_720,
        image_height: 2_560_320,
    },
    Theme {
        name: "creative",
        background: Rgb(255, 240, 230),
        title_color: Rgb(150, 50, 0),
        text_color: Rgb(80, 40, 0),
        accent_color: Rgb(255, 150, 50),
        font_family: "Georgia",
        title_size: 42,
        subtitle_size: 28,
        body_size: 23,
        bullet_size: 21,
        margin: 822_960,
        image_width: 3_840_480,
        image_height: 2_834_640,
    },
];

impl Theme {
    /// Look a theme up by name. Unknown names return `None`; callers decide
    /// whether that is a hard error (HTTP 400) or a silent default.
    pub fn get(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.name == name)
    }

    pub fn default_theme() -> &'static Theme {
        &THEMES[0]
    }

    pub fn names() -> Vec<&'static str> {
        THEMES.iter().map(|t| t.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_theme_resolves() {
        for name in ["modern", "dark", "nature", "coding", "academic", "creative"] {
            assert!(Theme::get(name).is_some(), "missing theme {name}");
        }
    }

    #[test]
    fn unknown_theme_is_none() {
        assert!(Theme::get("vaporwave").is_none());
        assert!(Theme::get("").is_none());
    }

    #[test]
    fn default_theme_is_modern() {
        assert_eq!(Theme::default_theme().name, "modern");
    }
}

//! Theme and chip color conversion.

use ratatui::style::Color;
use tracing::warn;

/// Colors used by the editor chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Border and label color.
    pub fg: Color,
    /// Focused element highlight.
    pub highlight: Color,
    /// Error line color.
    pub error: Color,
    /// Dimmed text (hints, empty state).
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
        }
    }
}

/// Parse a configured color string.
///
/// Accepts `#RRGGBB`, `#RGB` and the basic terminal color names. Returns
/// `None` for anything else.
pub fn parse_color(color: &str) -> Option<Color> {
    let s = color.trim().to_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let named = match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "orange" => Color::Rgb(0xFF, 0xA5, 0x00),
        _ => return None,
    };
    Some(named)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let mut channels = [0u8; 3];
            for (i, channel) in channels.iter_mut().enumerate() {
                let v = u8::from_str_radix(&hex[i..i + 1], 16).ok()?;
                *channel = (v << 4) | v;
            }
            Some(Color::Rgb(channels[0], channels[1], channels[2]))
        }
        _ => None,
    }
}

/// Background color for a chip.
///
/// Unparseable colors are logged and drawn in the default chip color.
pub fn chip_background(color: &str) -> Color {
    parse_color(color).unwrap_or_else(|| {
        warn!(color = %color, "Unrecognized chip color");
        Color::Rgb(0xF5, 0x9F, 0x27)
    })
}

/// Readable text color on top of a chip background.
pub fn chip_foreground(background: Color) -> Color {
    match background {
        Color::Rgb(r, g, b) => {
            let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
            if luma > 150_000 {
                Color::Black
            } else {
                Color::White
            }
        }
        Color::Yellow | Color::White | Color::Cyan | Color::Green | Color::Gray => Color::Black,
        _ => Color::White,
    }
}

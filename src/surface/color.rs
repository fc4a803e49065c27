//! CSS-style color strings, the format the toolbar and config speak.

use image::Rgba;

const NAMED: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("transparent", [0, 0, 0, 0]),
];

/// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()` or a basic
/// named color. Returns `None` for anything else.
pub fn parse_color(input: &str) -> Option<Rgba<u8>> {
    let value = input.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = value.strip_prefix("rgba(").and_then(|rest| rest.strip_suffix(')')) {
        return parse_functional(args, true);
    }
    if let Some(args) = value.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
        return parse_functional(args, false);
    }

    NAMED
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, rgba)| Rgba(*rgba))
}

/// Formats a color the way the toolbar emits it.
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, 255])),
        4 => Some(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?])),
        6 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, 255])),
        8 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
        _ => None,
    }
}

fn parse_functional(args: &str, with_alpha: bool) -> Option<Rgba<u8>> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let channel = |s: &str| -> Option<u8> {
        let v: f32 = s.parse().ok()?;
        v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = if with_alpha {
        let a: f32 = parts[3].parse().ok()?;
        if !a.is_finite() {
            return None;
        }
        (a.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        255
    };

    Some(Rgba([channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse_color("#000"), Some(Rgba([0, 0, 0, 255])));
        assert_eq!(parse_color("#ff0000"), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color(" #F00 "), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("#00ff0080"), Some(Rgba([0, 255, 0, 128])));
        assert_eq!(parse_color("#1234"), Some(Rgba([0x11, 0x22, 0x33, 0x44])));
    }

    #[test]
    fn test_functional_and_named() {
        assert_eq!(parse_color("rgb(10, 20, 30)"), Some(Rgba([10, 20, 30, 255])));
        assert_eq!(parse_color("rgba(10,20,30,0.5)"), Some(Rgba([10, 20, 30, 128])));
        assert_eq!(parse_color("Blue"), Some(Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn test_malformed_colors() {
        for bad in ["", "#", "#ff", "#gggggg", "rgb(1,2)", "rgb(a,b,c)", "chartreuse-ish", "#ff00000"] {
            assert_eq!(parse_color(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(Rgba([255, 0, 16, 255])), "#ff0010");
        assert_eq!(to_hex(Rgba([0, 0, 0, 0])), "#00000000");
    }
}

//! Map story palette tokens to terminal colours.
//!
//! Manifests name speaker colours the way a web stylesheet would:
//! `text-red-400`, a bare colour name such as `amber`, or a hex code.

use colored::Color;

/// Terminal colour for a palette token, if it names one we know.
pub fn color_for(token: &str) -> Option<Color> {
    let token = token.trim();
    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex);
    }

    let name = token.strip_prefix("text-").unwrap_or(token);
    let (base, shade) = match name.rsplit_once('-') {
        Some((base, shade)) if !shade.is_empty() && shade.bytes().all(|b| b.is_ascii_digit()) => {
            (base, shade.parse::<u16>().ok())
        }
        _ => (name, None),
    };
    let light = shade.is_some_and(|s| s <= 400);

    let color = match base {
        "red" | "rose" => pick(light, Color::BrightRed, Color::Red),
        "orange" | "amber" | "yellow" => pick(light, Color::BrightYellow, Color::Yellow),
        "green" | "emerald" | "lime" | "teal" => pick(light, Color::BrightGreen, Color::Green),
        "blue" | "sky" | "indigo" => pick(light, Color::BrightBlue, Color::Blue),
        "cyan" => pick(light, Color::BrightCyan, Color::Cyan),
        "purple" | "violet" | "fuchsia" | "pink" => {
            pick(light, Color::BrightMagenta, Color::Magenta)
        }
        "gray" | "grey" | "slate" | "zinc" | "neutral" | "stone" => {
            pick(light, Color::White, Color::BrightBlack)
        }
        "white" => Color::BrightWhite,
        "black" => Color::Black,
        _ => return None,
    };
    Some(color)
}

fn pick(light: bool, bright: Color, normal: Color) -> Color {
    if light { bright } else { normal }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
    Some(Color::TrueColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

use eframe::egui::Color32;

pub const PANEL: &str = "#1c1c1c";
pub const PANEL_LIGHT: &str = "#2b2b2b";
pub const SAVE: &str = "#4caf50";
pub const DIRECTORY: &str = "#2196f3";
pub const CLOSE: &str = "#f44336";
pub const LINK: &str = "#8ab4f8";

pub trait ColorExt {
    /// `#rrggbb` or `#rrggbbaa`.
    fn parse_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;
}

impl ColorExt for Color32 {
    fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let r = channel(0)?;
        let g = channel(2)?;
        let b = channel(4)?;
        let a = if hex.len() == 8 { channel(6)? } else { 255 };

        Some(Color32::from_rgba_unmultiplied(r, g, b, a))
    }
}

/// Palette lookup; a typo in a constant shows up as magenta.
pub fn color(hex: &str) -> Color32 {
    Color32::parse_hex(hex).unwrap_or(Color32::from_rgb(255, 0, 255))
}

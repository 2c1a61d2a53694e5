use ratatui::style::Color;

use crate::model::record::PriorityBucket;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub overlay_border: Color,
    pub statusbar_bg: Color,
    pub status_err: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub sparkline_color: Color,
    pub selection_bg: Color,
    pub bucket_high: Color,
    pub bucket_normal: Color,
    pub bucket_low: Color,
    pub bucket_other: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn bucket_color(&self, bucket: PriorityBucket) -> Color {
        match bucket {
            PriorityBucket::High => self.bucket_high,
            PriorityBucket::Normal => self.bucket_normal,
            PriorityBucket::Low => self.bucket_low,
            PriorityBucket::Other => self.bucket_other,
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            overlay_border: Color::DarkGray,
            statusbar_bg: Color::DarkGray,
            status_err: Color::Red,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            sparkline_color: Color::Rgb(251, 146, 60),
            selection_bg: Color::Rgb(51, 65, 85),
            bucket_high: Color::Rgb(239, 68, 68),
            bucket_normal: Color::Rgb(148, 163, 184),
            bucket_low: Color::Rgb(16, 185, 129),
            bucket_other: Color::Rgb(168, 85, 247),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            overlay_border: Color::Gray,
            statusbar_bg: Color::Gray,
            status_err: Color::Rgb(153, 27, 27),
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Gray,
            sparkline_color: Color::Rgb(194, 65, 12),
            selection_bg: Color::Rgb(203, 213, 225),
            bucket_high: Color::Rgb(185, 28, 28),
            bucket_normal: Color::Rgb(71, 85, 105),
            bucket_low: Color::Rgb(4, 120, 87),
            bucket_other: Color::Rgb(126, 34, 206),
        }
    }
}

use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 94, g: 196, b: 233 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 175, b: 95 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 210, g: 210, b: 210 };

pub const IPV4_ADDR: Color = Color::TrueColor { r: 135, g: 215, b: 135 };
pub const IPV4_PREFIX: Color = Color::TrueColor { r: 95, g: 175, b: 95 };
pub const NETMASK: Color = Color::TrueColor { r: 175, g: 135, b: 215 };

pub const ALIVE: Color = Color::Green;
pub const LOST: Color = Color::Red;

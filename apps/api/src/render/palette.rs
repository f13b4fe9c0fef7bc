//! Colours used by the templates.

use crate::render::tree::Color;

pub const WHITE: Color = Color::rgb(255, 255, 255);

pub const GRAY_50: Color = Color::rgb(249, 250, 251);
pub const GRAY_200: Color = Color::rgb(229, 231, 235);
pub const GRAY_400: Color = Color::rgb(156, 163, 175);
pub const GRAY_500: Color = Color::rgb(107, 114, 128);
pub const GRAY_600: Color = Color::rgb(75, 85, 99);
pub const GRAY_700: Color = Color::rgb(55, 65, 81);
pub const GRAY_800: Color = Color::rgb(31, 41, 55);
pub const GRAY_900: Color = Color::rgb(17, 24, 39);

pub const BLUE_100: Color = Color::rgb(219, 234, 254);
pub const BLUE_600: Color = Color::rgb(37, 99, 235);
pub const BLUE_800: Color = Color::rgb(30, 64, 175);
pub const PURPLE_600: Color = Color::rgb(147, 51, 234);

/// Translucent tint for technology chips; composited over the card below.
pub const BLUE_TINT: Color = Color::rgba(59, 130, 246, 40);

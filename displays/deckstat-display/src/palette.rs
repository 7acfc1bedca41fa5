//! Panel colors

use embedded_graphics::pixelcolor::Rgb565;

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Labels and header
pub const GREEN: Rgb565 = Rgb565::new(0, 63, 0);

/// Frame and dividers
pub const DARK_GREY: Rgb565 = Rgb565::new(15, 31, 15);

/// CPU bar
pub const PURPLE: Rgb565 = Rgb565::new(15, 0, 15);

/// RAM bar
pub const RED: Rgb565 = Rgb565::new(31, 0, 0);

/// Rain head
pub const RAIN_HEAD: Rgb565 = Rgb565::new(21, 63, 5);

/// Rain trail
pub const RAIN_TRAIL: Rgb565 = Rgb565::new(0, 32, 0);

//! Dashboard renderer
//!
//! Layout on the 320x240 panel:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │[user@host] //STATUS                  │  header, redrawn on change
//! ├──────────────────────────────────────┤  y = 28
//! │TIME   2026-02-27 13:45:12            │
//! │IP     LAN 10.0.0.2                   │  IP block, redrawn on change
//! │       WAN 203.0.113.7                │
//! │CPU    [██████░░░░░░░░░░]  37.5%      │
//! │RAM    [███████████░░░░░]  68.1%      │
//! └──────────────────────────────────────┘
//! ```
//!
//! Labels and the frame are static and drawn once per dashboard entry. The
//! header and IP block are cached and only repainted when their text
//! changes; every other value row clears just its own rectangle and redraws
//! on each dashboard tick.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use deckstat_core::config::{Widget, WidgetRow};
use deckstat_core::stats::{Identity, StatsRecord, IP_LEN};
use deckstat_protocol::Key;

use crate::backend::{Canvas, DisplayError, TextSize, TextStyle};
use crate::palette;

/// Left edge of the row labels
const LABEL_X: i32 = 4;

/// Left edge of the row values
const VALUE_X: i32 = 72;

/// Width of a value row (to the inner frame edge)
const VALUE_WIDTH: u32 = 244;

/// Header divider
const HEADER_RULE_Y: i32 = 28;

/// Header band inside the frame
const HEADER_AREA: Rectangle = Rectangle::new(Point::new(3, 3), Size::new(314, 22));

/// Header text origin
const HEADER_ORIGIN: Point = Point::new(4, 4);

/// Percentage bar geometry
const BAR_WIDTH: u32 = 170;
const BAR_HEIGHT: u32 = 18;

/// Gap between a bar and its percentage text
const BAR_TEXT_GAP: i32 = 8;

/// Distance between scanlines over a bar fill
const SCANLINE_PITCH: usize = 4;

/// Header text capacity
const HEADER_LEN: usize = 80;

const HEADER_SUFFIX: &str = " //STATUS";

const LABEL_STYLE: TextStyle = TextStyle::new(palette::GREEN, TextSize::Large).on(palette::BLACK);
const VALUE_STYLE: TextStyle = TextStyle::new(palette::WHITE, TextSize::Large).on(palette::BLACK);

/// Width of the filled part of a bar whose inner width is `inner_width`
///
/// `percent` is clamped to 0..=100; NaN counts as 0.
pub fn bar_fill_width(percent: f32, inner_width: u32) -> u32 {
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };
    ((percent / 100.0) * inner_width as f32) as u32
}

/// Percentage as shown next to a bar, `{:5.1}%` of the clamped value
fn format_percent(percent: f32) -> String<8> {
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };
    let mut text = String::new();
    let _ = write!(text, "{:5.1}%", percent);
    text
}

fn row_label(widget: Widget) -> &'static str {
    match widget {
        Widget::Time => "TIME",
        Widget::Ip => "IP",
        Widget::Load => "LOAD",
        Widget::Net => "NET",
        Widget::Temp => "TEMP",
        Widget::Cpu => "CPU",
        Widget::Ram => "RAM",
    }
}

/// Leading part of `text` that is at most `max_chars` characters long
fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Characters of `size` text that fit in `width` pixels
fn chars_in<C: Canvas>(canvas: &C, width: u32) -> usize {
    (width / canvas.glyph_size(TextSize::Large).width.max(1)) as usize
}

/// Header line for a record, cut to the width of the header band
fn header_text(record: &StatsRecord, max_chars: usize) -> String<HEADER_LEN> {
    let mut full: String<HEADER_LEN> = String::new();
    let _ = match record.identity() {
        Identity::UserAtHost(user, host) => write!(full, "[{}@{}]", user, host),
        Identity::Host(host) => write!(full, "[{}]", host),
        Identity::Unknown => write!(full, "[no-host]"),
    };
    let _ = full.push_str(HEADER_SUFFIX);

    let mut text = String::new();
    let _ = text.push_str(clip(&full, max_chars));
    text
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IpCache {
    local: String<IP_LEN>,
    public: String<IP_LEN>,
}

/// Dashboard drawing with change detection for the header and IP block
#[derive(Debug, Clone, Default)]
pub struct DashboardRenderer {
    header: Option<String<HEADER_LEN>>,
    ips: Option<IpCache>,
}

impl DashboardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what was last drawn so the next draw repaints everything
    pub fn invalidate(&mut self) {
        self.header = None;
        self.ips = None;
    }

    /// Draw the static frame and labels, then invalidate the caches
    pub fn draw_frame<C: Canvas>(&mut self, canvas: &mut C, layout: &[WidgetRow]) -> Result<(), DisplayError> {
        self.invalidate();

        let size = canvas.size();
        canvas.clear(palette::BLACK)?;
        canvas.draw_rect(Rectangle::new(Point::zero(), size), palette::DARK_GREY)?;
        canvas.draw_rect(
            Rectangle::new(Point::new(2, 2), size.saturating_sub(Size::new(4, 4))),
            palette::DARK_GREY,
        )?;
        canvas.draw_hline(Point::new(0, HEADER_RULE_Y), size.width, palette::DARK_GREY)?;

        for row in layout {
            canvas.draw_text(row_label(row.widget), Point::new(LABEL_X, row.y), LABEL_STYLE)?;
        }
        Ok(())
    }

    /// Draw the dynamic values
    ///
    /// `phase` drives the bar scanline flourish.
    pub fn draw<C: Canvas>(
        &mut self,
        canvas: &mut C,
        record: &StatsRecord,
        layout: &[WidgetRow],
        phase: u8,
    ) -> Result<(), DisplayError> {
        self.draw_header(canvas, record)?;

        for row in layout {
            match row.widget {
                Widget::Time => {
                    let text = if record.time.is_empty() { "waiting..." } else { record.time.as_str() };
                    draw_value_row(canvas, row.y, text)?;
                }
                Widget::Ip => self.draw_ips(canvas, record, row.y)?,
                Widget::Load => {
                    let mut text: String<32> = String::new();
                    let _ = write!(
                        text,
                        "{:5.2} {:5.2} {:5.2}",
                        record.load_1, record.load_5, record.load_15
                    );
                    draw_value_row(canvas, row.y, &text)?;
                }
                Widget::Net => {
                    let mut text: String<32> = String::new();
                    if record.has(Key::NetUpMbps) || record.has(Key::NetDownMbps) {
                        let _ = write!(
                            text,
                            "U{:6.2} D{:6.2}",
                            record.net_up_mbps, record.net_down_mbps
                        );
                    } else {
                        let _ = text.push_str("-");
                    }
                    draw_value_row(canvas, row.y, &text)?;
                }
                Widget::Temp => {
                    let mut text: String<16> = String::new();
                    if record.has(Key::CpuTempC) && record.cpu_temp_c > 0.0 {
                        let _ = write!(text, "{:5.1} C", record.cpu_temp_c);
                    } else {
                        let _ = text.push_str("-");
                    }
                    draw_value_row(canvas, row.y, &text)?;
                }
                Widget::Cpu => {
                    let text = format_percent(record.cpu);
                    draw_bar_row(canvas, row.y, record.cpu, &text, palette::PURPLE, phase)?;
                }
                Widget::Ram => {
                    let text = if record.has_ram_total() {
                        format_percent(record.ram_percent)
                    } else {
                        let mut text = String::new();
                        let _ = text.push_str("--.-%");
                        text
                    };
                    draw_bar_row(canvas, row.y, record.ram_percent, &text, palette::RED, phase)?;
                }
            }
        }
        Ok(())
    }

    fn draw_header<C: Canvas>(&mut self, canvas: &mut C, record: &StatsRecord) -> Result<(), DisplayError> {
        let max_chars = chars_in(canvas, HEADER_AREA.size.width - 1);
        let text = header_text(record, max_chars);
        if self.header.as_ref() == Some(&text) {
            return Ok(());
        }

        canvas.fill_rect(HEADER_AREA, palette::BLACK)?;
        canvas.draw_text(&text, HEADER_ORIGIN, LABEL_STYLE)?;
        self.header = Some(text);
        Ok(())
    }

    fn draw_ips<C: Canvas>(&mut self, canvas: &mut C, record: &StatsRecord, y: i32) -> Result<(), DisplayError> {
        let current = IpCache {
            local: record.local_ip.clone(),
            public: record.public_ip.clone(),
        };
        if self.ips.as_ref() == Some(&current) {
            return Ok(());
        }

        let line_height = canvas.glyph_size(TextSize::Large).height as i32;
        let top = y - 8;
        canvas.fill_rect(
            Rectangle::new(Point::new(VALUE_X, top), Size::new(VALUE_WIDTH, 32)),
            palette::BLACK,
        )?;

        let max_chars = chars_in(canvas, VALUE_WIDTH);
        let lines = [("LAN", current.local.as_str()), ("WAN", current.public.as_str())];
        for (i, (prefix, address)) in lines.into_iter().enumerate() {
            let address = if address.is_empty() { "n/a" } else { address };
            let mut text: String<64> = String::new();
            let _ = write!(text, "{} {}", prefix, address);
            let origin = Point::new(VALUE_X, top + i as i32 * (line_height + 1));
            canvas.draw_text(clip(&text, max_chars), origin, VALUE_STYLE)?;
        }

        self.ips = Some(current);
        Ok(())
    }
}

/// Clear a single value row and draw `text` into it
fn draw_value_row<C: Canvas>(canvas: &mut C, y: i32, text: &str) -> Result<(), DisplayError> {
    canvas.fill_rect(
        Rectangle::new(Point::new(VALUE_X, y - 8), Size::new(VALUE_WIDTH, 24)),
        palette::BLACK,
    )?;
    let text = clip(text, chars_in(canvas, VALUE_WIDTH));
    canvas.draw_text(text, Point::new(VALUE_X, y - 4), VALUE_STYLE)
}

/// Bar plus percentage text; the bar top sits slightly above the label
fn draw_bar_row<C: Canvas>(
    canvas: &mut C,
    y: i32,
    percent: f32,
    text: &str,
    color: Rgb565,
    phase: u8,
) -> Result<(), DisplayError> {
    let top = y - 6;
    let bar = Rectangle::new(Point::new(VALUE_X, top), Size::new(BAR_WIDTH, BAR_HEIGHT));
    draw_bar(canvas, bar, percent, color, phase)?;

    let text_x = VALUE_X + BAR_WIDTH as i32 + BAR_TEXT_GAP;
    let text_width = (VALUE_X + VALUE_WIDTH as i32 - text_x) as u32;
    canvas.fill_rect(
        Rectangle::new(Point::new(text_x, top), Size::new(text_width, BAR_HEIGHT)),
        palette::BLACK,
    )?;
    canvas.draw_text(text, Point::new(text_x, top), VALUE_STYLE)
}

/// Outlined percentage bar
///
/// On odd phases dark scanlines are drawn across the fill. They only cover
/// fill pixels, so the fill width reads the same on every phase.
pub fn draw_bar<C: Canvas>(
    canvas: &mut C,
    bar: Rectangle,
    percent: f32,
    color: Rgb565,
    phase: u8,
) -> Result<(), DisplayError> {
    canvas.draw_rect(bar, color)?;

    let inner = Rectangle::new(
        bar.top_left + Point::new(1, 1),
        bar.size.saturating_sub(Size::new(2, 2)),
    );
    canvas.fill_rect(inner, palette::BLACK)?;

    let filled = bar_fill_width(percent, inner.size.width);
    if filled == 0 {
        return Ok(());
    }
    canvas.fill_rect(
        Rectangle::new(inner.top_left, Size::new(filled, inner.size.height)),
        color,
    )?;

    if phase % 2 == 1 {
        for dy in (1..inner.size.height as i32).step_by(SCANLINE_PITCH) {
            canvas.draw_hline(inner.top_left + Point::new(0, dy), filled, palette::BLACK)?;
        }
    }
    Ok(())
}

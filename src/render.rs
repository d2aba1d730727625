extern crate std;

use crate::result;
use crate::schedule;
use crate::selector;

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;

// Paginated rows are cut to this many characters of destination.
const DESTINATION_BUDGET: usize = 12;

const CLOCK_Y: i32 = 20;
const IMMINENT_SINGLE_Y: i32 = 20;
const IMMINENT_SPLIT_Y: (i32, i32) = (5, 25);
const IMMINENT_DETAIL_Y: i32 = 50;
const SLOT_Y: [i32; selector::ENTRIES_PER_PAGE] = [0, 34];
const SLOT_ROW_SPACING: i32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    Small,
    Medium,
    // Fixed width.
    Large,
}

impl FontId {
    // Estimated advance per character, in pixels.
    pub fn char_width(&self) -> f32 {
        return match *self {
            FontId::Small => 7.0,
            FontId::Medium => 10.5,
            FontId::Large => 12.8,
        };
    }

    // Rasterizing height, in pixels.
    pub fn pixel_height(&self) -> f32 {
        return match *self {
            FontId::Small => 12.0,
            FontId::Medium => 18.0,
            FontId::Large => 26.0,
        };
    }
}

/// Whatever the screens end up drawn on.
pub trait Surface {
    fn clear(&mut self) -> result::BartDashResult<()>;
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: FontId) -> result::BartDashResult<()>;
    fn present(&mut self) -> result::BartDashResult<()>;
}

pub trait Clock {
    /// Local (hour, minute).
    fn now(&self) -> (u32, u32);
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub font: FontId,
}

impl TextLine {
    fn at(x: i32, y: i32, text: String, font: FontId) -> TextLine {
        return TextLine{x: x, y: y, text: text, font: font};
    }

    fn centered(y: i32, text: String, font: FontId) -> TextLine {
        return TextLine::at(center_x(&text, font), y, text, font);
    }
}

pub fn center_x(text: &str, font: FontId) -> i32 {
    let text_width = text.chars().count() as f32 * font.char_width();
    let offset = ((DISPLAY_WIDTH as f32 - text_width) / 2.0).round_ties_even();
    return std::cmp::max(0, offset as i32);
}

/// Positions every piece of text for a screen. `now` is only used by the clock.
pub fn layout(plan: &selector::ScreenPlan, now: (u32, u32)) -> Vec<TextLine> {
    return match *plan {
        selector::ScreenPlan::ShowClock => layout_clock(now),
        selector::ScreenPlan::ShowImminentDeparture(ref entry) => layout_imminent(entry),
        selector::ScreenPlan::ShowPaginatedSchedule { .. } => layout_page(plan.page_entries()),
    };
}

fn layout_clock((hour, minute): (u32, u32)) -> Vec<TextLine> {
    return vec![TextLine::centered(CLOCK_Y, format!("{:02}:{:02}", hour, minute), FontId::Large)];
}

fn layout_imminent(entry: &schedule::ScheduleEntry) -> Vec<TextLine> {
    let destination = entry.destination.to_uppercase();

    let mut lines = match destination.split_once('/') {
        Some((first, second)) => vec![
            TextLine::centered(IMMINENT_SPLIT_Y.0, format!("{} /", first.trim()), FontId::Medium),
            TextLine::centered(IMMINENT_SPLIT_Y.1, second.trim().to_string(), FontId::Medium),
        ],
        None => vec![
            TextLine::centered(IMMINENT_SINGLE_Y, destination.trim().to_string(), FontId::Medium),
        ],
    };

    lines.push(TextLine::centered(IMMINENT_DETAIL_Y, train_detail(entry), FontId::Small));
    return lines;
}

fn layout_page(entries: &[schedule::ScheduleEntry]) -> Vec<TextLine> {
    let mut lines = vec![];
    for (entry, y) in entries.iter().zip(SLOT_Y.iter()) {
        let destination: String = entry.destination.chars().take(DESTINATION_BUDGET).collect();
        lines.push(TextLine::at(
            0, *y,
            format!("{} {} min", destination, entry.arrival_minutes).to_uppercase(),
            FontId::Small));
        lines.push(TextLine::at(0, *y + SLOT_ROW_SPACING, train_detail(entry), FontId::Small));
    }
    return lines;
}

fn train_detail(entry: &schedule::ScheduleEntry) -> String {
    return format!("{}-car, {} line", entry.car_count, entry.line_color_code).to_uppercase();
}

pub struct ScreenRenderer;

impl ScreenRenderer {
    pub fn render(&self, surface: &mut dyn Surface, plan: &selector::ScreenPlan, clock: &dyn Clock) -> result::BartDashResult<()> {
        surface.clear()?;
        for line in layout(plan, clock.now()) {
            surface.draw_text(line.x, line.y, &line.text, line.font)?;
        }
        return surface.present();
    }

    // Blank the panel between screens.
    pub fn flash(&self, surface: &mut dyn Surface) -> result::BartDashResult<()> {
        surface.clear()?;
        return surface.present();
    }
}

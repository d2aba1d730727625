extern crate std;

use crate::config;
use crate::schedule;
use std::time::Duration;

pub const MAX_SHOWN_ENTRIES: usize = 4;
pub const ENTRIES_PER_PAGE: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenPlan {
    ShowClock,
    ShowImminentDeparture(schedule::ScheduleEntry),
    // `entries` holds up to MAX_SHOWN_ENTRIES, `page` picks the pair to draw.
    ShowPaginatedSchedule { entries: Vec<schedule::ScheduleEntry>, page: usize },
}

impl ScreenPlan {
    /// The entries drawn on this screen, top slot first.
    pub fn page_entries(&self) -> &[schedule::ScheduleEntry] {
        return match *self {
            ScreenPlan::ShowPaginatedSchedule { ref entries, page } => {
                let start = std::cmp::min(page * ENTRIES_PER_PAGE, entries.len());
                let end = std::cmp::min(start + ENTRIES_PER_PAGE, entries.len());
                &entries[start..end]
            },
            _ => &[],
        };
    }

    pub fn name(&self) -> String {
        return match *self {
            ScreenPlan::ShowClock => "clock".to_string(),
            ScreenPlan::ShowImminentDeparture(ref entry) => format!("imminent[{}]", entry.destination),
            ScreenPlan::ShowPaginatedSchedule { page, .. } => format!("page {}", page + 1),
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub plan: ScreenPlan,
    pub dwell: Duration,
}

/// The first screen for a schedule. `None` is the no-data sentinel.
pub fn select(schedule: Option<&schedule::Schedule>) -> ScreenPlan {
    let schedule = match schedule {
        None => return ScreenPlan::ShowClock,
        Some(schedule) => schedule,
    };

    if let Some(entry) = schedule.imminent() {
        return ScreenPlan::ShowImminentDeparture(entry.clone());
    }

    return ScreenPlan::ShowPaginatedSchedule{
        entries: schedule.entries().take(MAX_SHOWN_ENTRIES).cloned().collect(),
        page: 0,
    };
}

/// Every screen shown during one poll cycle, in order.
pub fn plan_cycle(schedule: Option<&schedule::Schedule>, dwell: &config::DwellConfig) -> Vec<Step> {
    match select(schedule) {
        ScreenPlan::ShowClock => {
            return vec![Step{plan: ScreenPlan::ShowClock, dwell: dwell.clock}];
        },
        imminent @ ScreenPlan::ShowImminentDeparture(_) => {
            return vec![Step{plan: imminent, dwell: dwell.imminent}];
        },
        ScreenPlan::ShowPaginatedSchedule { entries, .. } => {
            let page_count = (entries.len() + ENTRIES_PER_PAGE - 1) / ENTRIES_PER_PAGE;
            let mut steps: Vec<Step> = (0..page_count).map(|page| Step{
                plan: ScreenPlan::ShowPaginatedSchedule{entries: entries.clone(), page: page},
                dwell: if page + 1 == page_count { dwell.final_page } else { dwell.page },
            }).collect();

            steps.push(Step{plan: ScreenPlan::ShowClock, dwell: dwell.after_pages});
            return steps;
        },
    }
}

/// Remembers the last presented screen so identical redraws skip the flash.
#[derive(Debug, Default)]
pub struct Transitions {
    previous: Option<ScreenPlan>,
}

impl Transitions {
    pub fn new() -> Transitions {
        return Transitions::default();
    }

    pub fn needs_flash(&self, next: &ScreenPlan) -> bool {
        return self.previous.as_ref() != Some(next);
    }

    pub fn presented(&mut self, plan: &ScreenPlan) {
        self.previous = Some(plan.clone());
    }
}

extern crate std;

use crate::result;

/// One upcoming train, normalized from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    // 0 means the train is at the platform.
    pub arrival_minutes: u32,
    pub destination: String,
    pub car_count: u32,
    pub line_color_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    // A later departure at the same minute replaces the earlier one.
    LastWriteWins,
    Reject,
}

/// Departures keyed (and ordered) by arrival minutes. At most one entry per
/// minute; see `CollisionPolicy`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schedule {
    entries: std::collections::BTreeMap<u32, ScheduleEntry>,
}

impl Schedule {
    pub fn new() -> Schedule {
        return Schedule::default();
    }

    /// Returns the entry that was displaced, if any.
    pub fn insert(&mut self, entry: ScheduleEntry, policy: CollisionPolicy) -> result::BartDashResult<Option<ScheduleEntry>> {
        let minutes = entry.arrival_minutes;
        if policy == CollisionPolicy::Reject && self.entries.contains_key(&minutes) {
            return Err(result::BartDashError::DuplicateArrival(minutes));
        }

        let displaced = self.entries.insert(minutes, entry);
        if let Some(ref old) = displaced {
            debug!("Replacing {} ({} min) with a later departure", old.destination, minutes);
        }
        return Ok(displaced);
    }

    pub fn get(&self, arrival_minutes: u32) -> Option<&ScheduleEntry> {
        return self.entries.get(&arrival_minutes);
    }

    pub fn imminent(&self) -> Option<&ScheduleEntry> {
        return self.get(0);
    }

    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        return self.entries.values();
    }

    #[cfg(test)]
    pub fn arrival_minutes(&self) -> Vec<u32> {
        return self.entries.keys().cloned().collect();
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}

#[cfg(test)]
pub fn entry(minutes: u32, destination: &str, cars: u32, color: &str) -> ScheduleEntry {
    return ScheduleEntry{
        arrival_minutes: minutes,
        destination: destination.to_string(),
        car_count: cars,
        line_color_code: color.to_string(),
    };
}

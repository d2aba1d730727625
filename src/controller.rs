extern crate chrono;
extern crate chrono_tz;
extern crate std;

use crate::bart;
use crate::config;
use crate::render;
use crate::result;
use crate::schedule;
use crate::selector;
use std::time::Duration;

pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

pub struct SystemClock {
    tz: chrono_tz::Tz,
}

impl SystemClock {
    pub fn new(tz: chrono_tz::Tz) -> SystemClock {
        return SystemClock{tz: tz};
    }
}

impl render::Clock for SystemClock {
    fn now(&self) -> (u32, u32) {
        use chrono::Timelike;

        let now = chrono::Utc::now().with_timezone(&self.tz);
        return (now.hour(), now.minute());
    }
}

#[derive(Debug)]
pub struct CycleReport {
    // False when the fetch or parse failed and the cycle fell back to the clock.
    pub feed_ok: bool,
    pub steps: Vec<selector::Step>,
}

/// fetch -> parse -> select -> render -> dwell, forever.
pub struct Dashboard<T, S, C, Z> {
    endpoint: String,
    fetch_timeout: Duration,
    retry_backoff: Option<Duration>,
    dwell: config::DwellConfig,
    parser: bart::ScheduleParser,
    renderer: render::ScreenRenderer,
    transitions: selector::Transitions,

    transport: T,
    surface: S,
    clock: C,
    sleeper: Z,
}

impl<T, S, C, Z> Dashboard<T, S, C, Z>
where T: bart::Transport, S: render::Surface, C: render::Clock, Z: Sleeper {
    pub fn new(config: &config::Config, transport: T, surface: S, clock: C, sleeper: Z) -> Dashboard<T, S, C, Z> {
        return Dashboard{
            endpoint: config.endpoint.clone(),
            fetch_timeout: config.fetch_timeout,
            retry_backoff: config.retry_backoff,
            dwell: config.dwell.clone(),
            parser: bart::ScheduleParser::new(config.color_table(), config.collision_policy()),
            renderer: render::ScreenRenderer,
            transitions: selector::Transitions::new(),
            transport: transport,
            surface: surface,
            clock: clock,
            sleeper: sleeper,
        };
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        return &self.surface;
    }

    #[cfg(test)]
    pub fn sleeper(&self) -> &Z {
        return &self.sleeper;
    }

    /// Runs `max_cycles` poll cycles, or forever when `None`. Returns how
    /// many of them fell back to the clock because of a feed failure.
    pub fn run(&mut self, max_cycles: Option<u64>) -> u64 {
        let mut cycles: u64 = 0;
        let mut failed_cycles: u64 = 0;
        loop {
            let report = self.one_iteration();
            cycles += 1;
            if !report.feed_ok {
                failed_cycles += 1;
                info!("{} of {} cycles without feed data, last one showed {} screens",
                      failed_cycles, cycles, report.steps.len());
            }

            if let Some(max_cycles) = max_cycles {
                if cycles >= max_cycles {
                    return failed_cycles;
                }
            }
        }
    }

    pub fn one_iteration(&mut self) -> CycleReport {
        let (schedule, feed_ok) = match self.fetch_schedule() {
            Ok(schedule) => (schedule, true),
            Err(err) => {
                if err.is_recoverable_feed_error() {
                    warn!("Feed unavailable this cycle: {}", err);
                } else {
                    error!("Unexpected error while fetching: {}", err);
                }
                (None, false)
            },
        };

        let steps = selector::plan_cycle(schedule.as_ref(), &self.dwell);
        info!("{} -> [{}]",
              describe(schedule.as_ref()),
              steps.iter().map(|s| s.plan.name()).collect::<Vec<String>>().join(", "));

        for step in &steps {
            self.show(step);
        }

        if !feed_ok {
            if let Some(backoff) = self.retry_backoff {
                debug!("Backing off for {:?}", backoff);
                self.sleeper.sleep(backoff);
            }
        }

        return CycleReport{feed_ok: feed_ok, steps: steps};
    }

    fn fetch_schedule(&self) -> result::BartDashResult<Option<schedule::Schedule>> {
        let response_body = self.transport.fetch(&self.endpoint, self.fetch_timeout)?;
        return self.parser.parse(&response_body);
    }

    fn show(&mut self, step: &selector::Step) {
        if self.transitions.needs_flash(&step.plan) {
            if let Err(err) = self.renderer.flash(&mut self.surface) {
                error!("Flash failed: {}", err);
            }
            self.sleeper.sleep(self.dwell.flash);
        }

        match self.renderer.render(&mut self.surface, &step.plan, &self.clock) {
            Ok(()) => self.transitions.presented(&step.plan),
            Err(err) => error!("Drawing {} failed: {}", step.plan.name(), err),
        }
        self.sleeper.sleep(step.dwell);
    }
}

fn describe(schedule: Option<&schedule::Schedule>) -> String {
    return match schedule {
        None => "no data".to_string(),
        Some(schedule) if schedule.is_empty() => "empty schedule".to_string(),
        Some(schedule) => format!("{} departures", schedule.len()),
    };
}

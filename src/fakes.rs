// Test doubles for the hardware-facing traits.
extern crate std;

use crate::controller;
use crate::render;
use crate::result;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear,
    Text(i32, i32, String, render::FontId),
    Present,
}

pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> RecordingSurface {
        return RecordingSurface{ops: vec![]};
    }

    // Text of every presented frame, blank frames included.
    pub fn frames(&self) -> Vec<Vec<String>> {
        let mut frames = vec![];
        let mut current = vec![];
        for op in &self.ops {
            match *op {
                SurfaceOp::Clear => current.clear(),
                SurfaceOp::Text(_, _, ref text, _) => current.push(text.clone()),
                SurfaceOp::Present => frames.push(current.clone()),
            }
        }
        return frames;
    }
}

impl render::Surface for RecordingSurface {
    fn clear(&mut self) -> result::BartDashResult<()> {
        self.ops.push(SurfaceOp::Clear);
        return Ok(());
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: render::FontId) -> result::BartDashResult<()> {
        self.ops.push(SurfaceOp::Text(x, y, text.to_string(), font));
        return Ok(());
    }

    fn present(&mut self) -> result::BartDashResult<()> {
        self.ops.push(SurfaceOp::Present);
        return Ok(());
    }
}

pub struct FixedClock(pub u32, pub u32);

impl render::Clock for FixedClock {
    fn now(&self) -> (u32, u32) {
        return (self.0, self.1);
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    pub pauses: Vec<Duration>,
}

impl controller::Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}

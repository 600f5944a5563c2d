//! Frame scheduling.
//!
//! A [Scheduler] owns the loop and hands out [FrameIndex]es; whoever is
//! animating just reacts to them. Swapping the window-driven scheduler for
//! [FixedFrames] is what lets the animation run without a display.

use std::ops::ControlFlow;

/// Frames since startup. Frame 0 is the freshly built scene; the first
/// callback gets frame 1.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn next(self) -> Self {
        FrameIndex(self.0 + 1)
    }
}

pub trait Scheduler {
    /// Calls `on_frame` once per frame, in order, until it breaks or the
    /// scheduler runs out of frames. Returns the last frame handed out.
    fn run<F>(&mut self, on_frame: F) -> FrameIndex
    where
        F: FnMut(FrameIndex) -> ControlFlow<()>;
}

/// Runs a fixed number of frames back to back.
#[derive(Debug, Clone)]
pub struct FixedFrames {
    count: u64,
}

impl FixedFrames {
    pub fn new(count: u64) -> Self {
        FixedFrames { count }
    }
}

impl Scheduler for FixedFrames {
    fn run<F>(&mut self, mut on_frame: F) -> FrameIndex
    where
        F: FnMut(FrameIndex) -> ControlFlow<()>,
    {
        let mut frame = FrameIndex::default();
        while frame.0 < self.count {
            frame = frame.next();
            if on_frame(frame).is_break() {
                break;
            }
        }
        frame
    }
}

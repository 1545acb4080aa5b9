//! Interpolated traversal of a waypoint list.

use cn_core::Point;

use crate::{MotionError, MotionResult};

/// One interpolated position along a route.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Time since the animation started.
    pub offset_ms: u64,
    /// Index of the segment (`waypoints[segment] → waypoints[segment + 1]`).
    pub segment:   usize,
    /// Step within the segment, `1..=steps_per_segment`.
    pub step:      u32,
    pub position:  Point,
}

/// Lazy iterator of [`Frame`]s along `waypoints`.
#[derive(Clone, Debug)]
pub struct Animation {
    waypoints:           Vec<Point>,
    segment_duration_ms: u64,
    steps:               u32,
    /// Next frame to emit.
    segment:             usize,
    step:                u32,
    cancelled:           bool,
}

impl Animation {
    /// # Errors
    ///
    /// [`MotionError::NoWaypoints`] for an empty list,
    /// [`MotionError::ZeroSteps`] for `steps_per_segment == 0`.
    pub fn new(waypoints: Vec<Point>, segment_duration_ms: u64, steps_per_segment: u32) -> MotionResult<Self> {
        if waypoints.is_empty() {
            return Err(MotionError::NoWaypoints);
        }
        if steps_per_segment == 0 {
            return Err(MotionError::ZeroSteps);
        }
        Ok(Self {
            waypoints,
            segment_duration_ms,
            steps: steps_per_segment,
            segment: 0,
            step: 1,
            cancelled: false,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// Total frames over the whole route.
    pub fn frame_count(&self) -> usize {
        self.segment_count() * self.steps as usize
    }

    /// Offset of the final frame; `0` for a single-waypoint route.
    pub fn total_duration_ms(&self) -> u64 {
        self.segment_count() as u64 * self.segment_duration_ms
    }

    pub fn origin(&self) -> Point {
        self.waypoints[0]
    }

    pub fn destination(&self) -> Point {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Offset of the next frame, or `None` when nothing is left.
    pub fn next_offset_ms(&self) -> Option<u64> {
        if self.is_done() {
            None
        } else {
            Some(self.offset_of(self.segment, self.step))
        }
    }

    /// Stop emitting frames.  A cancelled animation never finishes.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// `true` once every frame has been emitted (and not cancelled).
    pub fn is_finished(&self) -> bool {
        !self.cancelled && self.segment >= self.segment_count()
    }

    fn is_done(&self) -> bool {
        self.cancelled || self.segment >= self.segment_count()
    }

    fn offset_of(&self, segment: usize, step: u32) -> u64 {
        segment as u64 * self.segment_duration_ms
            + step as u64 * self.segment_duration_ms / self.steps as u64
    }
}

impl Iterator for Animation {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.is_done() {
            return None;
        }
        let (seg, step) = (self.segment, self.step);
        let from = self.waypoints[seg];
        let to = self.waypoints[seg + 1];
        let frame = Frame {
            offset_ms: self.offset_of(seg, step),
            segment:   seg,
            step,
            position:  from.lerp_step(to, step, self.steps),
        };

        if step == self.steps {
            self.segment += 1;
            self.step = 1;
        } else {
            self.step += 1;
        }
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.is_done() {
            0
        } else {
            (self.segment_count() - self.segment) * self.steps as usize - (self.step as usize - 1)
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for Animation {}

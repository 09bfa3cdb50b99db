// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Frame timing: per-tick elapsed time and a periodically refreshed average.

use std::time::Instant;

/// Default interval, in seconds, over which frame times are averaged.
pub const DEFAULT_AVERAGE_INTERVAL: f64 = 0.5;

/// A single reading taken at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Time of the reading, in seconds since the clock origin.
    pub now: f64,
    /// Seconds since the previous committed timestamp.
    pub elapsed: f64,
}

/// Tracks timestamps between ticks and maintains a rolling average frame time.
///
/// The average is not smoothed: frame times are accumulated until their sum
/// reaches the update interval, at which point the average becomes
/// `sum / count` and both accumulators are reset.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    previous_timestamp: f64,
    average_frame_time: f64,
    update_interval: f64,
    frame_time_sum: f64,
    accumulated_frames: u32,
}

impl FrameClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            previous_timestamp: 0.0,
            average_frame_time: 0.0,
            update_interval: DEFAULT_AVERAGE_INTERVAL,
            frame_time_sum: 0.0,
            accumulated_frames: 0,
        }
    }

    /// Seconds elapsed since the clock was created.
    #[inline]
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    /// Makes the current time the previous timestamp, so the next tick
    /// measures from here.
    pub fn reset(&mut self) {
        self.previous_timestamp = self.now();
    }

    /// Reads the current time and returns it with the delta to the previous
    /// timestamp. The stored timestamp is left untouched until
    /// [`FrameClock::finish_frame`].
    pub fn sample(&self) -> FrameSample {
        self.sample_at(self.now())
    }

    /// Same as [`FrameClock::sample`] with an explicit time.
    pub fn sample_at(&self, now: f64) -> FrameSample {
        FrameSample {
            now,
            elapsed: (now - self.previous_timestamp).max(0.0),
        }
    }

    /// Commits a tick: feeds the rolling average and stores `sample.now` as
    /// the previous timestamp.
    pub fn finish_frame(&mut self, sample: FrameSample) {
        self.update_average(sample.elapsed);
        self.previous_timestamp = sample.now;
    }

    /// Samples and commits the timestamp in one step, returning the elapsed
    /// seconds since the previous tick.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(self.now())
    }

    /// Same as [`FrameClock::tick`] with an explicit time.
    pub fn tick_at(&mut self, now: f64) -> f64 {
        let sample = self.sample_at(now);
        self.previous_timestamp = sample.now;
        sample.elapsed
    }

    /// Accumulates one frame time and refreshes the average once the
    /// accumulated time reaches the update interval.
    pub fn update_average(&mut self, elapsed: f64) {
        self.frame_time_sum += elapsed;
        self.accumulated_frames += 1;

        if self.frame_time_sum >= self.update_interval && self.accumulated_frames > 0 {
            self.average_frame_time = self.frame_time_sum / f64::from(self.accumulated_frames);
            self.accumulated_frames = 0;
            self.frame_time_sum = 0.0;
        }
    }

    /// Average frame time in seconds, or 0 before the first refresh.
    pub fn average_frame_time(&self) -> f64 {
        self.average_frame_time
    }

    /// Frames per second derived from the average, or 0 before the first refresh.
    pub fn frames_per_second(&self) -> f64 {
        if self.average_frame_time > 0.0 {
            1.0 / self.average_frame_time
        } else {
            0.0
        }
    }

    /// The timestamp committed by the last tick.
    pub fn previous_timestamp(&self) -> f64 {
        self.previous_timestamp
    }

    /// The averaging interval in seconds.
    pub fn update_interval(&self) -> f64 {
        self.update_interval
    }

    /// Changes the averaging interval. Accumulated samples are kept.
    pub fn set_update_interval(&mut self, seconds: f64) {
        self.update_interval = seconds;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

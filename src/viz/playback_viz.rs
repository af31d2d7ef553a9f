//! Snapshot hooks for the playback engine.

use super::types::{PlaybackSnapshot, VizWave};
use crate::sim::PlaybackEngine;
use crate::timeline::Cue;

impl<T: Cue> PlaybackEngine<T> {
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let now = self.now();
        let active_waves = self
            .active_waves()
            .iter()
            .map(|(node, waves)| {
                let views = waves
                    .iter()
                    .map(|w| VizWave {
                        token: w.token,
                        start_time: w.start.as_secs_f64(),
                        age: now.saturating_sub(w.start).as_secs_f64(),
                    })
                    .collect();
                (*node, views)
            })
            .collect();

        PlaybackSnapshot {
            current_time: now.as_secs_f64(),
            status: self.status(),
            cursor: self.cursor(),
            total: self.timeline().len(),
            active_waves,
        }
    }
}

// SPDX-License-Identifier: GPL-3.0-only

//! Celebration confetti played after a save
//!
//! Purely decorative: bursts go to a [`ParticleSink`] and never touch the
//! exported file.

use crate::constants::export::{CONFETTI_DURATION, CONFETTI_INTERVAL, CONFETTI_MAX_PARTICLES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tracing::debug;

/// One confetti emission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiBurst {
    /// Horizontal origin, 0.0 = left edge, 1.0 = right edge
    pub origin_x: f32,
    /// Vertical origin; may start above the top edge
    pub origin_y: f32,
    pub particle_count: u32,
}

/// Whatever draws the particles
pub trait ParticleSink: Send + 'static {
    fn emit(&mut self, burst: ConfettiBurst);
}

/// Timing and intensity of a confetti run
#[derive(Debug, Clone, Copy)]
pub struct ConfettiSchedule {
    pub duration: Duration,
    pub interval: Duration,
    pub max_particles: f32,
}

impl Default for ConfettiSchedule {
    fn default() -> Self {
        Self {
            duration: CONFETTI_DURATION,
            interval: CONFETTI_INTERVAL,
            max_particles: CONFETTI_MAX_PARTICLES,
        }
    }
}

impl ConfettiSchedule {
    /// Particles per burst, fading linearly to zero
    pub fn particle_count(&self, time_left: Duration) -> u32 {
        let fraction = time_left.as_secs_f32() / self.duration.as_secs_f32();
        (self.max_particles * fraction.clamp(0.0, 1.0)).round() as u32
    }

    /// The left and right bursts of one tick
    pub fn bursts<R: Rng>(&self, time_left: Duration, rng: &mut R) -> [ConfettiBurst; 2] {
        let particle_count = self.particle_count(time_left);
        // Particles fall, so origins start a bit above a uniform spread
        let mut burst = |x_min: f32, x_max: f32| ConfettiBurst {
            origin_x: rng.gen_range(x_min..x_max),
            origin_y: rng.gen_range(0.0f32..1.0) - 0.2,
            particle_count,
        };
        [burst(0.1, 0.3), burst(0.7, 0.9)]
    }

    /// Emit bursts every interval until the duration runs out
    ///
    /// The first tick fires one interval after the start. The sink is handed
    /// back when the run ends. Must be called from within a tokio runtime.
    pub fn play<S, R>(self, mut sink: S, mut rng: R) -> JoinHandle<S>
    where
        S: ParticleSink,
        R: Rng + Send + 'static,
    {
        tokio::spawn(async move {
            let start = Instant::now();
            let end = start + self.duration;
            let mut ticker = tokio::time::interval_at(start + self.interval, self.interval);
            let mut ticks = 0u32;

            loop {
                ticker.tick().await;
                let time_left = end.saturating_duration_since(Instant::now());
                if time_left.is_zero() {
                    break;
                }
                for burst in self.bursts(time_left, &mut rng) {
                    sink.emit(burst);
                }
                ticks += 1;
            }

            debug!(ticks, "Confetti finished");
            sink
        })
    }
}

/// Play the default confetti run with an entropy-seeded generator
///
/// The run is spawned on first poll, so the future can be built outside the
/// runtime and handed to `block_on`.
pub async fn celebrate<S: ParticleSink>(sink: S) -> Result<S, JoinError> {
    ConfettiSchedule::default()
        .play(sink, StdRng::from_entropy())
        .await
}

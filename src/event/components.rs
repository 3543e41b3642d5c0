// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Event handling components

use super::{GesturePhase, SampleTracker, TouchEvent, recovery};
use crate::cast::Cast;
use crate::config::{self, PanConfig};
use crate::geom::{Affine, Vec2};

/// Logic for transform accumulation
///
/// This struct combines a [`SampleTracker`] with the accumulation contract
/// most hosts need: per touch event it recovers the incremental transform for
/// that step (with the current accumulated transform as the pre-transform)
/// and composes it on top of the running total.
///
/// Hosts which keep their own running transform can use [`SampleTracker`] and
/// [`recover`](super::recover) directly instead.
#[derive(Debug)]
pub struct PanComponent {
    tracker: SampleTracker,
    initial: Affine,
    accumulated: Affine,
    max_translation_y: Option<f64>,
}

impl Default for PanComponent {
    #[inline]
    fn default() -> Self {
        PanComponent::new()
    }
}

impl PanComponent {
    /// Construct with an identity initial transform and no translation clamp
    pub fn new() -> Self {
        PanComponent {
            tracker: SampleTracker::new(),
            initial: Affine::IDENTITY,
            accumulated: Affine::IDENTITY,
            max_translation_y: None,
        }
    }

    /// Construct from configuration
    ///
    /// Validates `config`; the accumulated transform starts from the
    /// configured initial transform.
    pub fn with_config(config: &PanConfig) -> Result<Self, config::Error> {
        config.validate()?;
        let initial = config.initial_affine()?;
        Ok(PanComponent {
            tracker: SampleTracker::new(),
            initial,
            accumulated: initial,
            max_translation_y: config.max_translation_y.map(|v| v.cast()),
        })
    }

    /// Access the sample tracker
    #[inline]
    pub fn tracker(&self) -> &SampleTracker {
        &self.tracker
    }

    /// Access the sample tracker mutably
    ///
    /// Use this to set the capture-time coordinate map or an observer.
    #[inline]
    pub fn tracker_mut(&mut self) -> &mut SampleTracker {
        &mut self.tracker
    }

    /// Get the accumulated transform
    #[inline]
    pub fn transform(&self) -> Affine {
        self.accumulated
    }

    /// Get the matrix components `[a, b, c, d, tx, ty]` of the accumulated
    /// transform, for cross-boundary transport
    #[inline]
    pub fn components(&self) -> [f64; 6] {
        self.accumulated.components()
    }

    /// Handle a touch lifecycle event
    ///
    /// Updates sample tracking (notifying any observer), recovers the
    /// incremental transform for this step and accumulates it. A non-finite
    /// increment (possible only on host contract violations, e.g. non-finite
    /// input coordinates) is discarded, leaving the accumulated transform
    /// unchanged.
    pub fn handle(&mut self, event: &TouchEvent) -> GesturePhase {
        let previous = self.tracker.samples().clone();
        let phase = self.tracker.update(event);

        let incremental = recovery::recover(&previous, self.tracker.samples(), self.accumulated);
        if incremental.is_finite() {
            self.accumulated = self.clamp(incremental * self.accumulated);
            if incremental != Affine::IDENTITY {
                log::trace!("handle: accumulated={:?}", self.accumulated);
            }
        }
        phase
    }

    fn clamp(&self, transform: Affine) -> Affine {
        match self.max_translation_y {
            Some(max) if transform.delta().1 > max => {
                let delta = Vec2(transform.delta().0, max);
                Affine::new(transform.alpha(), delta)
            }
            _ => transform,
        }
    }

    /// Reset to the initial state
    ///
    /// Clears tracked samples and restores the configured initial transform.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.accumulated = self.initial;
    }
}

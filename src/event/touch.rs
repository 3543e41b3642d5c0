// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Event handling: touch samples and the sample tracker

use crate::geom::{Affine, Vec2};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The number of simultaneous contacts stored without allocating
pub const MAX_TOUCHES: usize = 10;

/// Stable identity of one physical contact
///
/// Assigned by the host event layer and valid for the lifetime of that
/// contact (from its started phase until it ends or is cancelled). Note that
/// hosts may re-use identifiers after a contact completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchId(pub u64);

/// A contact's lifecycle phase, as reported by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// One contact's state within a [`TouchEvent`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    pub id: TouchId,
    /// Location in raw (host) coordinates
    ///
    /// The tracker maps this through its coordinate map at capture time.
    pub position: Vec2,
    pub phase: TouchPhase,
}

/// The kind of a touch lifecycle event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Begin,
    Move,
    End,
    Cancel,
}

/// One touch lifecycle event, as delivered by the host
///
/// Carries the set of contacts the host reported for this event. Contacts not
/// listed are unaffected by the event.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub kind: EventKind,
    pub touches: SmallVec<[Touch; MAX_TOUCHES]>,
}

impl TouchEvent {
    /// Construct from an event kind and reported contacts
    pub fn new(kind: EventKind, touches: impl IntoIterator<Item = Touch>) -> Self {
        TouchEvent {
            kind,
            touches: touches.into_iter().collect(),
        }
    }
}

/// One contact's location at one instant
///
/// Samples are value types: a later event for the same contact supersedes its
/// sample with a new value rather than mutating it. Equality and hashing are
/// over `(id, coord)` (coordinates compared by bit pattern), hence the same
/// contact at two locations is two distinct values.
#[derive(Clone, Copy, Debug)]
pub struct TouchSample {
    pub id: TouchId,
    /// Location in the recognizer's reference coordinate space
    pub coord: Vec2,
}

impl PartialEq for TouchSample {
    fn eq(&self, rhs: &Self) -> bool {
        self.id == rhs.id
            && self.coord.0.to_bits() == rhs.coord.0.to_bits()
            && self.coord.1.to_bits() == rhs.coord.1.to_bits()
    }
}

impl Eq for TouchSample {}

impl Hash for TouchSample {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.coord.0.to_bits().hash(state);
        self.coord.1.to_bits().hash(state);
    }
}

/// A set of [`TouchSample`] values, unique by full equality
///
/// After a well-formed update step the set holds at most one sample per
/// [`TouchId`]; the container itself does not enforce this (see
/// [`match_samples`](super::match_samples), which dedupes by id).
///
/// Iteration order is insertion order.
#[derive(Clone, Debug, Default)]
pub struct SampleSet {
    samples: SmallVec<[TouchSample; MAX_TOUCHES]>,
}

impl SampleSet {
    /// Construct an empty set
    pub fn new() -> Self {
        SampleSet::default()
    }

    /// The number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the set holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over samples in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, TouchSample> {
        self.samples.iter()
    }

    /// True if an equal sample (same contact and location) is present
    pub fn contains(&self, sample: &TouchSample) -> bool {
        self.samples.iter().any(|s| s == sample)
    }

    /// Get the first sample for contact `id`
    pub fn get(&self, id: TouchId) -> Option<&TouchSample> {
        self.samples.iter().find(|s| s.id == id)
    }

    /// Insert with set semantics: a no-op if an equal sample is present
    pub(crate) fn insert(&mut self, sample: TouchSample) -> bool {
        if self.contains(&sample) {
            return false;
        }
        self.samples.push(sample);
        true
    }

    /// Replace the first sample for `sample.id`; a no-op if there is none
    pub(crate) fn replace(&mut self, sample: TouchSample) -> bool {
        match self.samples.iter_mut().find(|s| s.id == sample.id) {
            Some(slot) => {
                *slot = sample;
                true
            }
            None => false,
        }
    }

    /// Remove all samples for contact `id`
    pub(crate) fn remove_id(&mut self, id: TouchId) {
        self.samples.retain(|s| s.id != id);
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a TouchSample;
    type IntoIter = std::slice::Iter<'a, TouchSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Recognizer-level phase emitted by [`SampleTracker::update`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// The first contact of a gesture began
    Began,
    /// Contacts changed while the gesture is active
    Changed,
    /// The last contact ended or was cancelled
    Ended,
}

/// Observer callback invoked after each tracker update
///
/// Arguments: the sample set as it existed before the update, the updated
/// sample set, the raw event and the emitted phase.
pub type SampleObserver = Box<dyn FnMut(&SampleSet, &SampleSet, &TouchEvent, GesturePhase)>;

/// Tracks the active touch contacts and their most recent locations
///
/// Each [`TouchEvent`] passed to [`Self::update`] produces a new sample set
/// from the previous one according to the event kind:
///
/// -   `Begin`: a fresh sample is captured for each contact reported with
///     phase [`TouchPhase::Started`] and unioned into the set
/// -   `Move`: each reported contact which already has a sample gets a fresh
///     one; samples of contacts not reported persist unchanged
/// -   `End` / `Cancel`: samples of contacts reported with the matching
///     terminal phase are removed
///
/// Raw locations are mapped into the recognizer's reference coordinate space
/// by the [coordinate map](Self::set_coord_map) once, at capture time.
///
/// The tracker owns its sample set exclusively; the observer receives
/// borrowed snapshots of the previous and new sets per update.
pub struct SampleTracker {
    samples: SampleSet,
    coord_map: Affine,
    observer: Option<SampleObserver>,
}

impl Default for SampleTracker {
    fn default() -> Self {
        SampleTracker {
            samples: SampleSet::new(),
            coord_map: Affine::IDENTITY,
            observer: None,
        }
    }
}

impl fmt::Debug for SampleTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleTracker")
            .field("samples", &self.samples)
            .field("coord_map", &self.coord_map)
            .field("observer", &self.observer.as_ref().map(|_| ".."))
            .finish()
    }
}

impl SampleTracker {
    /// Construct with an identity coordinate map and no observer
    pub fn new() -> Self {
        SampleTracker::default()
    }

    /// The current sample set
    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    /// Get the coordinate map
    pub fn coord_map(&self) -> Affine {
        self.coord_map
    }

    /// Set the transform applied to raw locations at capture time
    ///
    /// This decouples the tracker from any particular view or coordinate
    /// hierarchy. Already-captured samples are unaffected. Default: identity.
    pub fn set_coord_map(&mut self, map: Affine) {
        self.coord_map = map;
    }

    /// Set the observer, replacing any existing observer
    pub fn set_observer(
        &mut self,
        observer: impl FnMut(&SampleSet, &SampleSet, &TouchEvent, GesturePhase) + 'static,
    ) {
        self.observer = Some(Box::new(observer));
    }

    /// Remove the observer
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Apply one touch lifecycle event
    ///
    /// Captures the pre-update sample set, applies the update, then notifies
    /// the observer with both sets, the raw event and the returned phase.
    pub fn update(&mut self, event: &TouchEvent) -> GesturePhase {
        let previous = self.samples.clone();
        let map = self.coord_map;

        let phase = match event.kind {
            EventKind::Begin => {
                for touch in &event.touches {
                    if touch.phase == TouchPhase::Started {
                        self.samples.insert(TouchSample {
                            id: touch.id,
                            coord: map * touch.position,
                        });
                    }
                }
                if self.samples.len() == 1 {
                    GesturePhase::Began
                } else {
                    GesturePhase::Changed
                }
            }
            EventKind::Move => {
                for touch in &event.touches {
                    self.samples.replace(TouchSample {
                        id: touch.id,
                        coord: map * touch.position,
                    });
                }
                GesturePhase::Changed
            }
            EventKind::End => {
                for touch in &event.touches {
                    if touch.phase == TouchPhase::Ended {
                        self.samples.remove_id(touch.id);
                    }
                }
                if self.samples.is_empty() {
                    GesturePhase::Ended
                } else {
                    GesturePhase::Changed
                }
            }
            EventKind::Cancel => {
                for touch in &event.touches {
                    if touch.phase == TouchPhase::Cancelled {
                        self.samples.remove_id(touch.id);
                    }
                }
                if self.samples.is_empty() {
                    GesturePhase::Ended
                } else {
                    GesturePhase::Changed
                }
            }
        };

        log::trace!(
            "update: kind={:?}, samples {} -> {}, phase={phase:?}",
            event.kind,
            previous.len(),
            self.samples.len()
        );

        if let Some(observer) = self.observer.as_mut() {
            observer(&previous, &self.samples, event, phase);
        }
        phase
    }

    /// Clear the active sample set unconditionally
    ///
    /// Invoked by the host when recognizer state is cleared, e.g. after
    /// gesture completion or failure. Does not notify the observer; the
    /// coordinate map and observer persist.
    pub fn reset(&mut self) {
        log::trace!("reset: clearing {} samples", self.samples.len());
        self.samples.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geom::Linear;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn touch(id: u64, x: f64, y: f64, phase: TouchPhase) -> Touch {
        Touch {
            id: TouchId(id),
            position: Vec2(x, y),
            phase,
        }
    }

    #[test]
    fn sample_identity() {
        let a = TouchSample {
            id: TouchId(1),
            coord: Vec2(1.0, 2.0),
        };
        let moved = TouchSample {
            id: TouchId(1),
            coord: Vec2(1.0, 3.0),
        };
        let other = TouchSample {
            id: TouchId(2),
            coord: Vec2(1.0, 2.0),
        };
        assert_eq!(a, a);
        assert_ne!(a, moved);
        assert_ne!(a, other);

        let mut set = SampleSet::new();
        assert!(set.insert(a));
        assert!(!set.insert(a));
        assert!(set.insert(moved));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(TouchId(1)), Some(&a));
    }

    #[test]
    fn begin_phases() {
        let mut tracker = SampleTracker::new();
        let phase = tracker.update(&TouchEvent::new(EventKind::Begin, [touch(
            1,
            0.0,
            0.0,
            TouchPhase::Started,
        )]));
        assert_eq!(phase, GesturePhase::Began);
        assert_eq!(tracker.samples().len(), 1);

        let phase = tracker.update(&TouchEvent::new(EventKind::Begin, [touch(
            2,
            5.0,
            5.0,
            TouchPhase::Started,
        )]));
        assert_eq!(phase, GesturePhase::Changed);
        assert_eq!(tracker.samples().len(), 2);
    }

    #[test]
    fn move_replaces_only_reported_contacts() {
        let mut tracker = SampleTracker::new();
        tracker.update(&TouchEvent::new(EventKind::Begin, [
            touch(1, 0.0, 0.0, TouchPhase::Started),
            touch(2, 10.0, 0.0, TouchPhase::Started),
        ]));

        let phase = tracker.update(&TouchEvent::new(EventKind::Move, [touch(
            1,
            3.0,
            4.0,
            TouchPhase::Moved,
        )]));
        assert_eq!(phase, GesturePhase::Changed);
        assert_eq!(tracker.samples().len(), 2);
        assert_eq!(tracker.samples().get(TouchId(1)).map(|s| s.coord), Some(Vec2(3.0, 4.0)));
        // the stale sample for contact 2 persists unchanged
        assert_eq!(tracker.samples().get(TouchId(2)).map(|s| s.coord), Some(Vec2(10.0, 0.0)));

        // a move for an unknown contact is a no-op
        tracker.update(&TouchEvent::new(EventKind::Move, [touch(
            9,
            1.0,
            1.0,
            TouchPhase::Moved,
        )]));
        assert_eq!(tracker.samples().len(), 2);
        assert!(tracker.samples().get(TouchId(9)).is_none());
    }

    #[test]
    fn end_and_cancel_remove_matching_phase_only() {
        let mut tracker = SampleTracker::new();
        tracker.update(&TouchEvent::new(EventKind::Begin, [
            touch(1, 0.0, 0.0, TouchPhase::Started),
            touch(2, 10.0, 0.0, TouchPhase::Started),
        ]));

        // an end event listing a still-moving contact removes only the ended one
        let phase = tracker.update(&TouchEvent::new(EventKind::End, [
            touch(1, 0.0, 0.0, TouchPhase::Ended),
            touch(2, 10.0, 0.0, TouchPhase::Moved),
        ]));
        assert_eq!(phase, GesturePhase::Changed);
        assert_eq!(tracker.samples().len(), 1);

        let phase = tracker.update(&TouchEvent::new(EventKind::Cancel, [touch(
            2,
            10.0,
            0.0,
            TouchPhase::Cancelled,
        )]));
        assert_eq!(phase, GesturePhase::Ended);
        assert!(tracker.samples().is_empty());
    }

    #[test]
    fn coord_map_applies_at_capture() {
        let mut tracker = SampleTracker::new();
        tracker.set_coord_map(Affine::from(Linear::scale(2.0)));
        tracker.update(&TouchEvent::new(EventKind::Begin, [touch(
            1,
            3.0,
            4.0,
            TouchPhase::Started,
        )]));
        assert_eq!(tracker.samples().get(TouchId(1)).map(|s| s.coord), Some(Vec2(6.0, 8.0)));

        // changing the map later does not re-map captured samples
        tracker.set_coord_map(Affine::IDENTITY);
        assert_eq!(tracker.samples().get(TouchId(1)).map(|s| s.coord), Some(Vec2(6.0, 8.0)));
    }

    #[test]
    fn observer_sees_pre_update_set() {
        let seen: Rc<RefCell<Vec<(usize, usize, GesturePhase)>>> = Default::default();
        let log = seen.clone();

        let mut tracker = SampleTracker::new();
        tracker.set_observer(move |previous, current, _event, phase| {
            log.borrow_mut().push((previous.len(), current.len(), phase));
        });

        tracker.update(&TouchEvent::new(EventKind::Begin, [touch(
            1,
            0.0,
            0.0,
            TouchPhase::Started,
        )]));
        tracker.update(&TouchEvent::new(EventKind::Move, [touch(
            1,
            5.0,
            0.0,
            TouchPhase::Moved,
        )]));
        tracker.update(&TouchEvent::new(EventKind::End, [touch(
            1,
            5.0,
            0.0,
            TouchPhase::Ended,
        )]));

        assert_eq!(*seen.borrow(), [
            (0, 1, GesturePhase::Began),
            (1, 1, GesturePhase::Changed),
            (1, 0, GesturePhase::Ended),
        ]);
    }

    #[test]
    fn reset_restores_initial_behaviour() {
        let mut tracker = SampleTracker::new();
        tracker.update(&TouchEvent::new(EventKind::Begin, [
            touch(1, 0.0, 0.0, TouchPhase::Started),
            touch(2, 1.0, 1.0, TouchPhase::Started),
        ]));
        tracker.reset();
        assert!(tracker.samples().is_empty());

        // same event, same result as on a fresh tracker
        let event = TouchEvent::new(EventKind::Begin, [touch(7, 2.0, 2.0, TouchPhase::Started)]);
        let phase = tracker.update(&event);
        let mut fresh = SampleTracker::new();
        assert_eq!(phase, fresh.update(&event));
        assert_eq!(tracker.samples().len(), fresh.samples().len());
        assert_eq!(
            tracker.samples().get(TouchId(7)),
            fresh.samples().get(TouchId(7))
        );
    }
}

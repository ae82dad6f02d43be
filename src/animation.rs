//! Animation playback contract and a single-slot reference player.
//!
//! The combat core never drives animation content itself. It starts, stops and
//! queries clips through [`AnimationPlayback`], and learns that a clip ended by
//! draining [`MontageEnd`] records which the plugin turns into
//! [`MontageEnded`] events.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::CLIP_HISTORY_LEN;

/// Identifier of a playable animation clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationRef(pub String);

impl AnimationRef {
    /// Builds a reference from any string-like name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Clip name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnimationRef {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl fmt::Display for AnimationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A clip that stopped playing, either by finishing or by being interrupted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MontageEnd {
    /// Clip that stopped.
    pub animation: AnimationRef,
    /// `true` when something cut the clip short.
    pub interrupted: bool,
}

/// Playback service attached to an animated entity.
#[cfg_attr(test, mockall::automock)]
pub trait AnimationPlayback {
    /// Starts `animation`.
    fn play(&mut self, animation: &AnimationRef);
    /// Stops `animation`, or everything when `None`, blending out over
    /// `blend_out` seconds.
    fn stop(&mut self, blend_out: f32, animation: Option<AnimationRef>);
    /// Whether any clip is playing.
    fn is_any_playing(&self) -> bool;
    /// Whether `animation` is the clip playing.
    fn is_playing(&self, animation: &AnimationRef) -> bool;
    /// The clip playing, if any.
    fn current_active(&self) -> Option<AnimationRef>;
    /// Returns and forgets every clip that ended since the last call.
    fn drain_ended(&mut self) -> Vec<MontageEnd>;
}

/// Component holding an entity's animation playback service.
#[derive(Component)]
pub struct Animator(Box<dyn AnimationPlayback + Send + Sync>);

impl Animator {
    /// Wraps a playback service.
    #[must_use]
    pub fn new(playback: impl AnimationPlayback + Send + Sync + 'static) -> Self {
        Self(Box::new(playback))
    }

    /// The wrapped playback service.
    #[must_use]
    pub fn playback(&self) -> &(dyn AnimationPlayback + Send + Sync) {
        self.0.as_ref()
    }

    /// Mutable access to the wrapped playback service.
    pub fn playback_mut(&mut self) -> &mut (dyn AnimationPlayback + Send + Sync) {
        self.0.as_mut()
    }
}

/// Event raised when an animation on `entity` stops playing.
///
/// The reset logic treats finished and interrupted clips identically; the
/// flag is carried for diagnostics.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct MontageEnded {
    /// Entity whose clip stopped.
    pub entity: Entity,
    /// Clip that stopped.
    pub animation: AnimationRef,
    /// `true` when something cut the clip short.
    pub interrupted: bool,
}

/// Single-slot in-memory player.
///
/// Starting a clip interrupts whatever was playing, mirroring a montage slot.
/// Clips only finish normally through [`ClipPlayer::complete`], so hosts and
/// tests decide when choreography ends. Clones share the same slot, which lets
/// a host keep a handle after moving the player into an [`Animator`].
#[derive(Debug, Default, Clone)]
pub struct ClipPlayer {
    slot: Arc<Mutex<ClipSlot>>,
}

#[derive(Debug, Default)]
struct ClipSlot {
    current: Option<AnimationRef>,
    ended: Vec<MontageEnd>,
    started: VecDeque<AnimationRef>,
}

impl ClipSlot {
    fn finish_current(&mut self, interrupted: bool) {
        if let Some(animation) = self.current.take() {
            self.ended.push(MontageEnd {
                animation,
                interrupted,
            });
        }
    }
}

impl ClipPlayer {
    /// Creates an idle player.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, ClipSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Finishes `animation` normally if it is the clip currently playing.
    ///
    /// Returns `true` when a clip was completed.
    pub fn complete(&self, animation: &AnimationRef) -> bool {
        let mut slot = self.slot();
        if slot.current.as_ref() != Some(animation) {
            return false;
        }
        slot.finish_current(false);
        true
    }

    /// The most recent clips started on this player, oldest first.
    ///
    /// At most [`CLIP_HISTORY_LEN`] clips are kept.
    #[must_use]
    pub fn started(&self) -> Vec<AnimationRef> {
        self.slot().started.iter().cloned().collect()
    }
}

impl AnimationPlayback for ClipPlayer {
    fn play(&mut self, animation: &AnimationRef) {
        let mut slot = self.slot();
        slot.finish_current(true);
        slot.current = Some(animation.clone());
        if slot.started.len() == CLIP_HISTORY_LEN {
            slot.started.pop_front();
        }
        slot.started.push_back(animation.clone());
    }

    fn stop(&mut self, _blend_out: f32, animation: Option<AnimationRef>) {
        let mut slot = self.slot();
        match animation {
            Some(specific) if slot.current.as_ref() != Some(&specific) => {}
            _ => slot.finish_current(true),
        }
    }

    fn is_any_playing(&self) -> bool {
        self.slot().current.is_some()
    }

    fn is_playing(&self, animation: &AnimationRef) -> bool {
        self.slot().current.as_ref() == Some(animation)
    }

    fn current_active(&self) -> Option<AnimationRef> {
        self.slot().current.clone()
    }

    fn drain_ended(&mut self) -> Vec<MontageEnd> {
        std::mem::take(&mut self.slot().ended)
    }
}

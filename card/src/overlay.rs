//! The reveal sequence shown when the camera button is pressed.
//!
//! ```text
//!          trigger (only from Idle)
//!   ┌──────┐ ─────────────────────────► ┌────────┐
//!   │ Idle │                            │ Active │
//!   └──────┘ ◄───────────────────────── └────────┘
//!           restore timer fires (3000 ms)
//! ```
//!
//! Going active hides the `ux` layer, shows the `haunting` layer with one
//! random haunting element and a random caption. The restore timer is the
//! only way back; a trigger while active is dropped.

use std::time::Duration;

use rand::Rng;

use crate::{
    assets::AssetSizes,
    descriptor::ContentDescriptor,
    layer::{HAUNTING, LayerRegistry, UX, VisualElement},
    placement::Point,
    scene::SceneTask,
    timer::{TimerId, Timers},
};

pub const REVEAL_DURATION: Duration = Duration::from_millis(3000);

pub const CAPTIONS: [&str; 3] = ["Happy birthday!!", "Victorian greetings", "Felicitations"];

pub const CAPTION_POSITION: Point = Point::new(500.0, 670.0);
pub const CAPTION_FONT_SIZE: f32 = 30.0;

/// Text shown over the scene while the reveal is active.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: &'static str,
    pub position: Point,
    pub font_size: f32,
    pub italic: bool,
    /// Fraction of the text box anchored at `position`, `(0.5, 0.5)` centres it.
    pub origin: (f32, f32),
}

impl Caption {
    #[must_use]
    pub const fn centered(text: &'static str) -> Self {
        Self {
            text,
            position: CAPTION_POSITION,
            font_size: CAPTION_FONT_SIZE,
            italic: true,
            origin: (0.5, 0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Active {
        restore: TimerId,
    },
}

/// Picks one item uniformly at random, `None` for an empty slice.
pub fn choose_uniform<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }

    Some(&items[rng.gen_range(0..items.len())])
}

#[derive(Debug, Default)]
pub struct OverlaySequencer {
    phase: Phase,
    caption: Option<Caption>,
}

impl OverlaySequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    #[must_use]
    pub const fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }

    /// Starts the reveal. Returns `false`, changing nothing, if it's
    /// already running.
    ///
    /// The phase test and the switch to `Active` happen within this single
    /// exclusive borrow, so two triggers can never both see `Idle`.
    pub fn trigger<R: Rng + ?Sized>(
        &mut self,
        layers: &mut LayerRegistry,
        descriptor: &ContentDescriptor,
        sizes: &AssetSizes,
        rng: &mut R,
        timers: &mut Timers<SceneTask>,
    ) -> bool {
        if self.is_active() {
            tracing::debug!("reveal already running, trigger dropped");
            return false;
        }

        layers.set_visible(UX, false);
        layers.set_visible(HAUNTING, true);

        let candidates = descriptor.haunting_candidates();
        if let Some(slot) = choose_uniform(rng, &candidates) {
            // candidates always carry a key
            let key = slot.haunting_key().unwrap_or_default();
            let element = VisualElement::placed(key, slot.bounds(), sizes.get(key));
            layers.add_element(HAUNTING, element);
            tracing::debug!("haunting with `{key}`");
        }

        let text = choose_uniform(rng, &CAPTIONS).copied().unwrap_or(CAPTIONS[0]);
        self.caption = Some(Caption::centered(text));

        let restore = timers.schedule(REVEAL_DURATION, SceneTask::RestoreOverlay);
        self.phase = Phase::Active { restore };

        true
    }

    /// Ends the reveal: drops the caption, shows `ux` again and hides
    /// `haunting`.
    pub fn restore(&mut self, layers: &mut LayerRegistry, timer: TimerId) {
        match self.phase {
            Phase::Active { restore } if restore == timer => {}
            Phase::Active { .. } => {
                tracing::warn!("restore timer {timer:?} doesn't match the running reveal");
                return;
            }
            Phase::Idle => {
                tracing::debug!("restore fired while idle, ignoring");
                return;
            }
        }

        self.caption = None;
        layers.set_visible(UX, true);
        layers.set_visible(HAUNTING, false);
        self.phase = Phase::Idle;
    }
}

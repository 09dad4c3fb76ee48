//! # Scene Controller
//!
//! Ties the layer stack, the buttons, the reveal sequence and the timers
//! together into one greeting card scene.
//!
//! ## Build Flow
//!
//! ```text
//! SceneController::with_rng(descriptor, sizes, rng)
//!     │
//!     ├─► create layers, bottom to top:
//!     │   ├─► background            (single)
//!     │   ├─► one per slot layer    (single, temporary)
//!     │   ├─► haunting              (single, hidden)
//!     │   └─► ux
//!     │
//!     ├─► reset()
//!     │   └─► clear temporary layers, show the first background
//!     │
//!     └─► UI chrome in `ux`:
//!         ├─► blank strip along the bottom
//!         ├─► reset / toggle / camera buttons
//!         └─► per slot layer: a divider, then one button per option
//! ```
//!
//! ## Time
//!
//! Nothing here reads a clock. [`SceneController::advance`] moves the
//! virtual clock and runs whatever became due: the end of the reveal and
//! the delayed snapshot.

use std::{io, time::Duration};

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    assets::AssetSizes,
    button::{Interaction, PointerEvent, create_button, topmost_at},
    descriptor::ContentDescriptor,
    layer::{BACKGROUND, ElementId, HAUNTING, LayerRegistry, UX, VisualElement},
    overlay::{OverlaySequencer, Phase},
    placement::{Bounds, Point},
    timer::Timers,
};

/// Scene size, all coordinates are in this space.
pub const CANVAS_WIDTH: f32 = 1000.0;
pub const CANVAS_HEIGHT: f32 = 750.0;

/// Time between pressing the camera and taking the snapshot, so the
/// reveal is on screen when it's taken.
pub const CAPTURE_DELAY: Duration = Duration::from_millis(100);

/// Base name of the exported picture.
pub const SNAPSHOT_NAME: &str = "birthday_card";

const STRIP: Bounds = Bounds::sized(0.0, 650.0, CANVAS_WIDTH, 100.0);
const RESET_BUTTON: Bounds = Bounds::sized(10.0, 670.0, 60.0, 60.0);
const TOGGLE_BUTTON: Bounds = Bounds::sized(80.0, 670.0, 60.0, 60.0);
const CAMERA_BUTTON: Bounds = Bounds::sized(150.0, 670.0, 60.0, 60.0);

const MENU_LEFT: f32 = 240.0;
const MENU_STEP: f32 = 100.0;
const MENU_TOP: f32 = 670.0;
const MENU_BUTTON_SIZE: f32 = 60.0;
const DIVIDER_LEFT: f32 = 220.0;
const DIVIDER_TOP: f32 = 660.0;
const DIVIDER_WIDTH: f32 = 5.0;
const DIVIDER_HEIGHT: f32 = 80.0;
const DIVIDER_TINT: u32 = 0x00_0000;

/// What a button does when released.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneAction {
    Reset,
    ToggleBackground,
    Export,
    /// Show `asset_key` in `layer` at `bounds`.
    Place {
        layer: String,
        asset_key: String,
        bounds: Bounds,
    },
}

/// Deferred work run by [`SceneController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTask {
    RestoreOverlay,
    Capture,
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no frame available: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Turns the current frame into a downloadable picture.
pub trait Camera {
    /// # Errors
    /// Fails if the frame can't be grabbed or stored.
    fn capture(&mut self, name: &str) -> Result<(), CaptureError>;
}

pub struct SceneController<R = StdRng> {
    descriptor: ContentDescriptor,
    sizes: AssetSizes,
    layers: LayerRegistry,
    overlay: OverlaySequencer,
    timers: Timers<SceneTask>,
    /// Index of the shown place, `None` before the first toggle.
    background: Option<usize>,
    rng: R,
}

impl SceneController<StdRng> {
    #[must_use]
    pub fn new(descriptor: ContentDescriptor, sizes: AssetSizes) -> Self {
        Self::with_rng(descriptor, sizes, StdRng::from_entropy())
    }
}

impl<R: rand::Rng> SceneController<R> {
    /// Builds the layer stack and the UI chrome, then resets the scene.
    pub fn with_rng(descriptor: ContentDescriptor, sizes: AssetSizes, rng: R) -> Self {
        let mut scene = Self {
            descriptor,
            sizes,
            layers: LayerRegistry::new(),
            overlay: OverlaySequencer::new(),
            timers: Timers::new(),
            background: None,
            rng,
        };

        scene.create_layers();
        scene.reset();
        scene.create_chrome();
        scene.create_menu();

        tracing::info!(
            "scene ready: {} places, {} layers",
            scene.descriptor.place_count(),
            scene.layers.len()
        );

        scene
    }

    fn create_layers(&mut self) {
        let layers = &mut self.layers;

        if let Ok(background) = layers.create_layer(BACKGROUND) {
            background.single = true;
        }

        for entry in self.descriptor.slots() {
            match layers.create_layer(entry.layer) {
                Ok(layer) => {
                    layer.single = true;
                    layer.temporary = true;
                }
                Err(e) => tracing::warn!("place `{}`: {e}, sharing it", entry.place),
            }
        }

        if let Ok(haunting) = layers.create_layer(HAUNTING) {
            haunting.single = true;
            haunting.visible = false;
        }

        if let Err(e) = layers.create_layer(UX) {
            tracing::warn!("{e}");
        }
    }

    fn create_chrome(&mut self) {
        self.place(UX, "blank", STRIP);

        let buttons = [
            ("reset", RESET_BUTTON, SceneAction::Reset),
            ("toggle", TOGGLE_BUTTON, SceneAction::ToggleBackground),
            ("camera", CAMERA_BUTTON, SceneAction::Export),
        ];
        for (key, bounds, action) in buttons {
            create_button(&mut self.layers, &self.sizes, key, bounds, action);
        }
    }

    fn create_menu(&mut self) {
        let mut index: u16 = 0;

        for entry in self.descriptor.slots() {
            let offset = f32::from(index) * MENU_STEP;

            let divider = VisualElement::placed(
                "blank",
                Bounds::sized(
                    DIVIDER_LEFT + offset,
                    DIVIDER_TOP,
                    DIVIDER_WIDTH,
                    DIVIDER_HEIGHT,
                ),
                self.sizes.get("blank"),
            )
            .with_tint(DIVIDER_TINT);
            self.layers.add_element(UX, divider);

            for option in &entry.slot.options {
                let bounds = Bounds::sized(
                    MENU_LEFT + f32::from(index) * MENU_STEP,
                    MENU_TOP,
                    MENU_BUTTON_SIZE,
                    MENU_BUTTON_SIZE,
                )
                .preserving_aspect();

                let action = SceneAction::Place {
                    layer: entry.layer.to_owned(),
                    asset_key: option.clone(),
                    bounds: entry.slot.bounds(),
                };
                create_button(&mut self.layers, &self.sizes, option, bounds, action);
                index = index.saturating_add(1);
            }
        }
    }

    /// Shows `asset_key` in `layer`, or unsorted if there's no such layer.
    pub fn place(&mut self, layer: &str, asset_key: &str, bounds: Bounds) -> ElementId {
        let element = VisualElement::placed(asset_key, bounds, self.sizes.get(asset_key));
        self.layers.add_element(layer, element)
    }

    /// Clears every chosen option and goes back to the first background.
    pub fn reset(&mut self) {
        self.layers.clear_temporary();
        self.layers.clear_unsorted();
        self.background = None;
        self.toggle_background();
    }

    /// Shows the next place as background, wrapping around after the last.
    pub fn toggle_background(&mut self) {
        let count = self.descriptor.place_count();
        if count == 0 {
            tracing::debug!("no places, nothing to toggle");
            return;
        }

        let next = self.background.map_or(0, |current| (current + 1) % count);
        self.background = Some(next);

        if let Some(place) = self.descriptor.place_at(next).map(str::to_owned) {
            self.place(BACKGROUND, &place, Bounds::at(0.0, 0.0));
        }
    }

    /// Starts the reveal. `false` if it was already running.
    pub fn trigger_reveal(&mut self) -> bool {
        self.overlay.trigger(
            &mut self.layers,
            &self.descriptor,
            &self.sizes,
            &mut self.rng,
            &mut self.timers,
        )
    }

    /// Starts the reveal and takes a snapshot shortly after.
    pub fn export(&mut self) {
        self.trigger_reveal();
        self.timers.schedule(CAPTURE_DELAY, SceneTask::Capture);
    }

    pub fn dispatch(&mut self, action: SceneAction) {
        tracing::debug!("dispatching {action:?}");

        match action {
            SceneAction::Reset => self.reset(),
            SceneAction::ToggleBackground => self.toggle_background(),
            SceneAction::Export => self.export(),
            SceneAction::Place {
                layer,
                asset_key,
                bounds,
            } => {
                self.place(&layer, &asset_key, bounds);
            }
        }
    }

    /// Updates hover state of the buttons for a pointer at `point`
    /// (`None` when it left the canvas).
    pub fn pointer_moved(&mut self, point: Option<Point>) {
        if !self.layers.is_visible(UX) {
            return;
        }
        let Some(ux) = self.layers.find_layer_mut(UX) else {
            return;
        };

        let target = match point {
            Some(point) => topmost_at(ux, point),
            None => None,
        };

        for element in ux.elements_mut() {
            let Some(hovered) = element.interaction.as_ref().map(Interaction::is_hovered) else {
                continue;
            };
            let is_target = Some(element.id()) == target;

            if is_target && !hovered {
                element.handle_pointer(PointerEvent::Enter);
            } else if !is_target && hovered {
                element.handle_pointer(PointerEvent::Leave);
            }
        }
    }

    /// Releases the pointer at `point`, running the action of the button
    /// under it. Returns whether a button was hit.
    pub fn pointer_released(&mut self, point: Point) -> bool {
        if !self.layers.is_visible(UX) {
            return false;
        }
        let Some(ux) = self.layers.find_layer_mut(UX) else {
            return false;
        };
        let Some(target) = topmost_at(ux, point) else {
            return false;
        };

        let action = ux
            .elements_mut()
            .iter_mut()
            .find(|e| e.id() == target)
            .and_then(|e| e.handle_pointer(PointerEvent::Release));

        let Some(action) = action else {
            return false;
        };
        self.dispatch(action);

        true
    }

    /// Moves the clock by `elapsed` and runs the tasks that became due.
    /// Snapshot failures are logged and dropped.
    pub fn advance(&mut self, elapsed: Duration, camera: &mut dyn Camera) {
        for (id, task) in self.timers.advance(elapsed) {
            match task {
                SceneTask::RestoreOverlay => self.overlay.restore(&mut self.layers, id),
                SceneTask::Capture => {
                    if let Err(e) = camera.capture(SNAPSHOT_NAME) {
                        tracing::warn!("failed to capture screenshot: {e}");
                    }
                }
            }
        }
    }

    #[must_use]
    pub const fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    #[must_use]
    pub const fn overlay(&self) -> &OverlaySequencer {
        &self.overlay
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.overlay.phase()
    }

    #[must_use]
    pub const fn descriptor(&self) -> &ContentDescriptor {
        &self.descriptor
    }

    /// Index of the place shown as background.
    #[must_use]
    pub const fn background_index(&self) -> Option<usize> {
        self.background
    }

    /// Time until the next timer fires, if any is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}

//! Clickable elements of the `ux` layer.
//!
//! A button is a [`VisualElement`] with an [`Interaction`] attached. It is
//! half transparent until the pointer hovers it, and every release over it
//! yields its [`SceneAction`] once. There is no debouncing: two releases
//! yield the action twice.

use crate::{
    assets::AssetSizes,
    layer::{ElementId, Layer, LayerRegistry, UX, VisualElement},
    placement::{Bounds, Point},
    scene::SceneAction,
};

pub const ALPHA_DEFAULT: f32 = 0.5;
pub const ALPHA_HOVER: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Release,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    action: SceneAction,
    hovered: bool,
}

impl Interaction {
    #[must_use]
    pub const fn new(action: SceneAction) -> Self {
        Self {
            action,
            hovered: false,
        }
    }

    #[must_use]
    pub const fn action(&self) -> &SceneAction {
        &self.action
    }

    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }
}

impl VisualElement {
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interaction.is_some()
    }

    /// Applies a pointer event, returning the action to run on release.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<SceneAction> {
        let interaction = self.interaction.as_mut()?;

        match event {
            PointerEvent::Enter => {
                interaction.hovered = true;
                self.alpha = ALPHA_HOVER;
                None
            }
            PointerEvent::Leave => {
                interaction.hovered = false;
                self.alpha = ALPHA_DEFAULT;
                None
            }
            PointerEvent::Release => Some(interaction.action.clone()),
        }
    }
}

/// Places `asset_key` as a button in the `ux` layer.
pub fn create_button(
    layers: &mut LayerRegistry,
    sizes: &AssetSizes,
    asset_key: &str,
    bounds: Bounds,
    action: SceneAction,
) -> ElementId {
    let mut button = VisualElement::placed(asset_key, bounds, sizes.get(asset_key));
    button.alpha = ALPHA_DEFAULT;
    button.interaction = Some(Interaction::new(action));

    layers.add_element(UX, button)
}

/// The top-most interactive element of `layer` under `point`.
#[must_use]
pub fn topmost_at(layer: &Layer, point: Point) -> Option<ElementId> {
    layer
        .elements()
        .iter()
        .rev()
        .find(|e| e.is_interactive() && e.contains(point))
        .map(VisualElement::id)
}

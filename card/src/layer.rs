//! Ordered stack of named layers.
//!
//! Layers are drawn in creation order: the first layer is the bottom of the
//! stack. Each layer carries three policy flags:
//!
//! | Flag        | Meaning                                            |
//! |-------------|----------------------------------------------------|
//! | `single`    | at most one element, a new one evicts the old ones |
//! | `temporary` | emptied by [`LayerRegistry::clear_temporary`]      |
//! | `visible`   | skipped by the renderer and by pointer input       |
//!
//! Elements added to a name that has no layer are kept in an unsorted
//! collection instead. They are drawn above every layer and are only removed
//! by [`LayerRegistry::clear_unsorted`] or [`LayerRegistry::remove_element`].

use std::collections::HashMap;

use crate::{
    button::Interaction,
    placement::{Bounds, Point, Scale, Size, compute_placement},
};

pub const BACKGROUND: &str = "background";
pub const HAUNTING: &str = "haunting";
pub const UX: &str = "ux";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayerError {
    #[error("layer `{0}` already exists")]
    Duplicate(String),
}

/// An image placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualElement {
    id: ElementId,
    pub asset_key: String,
    pub position: Point,
    /// Size of the source texture, if it was known at placement time.
    pub natural: Option<Size>,
    pub scale: Scale,
    pub alpha: f32,
    /// `0xRRGGBB` multiplied with the texture.
    pub tint: Option<u32>,
    pub interaction: Option<Interaction>,
}

impl VisualElement {
    /// Places `asset_key` in `bounds`, computing the scale from the texture size.
    #[must_use]
    pub fn placed(asset_key: &str, bounds: Bounds, natural: Option<Size>) -> Self {
        let scale = natural.map_or_else(
            || {
                tracing::warn!("no texture size for `{asset_key}`, using natural scale");
                Scale::IDENTITY
            },
            |natural| {
                compute_placement(natural, bounds.width, bounds.height, bounds.preserve_aspect)
            },
        );

        Self {
            id: ElementId(0),
            asset_key: asset_key.to_owned(),
            position: bounds.origin(),
            natural,
            scale,
            alpha: 1.0,
            tint: None,
            interaction: None,
        }
    }

    #[must_use]
    pub const fn with_tint(mut self, tint: u32) -> Self {
        self.tint = Some(tint);
        self
    }

    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// Size on screen, zero when the texture size is unknown.
    #[must_use]
    pub fn display_size(&self) -> Size {
        self.natural.map_or_else(Size::default, |natural| {
            Size::new(natural.width * self.scale.x, natural.height * self.scale.y)
        })
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let size = self.display_size();
        point.x >= self.position.x
            && point.y >= self.position.y
            && point.x < self.position.x + size.width
            && point.y < self.position.y + size.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    elements: Vec<VisualElement>,
    pub single: bool,
    pub temporary: bool,
    pub visible: bool,
}

impl Layer {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            elements: Vec::new(),
            single: false,
            temporary: false,
            visible: true,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Elements in drawing order.
    #[must_use]
    pub fn elements(&self) -> &[VisualElement] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [VisualElement] {
        &mut self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }
}

/// Owns every layer and every placed element of a scene.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    by_name: HashMap<String, LayerId>,
    unsorted: Vec<VisualElement>,
    next_element: u64,
}

impl LayerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a new visible, non-single, non-temporary layer on top of the stack.
    ///
    /// # Errors
    /// Returns [`LayerError::Duplicate`] if a layer with that name exists.
    pub fn create_layer(&mut self, name: &str) -> Result<&mut Layer, LayerError> {
        if self.by_name.contains_key(name) {
            return Err(LayerError::Duplicate(name.to_owned()));
        }

        let id = LayerId(self.layers.len());
        self.by_name.insert(name.to_owned(), id);
        self.layers.push(Layer::new(name));

        Ok(&mut self.layers[id.0])
    }

    #[must_use]
    pub fn find_layer(&self, name: &str) -> Option<&Layer> {
        self.by_name.get(name).map(|id| &self.layers[id.0])
    }

    pub fn find_layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.by_name.get(name).map(|id| &mut self.layers[id.0])
    }

    /// Adds `element` to the layer called `layer`, evicting the current
    /// contents of a `single` layer. Without such a layer the element goes to
    /// the unsorted collection.
    pub fn add_element(&mut self, layer: &str, mut element: VisualElement) -> ElementId {
        self.next_element += 1;
        element.id = ElementId(self.next_element);
        let id = element.id;

        if let Some(target) = self.find_layer_mut(layer) {
            if target.single {
                target.clear();
            }
            target.elements.push(element);
        } else {
            tracing::debug!("no layer `{layer}`, keeping `{}` unsorted", element.asset_key);
            self.unsorted.push(element);
        }

        id
    }

    /// Removes an element wherever it lives.
    pub fn remove_element(&mut self, id: ElementId) -> Option<VisualElement> {
        for layer in &mut self.layers {
            if let Some(index) = layer.elements.iter().position(|e| e.id == id) {
                return Some(layer.elements.remove(index));
            }
        }

        let index = self.unsorted.iter().position(|e| e.id == id)?;
        Some(self.unsorted.remove(index))
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&VisualElement> {
        self.layers
            .iter()
            .flat_map(|layer| layer.elements.iter())
            .chain(self.unsorted.iter())
            .find(|e| e.id == id)
    }

    /// Empties every `temporary` layer. The layers themselves stay.
    pub fn clear_temporary(&mut self) {
        self.layers
            .iter_mut()
            .filter(|layer| layer.temporary)
            .for_each(Layer::clear);
    }

    pub fn clear_unsorted(&mut self) {
        self.unsorted.clear();
    }

    /// Returns `false` if there's no such layer.
    pub fn set_visible(&mut self, name: &str, visible: bool) -> bool {
        self.find_layer_mut(name)
            .map(|layer| layer.visible = visible)
            .is_some()
    }

    /// An unknown layer is never visible.
    #[must_use]
    pub fn is_visible(&self, name: &str) -> bool {
        self.find_layer(name).is_some_and(|layer| layer.visible)
    }

    /// Layers from bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    #[must_use]
    pub fn unsorted(&self) -> &[VisualElement] {
        &self.unsorted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image(key: &str) -> VisualElement {
        VisualElement::placed(key, Bounds::at(0.0, 0.0), Some(Size::new(10.0, 10.0)))
    }

    fn keys(layer: &Layer) -> Vec<&str> {
        layer.elements().iter().map(|e| e.asset_key.as_str()).collect()
    }

    #[test]
    fn layers_keep_creation_order() {
        let mut registry = LayerRegistry::new();
        for name in [BACKGROUND, "shelf", HAUNTING, UX] {
            registry.create_layer(name).unwrap();
        }

        assert_eq!(
            registry.layers().map(Layer::name).collect::<Vec<_>>(),
            vec![BACKGROUND, "shelf", HAUNTING, UX]
        );
    }

    #[test]
    fn new_layer_defaults() {
        let mut registry = LayerRegistry::new();
        let layer = registry.create_layer("shelf").unwrap();

        assert!(!layer.single);
        assert!(!layer.temporary);
        assert!(layer.visible);
        assert!(layer.is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = LayerRegistry::new();
        registry.create_layer("shelf").unwrap().single = true;

        assert_eq!(
            registry.create_layer("shelf").unwrap_err(),
            LayerError::Duplicate("shelf".to_string())
        );
        assert_eq!(registry.len(), 1);
        assert!(registry.find_layer("shelf").unwrap().single);
    }

    #[test]
    fn single_layer_keeps_newest_element() {
        let mut registry = LayerRegistry::new();
        registry.create_layer("shelf").unwrap().single = true;

        registry.add_element("shelf", image("book"));
        let candle = registry.add_element("shelf", image("candle"));

        let shelf = registry.find_layer("shelf").unwrap();
        assert_eq!(keys(shelf), vec!["candle"]);
        assert_eq!(shelf.elements()[0].id(), candle);
    }

    #[test]
    fn plain_layer_accumulates() {
        let mut registry = LayerRegistry::new();
        registry.create_layer(UX).unwrap();

        registry.add_element(UX, image("reset"));
        registry.add_element(UX, image("toggle"));

        assert_eq!(keys(registry.find_layer(UX).unwrap()), vec!["reset", "toggle"]);
    }

    #[test]
    fn unknown_layer_goes_unsorted() {
        let mut registry = LayerRegistry::new();
        registry.create_layer("shelf").unwrap().temporary = true;

        let id = registry.add_element("nowhere", image("ghost"));

        assert_eq!(registry.unsorted().len(), 1);
        assert_eq!(registry.element(id).unwrap().asset_key, "ghost");

        // layer operations don't touch it
        registry.clear_temporary();
        assert!(!registry.set_visible("nowhere", false));
        assert_eq!(registry.unsorted().len(), 1);

        registry.clear_unsorted();
        assert!(registry.unsorted().is_empty());
    }

    #[test]
    fn clear_temporary_keeps_layers_and_persistent_content() {
        let mut registry = LayerRegistry::new();
        registry.create_layer("shelf").unwrap().temporary = true;
        registry.create_layer(UX).unwrap();

        registry.add_element("shelf", image("book"));
        registry.add_element(UX, image("reset"));
        registry.clear_temporary();

        assert!(registry.find_layer("shelf").unwrap().is_empty());
        assert_eq!(registry.find_layer(UX).unwrap().len(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_element_from_layer_or_unsorted() {
        let mut registry = LayerRegistry::new();
        registry.create_layer(UX).unwrap();

        let reset = registry.add_element(UX, image("reset"));
        let stray = registry.add_element("nowhere", image("stray"));

        assert_eq!(registry.remove_element(reset).unwrap().asset_key, "reset");
        assert_eq!(registry.remove_element(stray).unwrap().asset_key, "stray");
        assert_eq!(registry.remove_element(reset), None);
    }

    #[test]
    fn visibility() {
        let mut registry = LayerRegistry::new();
        registry.create_layer(HAUNTING).unwrap();

        assert!(registry.is_visible(HAUNTING));
        assert!(registry.set_visible(HAUNTING, false));
        assert!(!registry.is_visible(HAUNTING));
        assert!(!registry.is_visible("nowhere"));
    }

    #[test]
    fn hit_test_uses_scaled_size() {
        let element = VisualElement::placed(
            "camera",
            Bounds::sized(150.0, 670.0, 60.0, 60.0),
            Some(Size::new(120.0, 120.0)),
        );

        assert_eq!(element.display_size(), Size::new(60.0, 60.0));
        assert!(element.contains(Point::new(150.0, 670.0)));
        assert!(element.contains(Point::new(209.0, 729.0)));
        assert!(!element.contains(Point::new(210.0, 700.0)));
        assert!(!element.contains(Point::new(149.0, 700.0)));
    }

    #[test]
    fn unknown_texture_size_has_no_hit_box() {
        let element = VisualElement::placed("mystery", Bounds::sized(0.0, 0.0, 60.0, 60.0), None);

        assert_eq!(element.scale, Scale::IDENTITY);
        assert!(!element.contains(Point::new(0.0, 0.0)));
    }
}

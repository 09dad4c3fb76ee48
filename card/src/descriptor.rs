//! Content descriptor: which places exist, which layers each place offers
//! and where every option of a layer goes.
//!
//! ```json
//! {
//!   "attic": {
//!     "shelf": { "x": 0, "y": 0, "width": 100, "height": 100,
//!                "options": ["book", "candle"], "haunting": "ghost" }
//!   }
//! }
//! ```
//!
//! Key order is significant: it decides background cycling, layer creation
//! and menu layout, so both levels are kept in document order.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::placement::Bounds;

/// A rectangle inside a place where one option of a layer is shown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub haunting: Option<String>,
}

impl Slot {
    /// Stretch-to-fit bounds covering the whole slot.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        Bounds::sized(self.x, self.y, self.width, self.height)
    }

    /// The haunting asset, ignoring empty keys.
    #[must_use]
    pub fn haunting_key(&self) -> Option<&str> {
        self.haunting.as_deref().filter(|key| !key.is_empty())
    }
}

/// Layers of a single place, in document order.
pub type Place = IndexMap<String, Slot>;

/// One `(place, layer, slot)` triple of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotEntry<'a> {
    pub place: &'a str,
    pub layer: &'a str,
    pub slot: &'a Slot,
}

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("can't read content descriptor {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed content descriptor: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only mapping `place -> (layer -> slot)`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ContentDescriptor {
    places: IndexMap<String, Place>,
}

impl ContentDescriptor {
    /// Parses a descriptor from JSON text.
    ///
    /// # Errors
    /// Returns [`DescriptorError::Parse`] if the text isn't a valid descriptor.
    pub fn from_json_str(json: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses the descriptor stored at `path`.
    ///
    /// # Errors
    /// Fails if the file can't be read or doesn't parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let descriptor = Self::from_json_str(&json)?;
        tracing::debug!(
            "loaded {} places from {}",
            descriptor.place_count(),
            path.display()
        );

        Ok(descriptor)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    #[must_use]
    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    /// Place names in document order.
    pub fn places(&self) -> impl Iterator<Item = &str> {
        self.places.keys().map(String::as_str)
    }

    #[must_use]
    pub fn place_at(&self, index: usize) -> Option<&str> {
        self.places.get_index(index).map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn place(&self, name: &str) -> Option<&Place> {
        self.places.get(name)
    }

    /// Every `(place, layer, slot)` triple, places first then layers.
    pub fn slots(&self) -> impl Iterator<Item = SlotEntry<'_>> {
        self.places.iter().flat_map(|(place, layers)| {
            layers.iter().map(move |(layer, slot)| SlotEntry {
                place,
                layer,
                slot,
            })
        })
    }

    /// Slots that declare a haunting asset.
    #[must_use]
    pub fn haunting_candidates(&self) -> Vec<&Slot> {
        self.slots()
            .map(|entry| entry.slot)
            .filter(|slot| slot.haunting_key().is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ROOMS: &str = r#"{
        "parlour": {
            "mantel": { "x": 10, "y": 20, "width": 300, "height": 120,
                        "options": ["clock", "vase"], "haunting": "skull" },
            "rug": { "x": 0, "y": 500, "width": 1000, "height": 150,
                     "options": ["persian"] }
        },
        "attic": {
            "shelf": { "x": 0, "y": 0, "width": 100, "height": 100,
                       "options": ["book", "candle"], "haunting": "" }
        }
    }"#;

    #[test]
    fn keeps_document_order() {
        let descriptor = ContentDescriptor::from_json_str(ROOMS).unwrap();

        assert_eq!(descriptor.places().collect::<Vec<_>>(), vec!["parlour", "attic"]);
        assert_eq!(
            descriptor
                .slots()
                .map(|e| (e.place, e.layer))
                .collect::<Vec<_>>(),
            vec![("parlour", "mantel"), ("parlour", "rug"), ("attic", "shelf")]
        );
        assert_eq!(descriptor.place_at(1), Some("attic"));
        assert_eq!(descriptor.place_at(2), None);
    }

    #[test]
    fn slot_fields() {
        let descriptor = ContentDescriptor::from_json_str(ROOMS).unwrap();
        let mantel = &descriptor.place("parlour").unwrap()["mantel"];

        assert_eq!(mantel.options, vec!["clock".to_string(), "vase".to_string()]);
        assert_eq!(mantel.bounds(), Bounds::sized(10.0, 20.0, 300.0, 120.0));
        assert_eq!(mantel.haunting_key(), Some("skull"));
    }

    #[test]
    fn empty_haunting_key_is_not_a_candidate() {
        let descriptor = ContentDescriptor::from_json_str(ROOMS).unwrap();
        let candidates = descriptor.haunting_candidates();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].haunting_key(), Some("skull"));
    }

    #[test]
    fn missing_options_default_to_empty() {
        let descriptor = ContentDescriptor::from_json_str(
            r#"{ "hall": { "door": { "x": 1, "y": 2, "width": 3, "height": 4 } } }"#,
        )
        .unwrap();

        let door = &descriptor.place("hall").unwrap()["door"];
        assert!(door.options.is_empty());
        assert_eq!(door.haunting, None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ContentDescriptor::from_json_str("{ \"hall\": 3 }").unwrap_err();
        assert!(matches!(err, DescriptorError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ContentDescriptor::load("/definitely/not/here/contents.json").unwrap_err();
        assert!(matches!(err, DescriptorError::Io { .. }));
    }
}

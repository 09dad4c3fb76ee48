//! Asset keys and the natural size of their textures.
//!
//! Every key maps to `<images_dir>/<key>.png`. Loading the pixels is the
//! front end's job; the engine only needs the sizes to compute scales and
//! hit boxes.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use indexmap::IndexSet;

use crate::{descriptor::ContentDescriptor, placement::Size};

/// Images used by the UI chrome.
pub const UI_ASSETS: [&str; 4] = ["reset", "toggle", "blank", "camera"];

#[must_use]
pub fn asset_path(images_dir: &Path, key: &str) -> PathBuf {
    images_dir.join(format!("{key}.png"))
}

/// Every key the scene can show, in first-seen order without repetitions:
/// places, then per place its options and its haunting elements, then the
/// UI chrome.
#[must_use]
pub fn asset_manifest(descriptor: &ContentDescriptor) -> Vec<String> {
    let mut keys = IndexSet::new();

    for place in descriptor.places() {
        keys.insert(place.to_owned());

        let entries: Vec<_> = descriptor
            .slots()
            .filter(|entry| entry.place == place)
            .collect();
        for entry in &entries {
            keys.extend(entry.slot.options.iter().cloned());
        }
        for entry in &entries {
            if let Some(haunting) = entry.slot.haunting_key() {
                keys.insert(haunting.to_owned());
            }
        }
    }

    keys.extend(UI_ASSETS.iter().map(|key| (*key).to_owned()));
    keys.into_iter().collect()
}

/// Natural texture sizes by asset key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetSizes {
    sizes: HashMap<String, Size>,
}

impl AssetSizes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, size: Size) {
        self.sizes.insert(key.to_owned(), size);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Size> {
        self.sizes.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, Size)> for AssetSizes {
    fn from_iter<I: IntoIterator<Item = (&'a str, Size)>>(iter: I) -> Self {
        Self {
            sizes: iter
                .into_iter()
                .map(|(key, size)| (key.to_owned(), size))
                .collect(),
        }
    }
}

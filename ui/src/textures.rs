use std::{collections::HashMap, path::Path};

use card::{
    assets::{AssetSizes, asset_path},
    placement::Size,
};
use egui::{ColorImage, TextureHandle, TextureOptions};

/// GPU textures of every scene asset, by key.
#[derive(Default)]
pub struct TextureStore {
    textures: HashMap<String, TextureHandle>,
}

impl TextureStore {
    /// Loads `<images_dir>/<key>.png` for every key. Images that can't be
    /// read are logged and left out.
    pub fn load(ctx: &egui::Context, images_dir: &Path, keys: &[String]) -> Self {
        let mut textures = HashMap::new();

        for key in keys {
            let path = asset_path(images_dir, key);
            match image::open(&path) {
                Ok(decoded) => {
                    let rgba = decoded.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let pixels = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    let texture = ctx.load_texture(key, pixels, TextureOptions::LINEAR);
                    textures.insert(key.clone(), texture);
                }
                Err(e) => tracing::warn!("can't load {}: {e}", path.display()),
            }
        }

        tracing::info!("loaded {}/{} textures", textures.len(), keys.len());

        Self { textures }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TextureHandle> {
        self.textures.get(key)
    }

    /// Natural sizes of the loaded textures, for placement.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn sizes(&self) -> AssetSizes {
        self.textures
            .iter()
            .map(|(key, texture)| {
                let [width, height] = texture.size();
                (key.as_str(), Size::new(width as f32, height as f32))
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

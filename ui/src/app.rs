//! # Haunted Card UI Application
//!
//! This module contains the main application struct that ties the scene
//! engine to an egui window.
//!
//! ## Initialization Flow
//!
//! When [`App::new`] is called:
//!
//! ```text
//! App::new(ctx, config)
//!     │
//!     ├─► ContentDescriptor::load(config.contents)
//!     │   └─► on failure: log and continue with an empty descriptor
//!     │
//!     ├─► TextureStore::load(ctx, config.images, asset_manifest)
//!     │   └─► one egui texture per `<key>.png`, missing files skipped
//!     │
//!     ├─► SceneController::new(descriptor, textures.sizes())
//!     │   └─► layer stack, first background, buttons
//!     │
//!     └─► ScreenshotCamera::new(ctx, config.output)
//! ```
//!
//! ## Frame Loop
//!
//! Every frame the scene clock advances by the wall time since the last
//! frame, pointer input is forwarded to the scene in scene coordinates,
//! the visible layers are painted and a pending screenshot is saved.

use std::{path::PathBuf, time::Instant};

use card::{
    assets::asset_manifest,
    descriptor::ContentDescriptor,
    scene::SceneController,
};

use crate::{scene_view::SceneView, snapshot::ScreenshotCamera, textures::TextureStore};

/// Where the app reads its content from and writes snapshots to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub contents: PathBuf,
    pub images: PathBuf,
    pub output: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contents: PathBuf::from("contents.json"),
            images: PathBuf::from("images"),
            output: PathBuf::from("."),
        }
    }
}

/// The greeting card application.
pub struct App {
    scene: SceneController,
    textures: TextureStore,
    camera: ScreenshotCamera,
    view: SceneView,
    last_frame: Instant,
}

impl App {
    #[must_use]
    pub fn new(ctx: &egui::Context, config: &AppConfig) -> Self {
        let descriptor = match ContentDescriptor::load(&config.contents) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::error!("{e}, starting with an empty card");
                ContentDescriptor::default()
            }
        };

        let textures = TextureStore::load(ctx, &config.images, &asset_manifest(&descriptor));
        let scene = SceneController::new(descriptor, textures.sizes());

        Self {
            scene,
            textures,
            camera: ScreenshotCamera::new(ctx.clone(), config.output.clone()),
            view: SceneView::default(),
            last_frame: Instant::now(),
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context) {
        let (hover, released) = ctx.input(|i| {
            let released = if i.pointer.primary_released() {
                i.pointer.interact_pos()
            } else {
                None
            };
            (i.pointer.hover_pos(), released)
        });

        self.scene
            .pointer_moved(hover.and_then(|pos| self.view.to_scene(pos)));

        if let Some(point) = released.and_then(|pos| self.view.to_scene(pos)) {
            self.scene.pointer_released(point);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        let now = Instant::now();
        self.scene
            .advance(now.duration_since(self.last_frame), &mut self.camera);
        self.last_frame = now;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                self.view = SceneView::fit(ui.max_rect());
                self.handle_pointer(ctx);
                self.view.paint(ui.painter(), &self.scene, &self.textures);
            });

        self.camera.collect(self.view.rect());
    }
}

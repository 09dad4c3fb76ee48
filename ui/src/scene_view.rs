//! Paints a scene and maps pointer positions into scene space.
//!
//! The scene has a fixed size ([`CANVAS_WIDTH`]×[`CANVAS_HEIGHT`]); it is
//! letterboxed into the available area keeping its aspect ratio.

use card::{
    layer::VisualElement,
    overlay::Caption,
    placement::Point,
    scene::{CANVAS_HEIGHT, CANVAS_WIDTH, SceneController},
};
use egui::{
    Color32, FontId, Painter, Pos2, Rect, Vec2, pos2,
    text::{LayoutJob, TextFormat},
    vec2,
};

use crate::{element_color::ElementColor, textures::TextureStore};

const CAPTION_COLOR: Color32 = Color32::WHITE;

/// Where the scene sits on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneView {
    rect: Rect,
    /// Screen points per scene unit.
    zoom: f32,
}

impl Default for SceneView {
    fn default() -> Self {
        Self::fit(Rect::from_min_size(
            Pos2::ZERO,
            vec2(CANVAS_WIDTH, CANVAS_HEIGHT),
        ))
    }
}

impl SceneView {
    /// Largest scene rectangle that fits in `available`, centred.
    #[must_use]
    pub fn fit(available: Rect) -> Self {
        let zoom = (available.width() / CANVAS_WIDTH).min(available.height() / CANVAS_HEIGHT);
        let rect = Rect::from_center_size(
            available.center(),
            vec2(CANVAS_WIDTH * zoom, CANVAS_HEIGHT * zoom),
        );

        Self { rect, zoom }
    }

    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn to_screen(&self, point: Point) -> Pos2 {
        self.rect.min + vec2(point.x, point.y) * self.zoom
    }

    /// Scene coordinates of a screen position, `None` outside the scene.
    #[must_use]
    pub fn to_scene(&self, pos: Pos2) -> Option<Point> {
        if !self.rect.contains(pos) || self.zoom <= 0.0 {
            return None;
        }

        let local = (pos - self.rect.min) / self.zoom;
        Some(Point::new(local.x, local.y))
    }

    /// Visible layers bottom to top, then unsorted elements, then the caption.
    pub fn paint(&self, painter: &Painter, scene: &SceneController, textures: &TextureStore) {
        painter.rect_filled(self.rect, 0.0, Color32::BLACK);

        let layers = scene.layers();
        for layer in layers.layers().filter(|layer| layer.visible) {
            for element in layer.elements() {
                self.paint_element(painter, element, textures);
            }
        }
        for element in layers.unsorted() {
            self.paint_element(painter, element, textures);
        }

        if let Some(caption) = scene.overlay().caption() {
            self.paint_caption(painter, caption);
        }
    }

    fn paint_element(&self, painter: &Painter, element: &VisualElement, textures: &TextureStore) {
        let Some(texture) = textures.get(&element.asset_key) else {
            return;
        };

        let size = element.display_size();
        let rect = Rect::from_min_size(
            self.to_screen(element.position),
            vec2(size.width, size.height) * self.zoom,
        );
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

        painter.image(
            texture.id(),
            rect,
            uv,
            ElementColor::from(element).into(),
        );
    }

    fn paint_caption(&self, painter: &Painter, caption: &Caption) {
        let mut job = LayoutJob::default();
        job.append(
            caption.text,
            0.0,
            TextFormat {
                font_id: FontId::proportional(caption.font_size * self.zoom),
                color: CAPTION_COLOR,
                italics: caption.italic,
                ..Default::default()
            },
        );

        let galley = painter.layout_job(job);
        let (origin_x, origin_y) = caption.origin;
        let anchor = self.to_screen(caption.position);
        let pos = anchor - Vec2::new(galley.size().x * origin_x, galley.size().y * origin_y);

        painter.galley(pos, galley, CAPTION_COLOR);
    }
}

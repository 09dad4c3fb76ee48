use egui::Color32;

/// Tint and alpha of a scene element, as multiplied into its texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementColor {
    /// `0xRRGGBB`
    pub tint: Option<u32>,
    pub alpha: f32,
}

impl From<&card::layer::VisualElement> for ElementColor {
    fn from(element: &card::layer::VisualElement) -> Self {
        Self {
            tint: element.tint,
            alpha: element.alpha,
        }
    }
}

impl From<ElementColor> for Color32 {
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    fn from(color: ElementColor) -> Self {
        let [_, red, green, blue] = color.tint.unwrap_or(0xFF_FFFF).to_be_bytes();
        let alpha = (color.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;

        Self::from_rgba_unmultiplied(red, green, blue, alpha)
    }
}

//! Position and scale of a visual element.
//!
//! Elements are always anchored at their top-left corner. Only the scale is
//! computed here: an element either keeps its natural size, is stretched to
//! the requested box, or is fitted inside it keeping its aspect ratio.

/// A point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    #[must_use]
    pub const fn uniform(factor: f32) -> Self {
        Self {
            x: factor,
            y: factor,
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Where an element is requested to go and how large it should be.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub preserve_aspect: bool,
}

impl Bounds {
    /// Natural size at `(x, y)`.
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
            preserve_aspect: false,
        }
    }

    /// Stretched to `width`×`height` at `(x, y)`.
    #[must_use]
    pub const fn sized(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: Some(width),
            height: Some(height),
            preserve_aspect: false,
        }
    }

    #[must_use]
    pub const fn preserving_aspect(mut self) -> Self {
        self.preserve_aspect = true;
        self
    }

    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Computes the scale of an element of size `natural` placed in a box of
/// `requested_width`×`requested_height`.
///
/// A missing (or zero) requested dimension keeps the natural size. With
/// `preserve_aspect` both axes use the smaller factor, so the element fits
/// inside the box without cropping.
#[must_use]
pub fn compute_placement(
    natural: Size,
    requested_width: Option<f32>,
    requested_height: Option<f32>,
    preserve_aspect: bool,
) -> Scale {
    let (Some(width), Some(height)) = (
        requested_width.filter(|w| *w != 0.0),
        requested_height.filter(|h| *h != 0.0),
    ) else {
        return Scale::IDENTITY;
    };

    // a degenerate texture can't be scaled to anything meaningful
    if natural.width == 0.0 || natural.height == 0.0 {
        return Scale::IDENTITY;
    }

    let sx = width / natural.width;
    let sy = height / natural.height;

    if preserve_aspect {
        Scale::uniform(sx.min(sy))
    } else {
        Scale { x: sx, y: sy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn natural_size_without_box() {
        let natural = Size::new(200.0, 50.0);

        assert_eq!(compute_placement(natural, None, None, false), Scale::IDENTITY);
        assert_eq!(compute_placement(natural, Some(100.0), None, true), Scale::IDENTITY);
        assert_eq!(compute_placement(natural, None, Some(100.0), false), Scale::IDENTITY);
    }

    #[test]
    fn stretch_scales_axes_independently() {
        let scale = compute_placement(Size::new(200.0, 50.0), Some(100.0), Some(100.0), false);
        assert_eq!(scale, Scale { x: 0.5, y: 2.0 });
    }

    #[test]
    fn preserve_aspect_uses_smaller_factor() {
        let scale = compute_placement(Size::new(200.0, 50.0), Some(100.0), Some(100.0), true);
        assert_eq!(scale, Scale::uniform(0.5));

        // upscaling is allowed as long as it fits
        let scale = compute_placement(Size::new(30.0, 20.0), Some(60.0), Some(60.0), true);
        assert_eq!(scale, Scale::uniform(2.0));
    }

    #[test]
    fn zero_sizes_keep_natural_scale() {
        assert_eq!(
            compute_placement(Size::new(0.0, 10.0), Some(60.0), Some(60.0), false),
            Scale::IDENTITY
        );
        assert_eq!(
            compute_placement(Size::new(10.0, 10.0), Some(0.0), Some(60.0), false),
            Scale::IDENTITY
        );
    }

    #[test]
    fn bounds_builders() {
        let bounds = Bounds::sized(240.0, 670.0, 60.0, 60.0).preserving_aspect();

        assert!(bounds.preserve_aspect);
        assert_eq!(bounds.origin(), Point::new(240.0, 670.0));
        assert_eq!(Bounds::at(3.0, 4.0).width, None);
    }
}

//! Composition engine of the haunted room greeting card.
//!
//! A scene is a stack of named layers filled with images. Buttons in the
//! `ux` layer place options into slot layers, cycle the background, reset
//! the card, or start the timed reveal that precedes a snapshot.

pub mod assets;
pub mod button;
pub mod descriptor;
pub mod layer;
pub mod overlay;
pub mod placement;
pub mod scene;
pub mod timer;

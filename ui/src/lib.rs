pub mod app;
pub mod element_color;
pub mod scene_view;
pub mod snapshot;
pub mod textures;

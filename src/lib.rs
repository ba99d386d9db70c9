//! scenetext - synthetic scene-text images
//!
//! Renders random phrases onto crops of photographic backgrounds in a text
//! color chosen for WCAG contrast, returning the image, its text mask and
//! metadata. This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;

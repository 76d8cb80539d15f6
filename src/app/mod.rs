//! Application Layer
//!
//! The gallery window that showcases the widgets.

pub mod application;
pub mod gallery;

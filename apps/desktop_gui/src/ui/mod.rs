//! UI layer for the desktop upload form.

pub mod app;

pub use app::UploadFormApp;

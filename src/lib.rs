//! Core of the formst-poc form editor.
//!
//! The Slint-generated UI types (`FormEditorUI`, `FormState`, `TagUI`) live
//! at the crate root so the systems and the binary import them the same way.

slint::include_modules!();

pub mod form;
pub mod systems;

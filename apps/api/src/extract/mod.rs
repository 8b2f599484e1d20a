//! Heuristic resume field extraction. Input is plain resume text already
//! transcribed by the document-AI call; every sub-extraction is independent,
//! best-effort, and fails soft to a documented default instead of erroring.

pub mod fields;
pub mod title;
pub mod vocab;

pub use fields::{extract_fields, ResumeFields};
pub use title::extract_current_title;

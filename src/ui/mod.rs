//! Rendering only. Widgets read the current snapshot and report edits back
//! through [`AppState`](crate::state::AppState) methods.

pub mod panels;
pub mod plot;
pub mod sections;
pub mod table;

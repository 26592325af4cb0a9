// Resume import: PDF text, heuristic field extraction, form pre-fill, and the
// stored resume document the admin panel edits.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod pdf;
pub mod prefill;
pub mod store;

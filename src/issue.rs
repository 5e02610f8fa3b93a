//! Issue composition: edition/article selection, highlights, category styles.

pub mod highlights;
pub mod select;
pub mod style;

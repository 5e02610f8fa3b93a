//! Untrusted markup: BBCode expansion and the HTML allowlist cleaner.

pub mod bbcode;
pub mod clean;

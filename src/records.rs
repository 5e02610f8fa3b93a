//! Source rows: reference normalization and typed edition/article models.

pub mod model;
pub mod reference;

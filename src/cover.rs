//! Cover generation: text shaping, word wrap, blur, compositing, PNG output.

pub mod blur;
pub mod compose;
pub mod composite;
pub mod layout;
pub mod text;

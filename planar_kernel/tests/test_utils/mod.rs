mod loop_modifiers;
mod loop_properties;

pub use loop_modifiers::*;
pub use loop_properties::*;

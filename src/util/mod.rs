pub mod difficulty;
pub mod limited_stack;
pub mod map_or_attrs;
pub mod mods;
pub mod special_functions;

pub mod glyphs;
pub mod overlay;
pub mod scheduler;
pub mod sink;

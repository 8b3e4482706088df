pub mod scoreboard;
pub mod source;

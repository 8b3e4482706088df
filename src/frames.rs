pub mod decode;
pub mod sequence;
pub mod synth;

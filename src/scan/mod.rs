pub mod simulator;
pub mod synth;

pub use simulator::{ScanSimulator, TICK_PERIOD};
pub use synth::KeySynthesizer;

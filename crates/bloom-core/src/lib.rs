pub mod constants;
pub mod controls;
pub mod drift;
pub mod duration;
pub mod frame;
pub mod modulator;
pub mod params;
pub mod ranges;
pub mod rng;
pub mod state;

pub use controls::*;
pub use drift::DriftModulator;
pub use duration::DurationPolicy;
pub use frame::*;
pub use modulator::*;
pub use params::*;
pub use ranges::*;
pub use rng::*;
pub use state::*;

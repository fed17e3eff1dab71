//! Realtime sampling against a live frame source.

mod sampler;

pub use sampler::{RealtimeSampler, SamplerState, DEFAULT_TICK_INTERVAL};

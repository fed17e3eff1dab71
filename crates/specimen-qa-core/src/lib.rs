//! Specimen QA Core - quality analysis for field specimen photography.
//!
//! This crate contains the domain types and the analysis pipeline: luminance
//! conversion, the lighting/sharpness/contrast metric extractors, the rating
//! classifier, the feedback synthesizer, and the realtime sampling loop that
//! drives the pipeline against a live frame source.

pub mod analyzer;
pub mod domain;
pub mod luminance;
pub mod modules;
pub mod ports;
pub mod realtime;

pub use analyzer::QualityAnalyzer;
pub use domain::{
    AnalysisError, AnalysisResult, FeedbackItem, Frame, MetricKind, MetricReading, Rating,
    RatingThresholds, Severity, ThresholdError, ThresholdLadder,
};
pub use ports::{FeedbackSink, FrameSource};
pub use realtime::{RealtimeSampler, SamplerState, DEFAULT_TICK_INTERVAL};

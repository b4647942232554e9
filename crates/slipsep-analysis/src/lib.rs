pub mod config;
pub mod separation;
pub mod trace;
pub mod trim;

pub use config::AnalysisConfig;
pub use separation::{
    AnalysisInput, DipSeparationSense, FaultBlockGeometry, MapView, SectionView,
    SeparationAnalysis, SeparationAnalyzer, StrikeSeparationSense, ViewTraces,
};
pub use trace::{arange, BlockTrace, SampleWindow};
pub use trim::{trim_rule, AzimuthRelation, NormalSense, Side, TrimRule};

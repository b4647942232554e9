use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The 2D view in which a geometric step was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Section,
    Map,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Section => write!(f, "section"),
            ViewKind::Map => write!(f, "map"),
        }
    }
}

/// The step of a view computation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    FaultTrace,
    FootwallTrace,
    HangingwallTrace,
    FootwallCutoff,
    HangingwallCutoff,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FaultTrace => "fault trace",
            Stage::FootwallTrace => "footwall trace",
            Stage::HangingwallTrace => "hangingwall trace",
            Stage::FootwallCutoff => "footwall cutoff",
            Stage::HangingwallCutoff => "hangingwall cutoff",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SlipSepError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Planes are parallel (distance {distance})")]
    ParallelPlanes { distance: f64 },

    #[error("Planes are coincident")]
    CoincidentPlanes,

    #[error("Lines are parallel and do not intersect")]
    ParallelLines,

    #[error("Line projects vertically onto the view plane, slope is undefined")]
    UndefinedProjection,

    #[error("{view} view, {stage}: {source}")]
    View {
        view: ViewKind,
        stage: Stage,
        #[source]
        source: Box<SlipSepError>,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SlipSepError {
    /// Wrap an error with the view and stage it came from.
    pub fn in_view(self, view: ViewKind, stage: Stage) -> Self {
        SlipSepError::View {
            view,
            stage,
            source: Box::new(self),
        }
    }

    /// The innermost error, unwrapping view context.
    pub fn root(&self) -> &SlipSepError {
        match self {
            SlipSepError::View { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether this is an expected geometric outcome for the given inputs
    /// rather than bad input or an environment failure.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self.root(),
            SlipSepError::ParallelPlanes { .. }
                | SlipSepError::CoincidentPlanes
                | SlipSepError::ParallelLines
                | SlipSepError::UndefinedProjection
        )
    }
}

pub type Result<T> = std::result::Result<T, SlipSepError>;

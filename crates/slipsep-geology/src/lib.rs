//! Structural geology on top of the plane/line engine: orientations,
//! stereonet conversions, net slip, and cutoff lines.

pub mod cutoff;
pub mod netslip;
pub mod orientation;
pub mod stereonet;

pub use cutoff::{cutoff_pitch, FaultPlaneDiagram};
pub use netslip::{apply_displacement, NetSlip};
pub use orientation::Orientation;
pub use stereonet::{Geographic, Lineation};

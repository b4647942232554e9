pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{SlipSepError, Result, Stage, ViewKind};
pub use tolerance::Tolerance;

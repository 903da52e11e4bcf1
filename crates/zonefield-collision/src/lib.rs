//! Collision data pipeline for ZONEFIELD.
//!
//! Cancellable background heightfield generation and race-free,
//! thread-confined delivery to the collision-shape owner.

pub mod runner;
pub mod shapes;

pub use runner::{CollisionJobRunner, JobState};
pub use shapes::{CollisionShapeSet, CollisionSummary, HeightfieldSink};

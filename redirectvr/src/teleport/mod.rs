// Ballistic teleport aiming
//
// The player aims with a hand, a gravity-affected arc is sampled and swept
// against the world, and releasing the button moves the body to where the
// arc lands. When a steering target is in view, the arc's horizontal path
// bends toward it.

pub mod acquisition;
pub mod teleport_system;
pub mod trajectory;

pub use acquisition::AcquisitionBlend;
pub use teleport_system::{TeleportLocomotion, TeleportPhase};
pub use trajectory::{ArcBend, ArcHit, ArcLaunch, ArcSample, ArcTrajectory};

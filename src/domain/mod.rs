mod launch;
pub mod topology;
pub mod traits;

pub use launch::{KeyPair, LaunchSpec, UnitKind};
pub use topology::Topology;
pub use traits::{AuthProvider, Runtime};

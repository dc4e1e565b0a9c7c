mod physics;
mod policy;
mod runner;
mod touchdown;

pub(crate) use physics::defaults;

pub use physics::*;
pub use policy::*;
pub use runner::*;
pub use touchdown::*;

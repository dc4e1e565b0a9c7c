mod simulation;

pub mod init;

pub use simulation::*;

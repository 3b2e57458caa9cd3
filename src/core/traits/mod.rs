pub mod clock;
pub mod id_generator;
pub mod session;

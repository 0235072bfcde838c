pub mod feedback;
pub mod macros;
pub mod session;

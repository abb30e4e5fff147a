pub mod debounce;
pub mod frame;
pub mod hooks;

pub use debounce::*;
pub use frame::*;
pub use hooks::*;

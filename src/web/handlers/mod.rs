pub mod profile_handlers;
pub mod swipe_handlers;
pub mod system_handlers;

pub use profile_handlers::*;
pub use swipe_handlers::*;
pub use system_handlers::*;

pub mod inspect;
pub mod util;
pub mod verify;

pub use inspect::*;
pub use util::*;
pub use verify::*;

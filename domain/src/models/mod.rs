pub mod primitives;
mod evaluation;
mod item;
mod parameter;
mod user;

pub use evaluation::*;
pub use item::*;
pub use parameter::*;
pub use user::*;

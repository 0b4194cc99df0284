pub mod evaluation;
pub mod item;
pub mod user;

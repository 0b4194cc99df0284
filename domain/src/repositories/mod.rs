mod item;
mod metric_history;
mod remote_user;

pub use item::*;
pub use metric_history::*;
pub use remote_user::*;

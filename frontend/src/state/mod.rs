pub mod execute;
pub mod store;

pub use execute::{execute_use_case, user_message};
pub use store::{spawn_detached, StateStore, TaskScope};

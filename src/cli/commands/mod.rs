//! Command handlers for CLI operations

mod create_user;
mod list;
mod seed;

pub use create_user::cmd_create_user;
pub use list::cmd_list_gadgets;
pub use seed::cmd_seed;

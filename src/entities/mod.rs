pub mod prelude;

pub mod gadgets;
pub mod users;

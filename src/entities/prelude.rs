pub use super::gadgets::Entity as Gadgets;
pub use super::users::Entity as Users;

pub mod gadget;
pub mod user;

/// Outcome of an insert guarded by a unique column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insert<T> {
    Created(T),
    /// The unique column (username, codename) already holds this value.
    Duplicate,
}

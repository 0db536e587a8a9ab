pub mod db;
pub mod encoding;
pub mod error;
pub mod model;

pub use db::{DynamoStore, Item, StudentStore, TargetStore};
pub use error::CoreError;
pub use model::{AlertTarget, Student};

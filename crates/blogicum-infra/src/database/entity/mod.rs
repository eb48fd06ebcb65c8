//! SeaORM entities mirroring the relational schema created by the migration.

pub mod category;
pub mod comment;
pub mod location;
pub mod post;
pub mod user;

use sea_orm::EntityTrait;

/// Columns fixed at insert time. Saving an existing row leaves them alone.
pub trait WriteOnce: EntityTrait {
    fn write_once() -> Vec<Self::Column>;
}

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryBookmarkStore;
pub use postgres::PgBookmarkStore;
pub use store::{BookmarkStore, StoreError};

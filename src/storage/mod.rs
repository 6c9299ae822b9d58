pub mod in_memory;
pub mod traits;

pub use self::in_memory::InMemoryStorage;
pub use self::traits::Storage;

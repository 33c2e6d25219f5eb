pub mod backends;

pub use backends::memory::MemoryStorage;

pub mod prelude {
    pub use super::backends::memory::MemoryStorage;
    pub use aj_core::ArticleStorage;
}

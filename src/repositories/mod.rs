pub mod article_repo;
pub mod memory_repo;
pub mod store;

pub use article_repo::ArticleRepository;
pub use memory_repo::MemoryArticleStore;
pub use store::ArticleStore;

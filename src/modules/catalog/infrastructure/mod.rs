pub mod media_repository_impl;
pub mod models;

pub use media_repository_impl::MediaRepositoryImpl;

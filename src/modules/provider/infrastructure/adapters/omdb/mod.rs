mod adapter;
mod mapper;
pub mod models;

pub use adapter::OmdbAdapter;
pub use mapper::OmdbMapper;

pub mod debouncer;
pub mod logger;
pub mod validation;

pub use debouncer::Debouncer;
pub use logger::init_logger;
pub use validation::Validator;

pub mod executor;

pub use executor::RequestRunner;

pub mod planet_service;

pub use planet_service::*;

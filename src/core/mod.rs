pub mod cache;
pub mod coord;
pub mod error;
pub mod film;
pub mod frustum;
pub mod loader;
pub mod ray;

pub mod silent;
pub mod traits;

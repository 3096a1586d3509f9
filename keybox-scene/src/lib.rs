pub mod handle;
pub mod lyon;
pub mod primitive;
pub mod transform;
pub mod types;
pub mod value;

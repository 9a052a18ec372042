pub mod rental;
pub mod sensitivity;

pub mod application;
pub mod device;

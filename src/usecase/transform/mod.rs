pub mod clean;
pub mod mapper;
pub mod reshape;

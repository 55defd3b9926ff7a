pub mod aggregate;
pub mod ports;
pub mod services;
pub mod table;
pub mod transform;

pub mod aggregate;
pub mod cell;
pub mod dataset;
pub mod edit;
pub mod filter;
pub mod record;

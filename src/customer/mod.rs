//! Customer types and the usage profiles derived from them

mod profile;

pub use profile::{CustomerProfile, CustomerType, DataSource};

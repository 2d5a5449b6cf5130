pub mod country;
pub mod lead_builder;
pub mod patterns;
pub mod phone;

pub use lead_builder::LeadBuilder;

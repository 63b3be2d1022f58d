pub mod derivation;
pub mod fields;
pub mod resolver;

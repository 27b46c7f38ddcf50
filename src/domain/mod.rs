// Domain layer - Core types, errors and clip rules

pub mod errors;
pub mod model;
pub mod rules;

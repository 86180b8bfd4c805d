pub mod explainer;
pub mod filter;
pub mod monitoring;
pub mod resolver;

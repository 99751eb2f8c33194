pub mod config;
pub mod export;
pub mod linalg;
pub mod logistic;
pub mod metrics;
pub mod pipeline;
pub mod scaler;

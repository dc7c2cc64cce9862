pub mod contract;
pub mod gbm;

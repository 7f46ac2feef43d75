mod loss_fn;
mod mse;

pub use loss_fn::{Gradient, LossFn};
pub use mse::{Mse, cost, gradient};

mod gradient_descent;
mod optimizer;

pub use gradient_descent::{DEFAULT_LEARNING_RATE, GradientDescent};
pub use optimizer::Optimizer;

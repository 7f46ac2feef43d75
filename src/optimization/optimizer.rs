use crate::arch::{ModelParameters, loss::Gradient};

pub trait Optimizer {
    fn update_params(&mut self, params: &mut ModelParameters, grad: &Gradient);
}

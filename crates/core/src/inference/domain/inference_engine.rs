use ndarray::{Array4, ArrayD};

/// Domain interface for a loaded network.
///
/// Forward passes are stateless, but backends need `&mut self` to feed
/// their input layers.
pub trait InferenceEngine {
    /// Runs one forward pass over an NCHW input and returns every output
    /// tensor the network exposes, in the backend's output order.
    fn forward(
        &mut self,
        input: &Array4<f32>,
    ) -> Result<Vec<ArrayD<f32>>, Box<dyn std::error::Error>>;

    /// Short backend name for logging.
    fn backend_name(&self) -> &'static str;
}

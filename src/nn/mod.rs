//! Multilayer perceptron built from [`Value`] scalars.
//!
//! [`Neuron`] computes `bias + Σ wᵢ·xᵢ` with an optional ReLU, [`Layer`]
//! fans one input slice across its neurons, and [`Mlp`] chains layers with
//! ReLU everywhere except the final layer, which stays linear so the caller
//! decides what to stack on top. A forward pass records a fresh computation
//! graph; the weight and bias leaves persist across passes and are what
//! [`Mlp::parameters`] hands to the optimizer.

mod error;

pub use error::NnError;

use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::autograd::Value;

/// One unit: a weight per input, a bias, and an optional ReLU on the output.
pub struct Neuron {
    weights: Vec<Value>,
    bias: Value,
    nonlinear: bool,
}

impl Neuron {
    /// Creates a neuron with `nin` weights and a bias, all sampled from
    /// `init`.
    #[must_use]
    pub fn new(nin: usize, nonlinear: bool, init: &Normal<f64>, rng: &mut StdRng) -> Self {
        Neuron {
            weights: (0..nin).map(|_| Value::new(init.sample(rng))).collect(),
            bias: Value::new(init.sample(rng)),
            nonlinear,
        }
    }

    /// Creates a neuron with exact weights and bias. Used where determinism
    /// matters more than initialization quality.
    #[must_use]
    pub fn with_parameters(weights: Vec<f64>, bias: f64, nonlinear: bool) -> Self {
        Neuron {
            weights: weights.into_iter().map(Value::new).collect(),
            bias: Value::new(bias),
            nonlinear,
        }
    }

    /// Number of inputs this neuron accepts.
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.weights.len()
    }

    /// Builds the `bias + Σ wᵢ·xᵢ` subgraph over `inputs`, ReLU-wrapped when
    /// the neuron is nonlinear.
    ///
    /// # Errors
    ///
    /// [`NnError::ShapeMismatch`] when `inputs.len()` differs from the
    /// weight count.
    pub fn forward(&self, inputs: &[Value]) -> Result<Value, NnError> {
        if inputs.len() != self.weights.len() {
            return Err(NnError::ShapeMismatch {
                expected: self.weights.len(),
                got: inputs.len(),
            });
        }
        let mut act = self.bias.clone();
        for (w, x) in self.weights.iter().zip(inputs.iter()) {
            act = &act + &(w * x);
        }
        Ok(if self.nonlinear { act.relu() } else { act })
    }

    /// Weights in index order, then the bias.
    #[must_use]
    pub fn parameters(&self) -> Vec<Value> {
        let mut params = self.weights.clone();
        params.push(self.bias.clone());
        params
    }
}

/// An ordered group of neurons reading the same input slice.
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Creates `nout` neurons of `nin` inputs each.
    #[must_use]
    pub fn new(
        nin: usize,
        nout: usize,
        nonlinear: bool,
        init: &Normal<f64>,
        rng: &mut StdRng,
    ) -> Self {
        Layer {
            neurons: (0..nout).map(|_| Neuron::new(nin, nonlinear, init, rng)).collect(),
        }
    }

    /// Builds a layer from pre-constructed neurons.
    #[must_use]
    pub fn from_neurons(neurons: Vec<Neuron>) -> Self {
        Layer { neurons }
    }

    /// One output per neuron, in neuron order.
    ///
    /// # Errors
    ///
    /// Propagates [`NnError::ShapeMismatch`] from the first neuron that
    /// rejects the input width.
    pub fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, NnError> {
        self.neurons.iter().map(|n| n.forward(inputs)).collect()
    }

    /// Parameters of every neuron, in neuron order.
    #[must_use]
    pub fn parameters(&self) -> Vec<Value> {
        self.neurons.iter().flat_map(Neuron::parameters).collect()
    }
}

/// Feed-forward network: each layer's outputs are the next layer's inputs.
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Builds an MLP mapping `nin` inputs through `layer_sizes`; for example
    /// `[10, 10]` is a hidden ReLU layer of 10 and a linear 10-way output.
    /// Only the final layer is linear.
    ///
    /// # Errors
    ///
    /// [`NnError::EmptyTopology`] when `layer_sizes` is empty.
    pub fn new(
        nin: usize,
        layer_sizes: &[usize],
        init: &Normal<f64>,
        rng: &mut StdRng,
    ) -> Result<Self, NnError> {
        if layer_sizes.is_empty() {
            return Err(NnError::EmptyTopology);
        }
        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut prev = nin;
        for (i, &size) in layer_sizes.iter().enumerate() {
            let nonlinear = i + 1 != layer_sizes.len();
            layers.push(Layer::new(prev, size, nonlinear, init, rng));
            prev = size;
        }
        Ok(Mlp { layers })
    }

    /// Builds an MLP from pre-constructed layers.
    #[must_use]
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Mlp { layers }
    }

    /// Runs the full stack, returning the final layer's outputs.
    ///
    /// # Errors
    ///
    /// [`NnError::ShapeMismatch`] when `inputs` does not match the first
    /// layer's width (or a later layer's, with hand-built layers).
    pub fn forward(&self, inputs: &[Value]) -> Result<Vec<Value>, NnError> {
        let mut x = inputs.to_vec();
        for layer in &self.layers {
            x = layer.forward(&x)?;
        }
        Ok(x)
    }

    /// Every trainable parameter in a stable flatten order: layer by layer,
    /// neuron by neuron, weights before bias. Repeated calls return handles
    /// to the same nodes at the same positions; snapshots and in-place
    /// updates rely on that.
    #[must_use]
    pub fn parameters(&self) -> Vec<Value> {
        self.layers.iter().flat_map(Layer::parameters).collect()
    }

    /// Zeroes every parameter gradient. Run before each backward pass.
    pub fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }

    /// Forward values of all parameters in flatten order, the snapshot
    /// payload.
    #[must_use]
    pub fn parameter_data(&self) -> Vec<f64> {
        self.parameters().iter().map(Value::data).collect()
    }

    /// Overwrites every parameter from a flat list in flatten order.
    ///
    /// # Errors
    ///
    /// [`NnError::ShapeMismatch`] when the list length differs from the
    /// parameter count; nothing is written in that case.
    pub fn load_parameter_data(&self, data: &[f64]) -> Result<(), NnError> {
        let params = self.parameters();
        if data.len() != params.len() {
            return Err(NnError::ShapeMismatch {
                expected: params.len(),
                got: data.len(),
            });
        }
        for (p, &d) in params.iter().zip(data.iter()) {
            p.set_data(d);
        }
        Ok(())
    }
}

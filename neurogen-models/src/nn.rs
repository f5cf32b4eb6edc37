//! Defines a fully connected feed-forward network for use with the generation manager
use ng_core;
use rand;

use std::f32::consts::E;

use self::ng_core::error::{Error, Result};
use self::ng_core::model::{Evaluator, Genome, Initializer};
use self::ng_core::sampler;
use self::rand::Rng;

use super::dot;

/// Layers -> neurons -> one weight per input of the previous layer, followed
/// by the neuron's bias.
pub type Weights = Vec<Vec<Vec<f32>>>;

// Fresh weights are drawn from [-INIT_RANGE, INIT_RANGE)
const INIT_RANGE: f32 = 0.5;

#[inline]
/// Logistic function
fn sigmoid(f: f32) -> f32 {
    1. / (1. + E.powf(-f))
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
/// Shape shared by every network of a population
pub struct Architecture {
    /// Number of input nodes
    pub inputs: usize,
    /// Number of output nodes
    pub outputs: usize,
    /// Number of hidden layers.  Must be at least 1.
    pub hidden_layers: usize,
    /// Neurons in each hidden layer
    pub neurons: usize,
}

impl Architecture {
    /// Returns a validated architecture
    pub fn new(inputs: usize, outputs: usize, hidden_layers: usize, neurons: usize) -> Result<Self> {
        let arch = Architecture {
            inputs: inputs,
            outputs: outputs,
            hidden_layers: hidden_layers,
            neurons: neurons,
        };
        arch.validate()?;
        Ok(arch)
    }

    /// Checks every dimension is positive
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("inputs", self.inputs),
            ("outputs", self.outputs),
            ("hidden_layers", self.hidden_layers),
            ("neurons", self.neurons),
        ];
        for (name, value) in dims.iter() {
            if *value == 0 {
                return Err(Error::InvalidArchitecture(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Number of nodes per layer, input layer first
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers + 2);
        sizes.push(self.inputs);
        sizes.extend(std::iter::repeat(self.neurons).take(self.hidden_layers));
        sizes.push(self.outputs);
        sizes
    }

    /// (neurons, values per neuron) of every weight layer.  Values include the bias.
    pub fn weight_shape(&self) -> Vec<(usize, usize)> {
        self.layer_sizes()
            .windows(2)
            .map(|w| (w[1], w[0] + 1))
            .collect()
    }

    /// Total number of scalars in the weight structure
    pub fn num_weights(&self) -> usize {
        self.weight_shape().iter().map(|(n, w)| n * w).sum()
    }
}

impl Initializer for Architecture {
    type Model = Network;

    fn init<R: Rng>(&self, rng: &mut R) -> Result<Self::Model> {
        Network::new(*self, rng)
    }
}

// Structural mutation over the nested weight structure: scalars are leaves,
// vectors recurse into their elements.
trait Perturb: Sized {
    fn perturb<R: Rng>(&self, chance: f32, change: f32, rng: &mut R) -> Self;
}

impl Perturb for f32 {
    #[inline]
    fn perturb<R: Rng>(&self, chance: f32, change: f32, rng: &mut R) -> Self {
        if sampler::coin(rng, chance) {
            sampler::symmetric(rng, change)
        } else {
            *self
        }
    }
}

impl<T: Perturb> Perturb for Vec<T> {
    fn perturb<R: Rng>(&self, chance: f32, change: f32, rng: &mut R) -> Self {
        let mut out = Vec::with_capacity(self.len());
        for e in self.iter() {
            out.push(e.perturb(chance, change, rng));
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A feed-forward network with sigmoid activations.  The weights never change
/// after construction; mutation always produces a new weight structure.
pub struct Network {
    architecture: Architecture,
    weights: Weights,
}

impl Network {
    /// Creates a network with weights drawn uniformly from `[-0.5, 0.5)`
    pub fn new<R: Rng>(architecture: Architecture, rng: &mut R) -> Result<Self> {
        architecture.validate()?;

        let shape = architecture.weight_shape();
        let mut weights = Vec::with_capacity(shape.len());
        for (neurons, width) in shape {
            let mut layer = Vec::with_capacity(neurons);
            for _ in 0..neurons {
                let mut neuron = Vec::with_capacity(width);
                for _ in 0..width {
                    neuron.push(sampler::symmetric(rng, INIT_RANGE));
                }
                layer.push(neuron);
            }
            weights.push(layer);
        }

        Ok(Network {
            architecture: architecture,
            weights: weights,
        })
    }

    /// Shorthand for `Network::new(Architecture::new(..)?, rng)`
    pub fn random<R: Rng>(
        inputs: usize,
        outputs: usize,
        hidden_layers: usize,
        neurons: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let arch = Architecture::new(inputs, outputs, hidden_layers, neurons)?;
        Network::new(arch, rng)
    }

    /// Builds a network around an existing weight structure, which must have
    /// exactly the shape `architecture` implies.
    pub fn from_weights(architecture: Architecture, weights: Weights) -> Result<Self> {
        architecture.validate()?;

        let shape = architecture.weight_shape();
        if weights.len() != shape.len() {
            return Err(Error::ShapeMismatch {
                location: "layers".into(),
                expected: shape.len(),
                found: weights.len(),
            });
        }

        for (l_idx, (layer, (neurons, width))) in weights.iter().zip(shape).enumerate() {
            if layer.len() != neurons {
                return Err(Error::ShapeMismatch {
                    location: format!("layer {}", l_idx),
                    expected: neurons,
                    found: layer.len(),
                });
            }
            for (n_idx, neuron) in layer.iter().enumerate() {
                if neuron.len() != width {
                    return Err(Error::ShapeMismatch {
                        location: format!("layer {}, neuron {}", l_idx, n_idx),
                        expected: width,
                        found: neuron.len(),
                    });
                }
            }
        }

        Ok(Network {
            architecture: architecture,
            weights: weights,
        })
    }

    /// Returns a copy of `weights` where every scalar, independently with
    /// probability `chance`, is replaced by a draw from `[-change, change)`.
    pub fn mutate<R: Rng>(weights: &Weights, chance: f32, change: f32, rng: &mut R) -> Weights {
        weights.perturb(chance, change, rng)
    }

    /// Feeds `input` forward through every layer and returns the output layer.
    ///
    /// Each neuron computes `sigmoid(dot(prev, w) + bias)` where the bias is
    /// the last value of its weight row.
    pub fn run(&self, input: &[f32]) -> Result<Vec<f32>> {
        if input.len() != self.architecture.inputs {
            return Err(Error::InvalidInput {
                expected: self.architecture.inputs,
                found: input.len(),
            });
        }

        let mut output = input.to_vec();
        for layer in self.weights.iter() {
            output = layer
                .iter()
                .map(|neuron| {
                    let bias_idx = neuron.len() - 1;
                    sigmoid(dot(&output, &neuron[..bias_idx]) + neuron[bias_idx])
                })
                .collect();
        }
        Ok(output)
    }

    /// The network's architecture
    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    /// The network's weights
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Consumes the network, returning its weights
    pub fn into_weights(self) -> Weights {
        self.weights
    }
}

impl Evaluator<[f32], Result<Vec<f32>>> for Network {
    fn evaluate(&self, payload: &[f32]) -> Result<Vec<f32>> {
        self.run(payload)
    }
}

impl Genome for Network {
    fn num_weights(&self) -> usize {
        self.architecture.num_weights()
    }

    fn mutate<R: Rng>(&self, chance: f32, change: f32, rng: &mut R) -> Self {
        // Shape is preserved by construction, no need to re-validate
        Network {
            architecture: self.architecture,
            weights: Network::mutate(&self.weights, chance, change, rng),
        }
    }
}

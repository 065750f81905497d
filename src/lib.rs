//! # micromlp
//!
//! A scalar reverse-mode automatic-differentiation engine with a small MLP
//! classifier on top, trained on flattened grayscale digit images.
//!
//! - [`autograd`]: the [`Value`](autograd::Value) graph; arithmetic records
//!   nodes, `backward` accumulates gradients in reverse topological order.
//! - [`nn`]: `Neuron` / `Layer` / `Mlp` composition with ReLU hidden layers
//!   and a linear output layer.
//! - [`data`]: CSV datasets of `label,pixel...` rows, validated on load.
//! - [`train`]: the driver; squared-error loss against `{+1,-1}` one-hot
//!   targets, linearly decaying learning rate, cyclic batches, periodic
//!   test-set evaluation.
//! - [`config`]: every knob, overridable via `MICROMLP_`-prefixed
//!   environment variables.
//! - [`snapshot`]: trained parameters as a flat binary list.
//!
//! Everything runs single-threaded; graphs are `Rc`-shared within a step
//! and rebuilt from scratch on every forward pass.

pub mod autograd;
pub mod config;
pub mod data;
pub mod nn;
pub mod snapshot;
pub mod train;

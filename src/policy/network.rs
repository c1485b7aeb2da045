//! PPO actor-critic network and checkpoint loading.
//!
//! The network mirrors the checkpoint layout the training system writes:
//! a shared 64x64 trunk with a tanh-bounded action mean head, a clamped
//! log-std head and a value head. Evaluation here is deterministic: the
//! mean is the action. The log-std and value heads exist so a full
//! actor-critic record loads without remapping.

use std::path::Path;

use burn::backend::ndarray::{NdArray, NdArrayDevice};
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::record::{BinFileRecorder, FullPrecisionSettings};
use burn::tensor::activation::{relu, tanh};
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};

use super::{Policy, PolicyError};
use crate::constants::{ACTION_SIZE, OBS_SIZE};

/// Log-std clamp bounds for numerical stability.
const LOG_STD_MIN: f32 = -20.0;
const LOG_STD_MAX: f32 = 2.0;

/// Hidden width of the shared trunk.
const HIDDEN_SIZE: usize = 64;

/// CPU backend used for checkpoint evaluation.
pub type InferenceBackend = NdArray;

/// Actor-critic network for the drone policy.
#[derive(Module, Debug)]
pub struct PolicyNet<B: Backend> {
    shared_0: Linear<B>,
    shared_1: Linear<B>,
    policy_mean: Linear<B>,
    policy_log_std: Linear<B>,
    value_head: Linear<B>,
}

impl<B: Backend> PolicyNet<B> {
    /// Create a freshly initialized network (the load template).
    pub fn new(device: &B::Device) -> Self {
        Self {
            shared_0: LinearConfig::new(OBS_SIZE, HIDDEN_SIZE).init(device),
            shared_1: LinearConfig::new(HIDDEN_SIZE, HIDDEN_SIZE).init(device),
            policy_mean: LinearConfig::new(HIDDEN_SIZE, ACTION_SIZE).init(device),
            policy_log_std: LinearConfig::new(HIDDEN_SIZE, ACTION_SIZE).init(device),
            value_head: LinearConfig::new(HIDDEN_SIZE, 1).init(device),
        }
    }

    /// Forward pass returning (mean, log_std, value).
    ///
    /// The mean is tanh-bounded to the action range [-1, 1].
    pub fn forward(&self, obs: Tensor<B, 2>) -> (Tensor<B, 2>, Tensor<B, 2>, Tensor<B, 2>) {
        let x = relu(self.shared_0.forward(obs));
        let x = relu(self.shared_1.forward(x));

        let mean = tanh(self.policy_mean.forward(x.clone()));
        let log_std = self
            .policy_log_std
            .forward(x.clone())
            .clamp(LOG_STD_MIN, LOG_STD_MAX);
        let value = self.value_head.forward(x);

        (mean, log_std, value)
    }
}

/// Pretrained PPO policy evaluated deterministically on CPU.
#[derive(Debug)]
pub struct PpoPolicy {
    net: PolicyNet<InferenceBackend>,
    device: NdArrayDevice,
}

impl PpoPolicy {
    /// Load a policy checkpoint from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let device = NdArrayDevice::default();
        let recorder = BinFileRecorder::<FullPrecisionSettings>::new();

        let net = PolicyNet::new(&device)
            .load_file(path, &recorder, &device)
            .map_err(|e| PolicyError::Checkpoint {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        log::info!("loaded policy checkpoint from {}", path.display());
        Ok(Self { net, device })
    }

    /// Wrap an in-memory network, bypassing the checkpoint file.
    pub fn from_net(net: PolicyNet<InferenceBackend>) -> Self {
        Self {
            net,
            device: NdArrayDevice::default(),
        }
    }
}

impl Policy for PpoPolicy {
    fn action(&mut self, observation: &[f32; OBS_SIZE]) -> Result<[f32; ACTION_SIZE], PolicyError> {
        let data = TensorData::new(observation.to_vec(), [1, OBS_SIZE]);
        let obs = Tensor::<InferenceBackend, 2>::from_data(data, &self.device);

        let (mean, _log_std, _value) = self.net.forward(obs);
        let flat = mean
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| PolicyError::Inference(format!("{:?}", e)))?;

        let mut action = [0.0f32; ACTION_SIZE];
        action.copy_from_slice(&flat[..ACTION_SIZE]);
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_policy() -> PpoPolicy {
        let device = NdArrayDevice::default();
        PpoPolicy::from_net(PolicyNet::new(&device))
    }

    #[test]
    fn test_forward_shapes() {
        let device = NdArrayDevice::default();
        let net = PolicyNet::<InferenceBackend>::new(&device);

        let obs = Tensor::<InferenceBackend, 2>::zeros([4, OBS_SIZE], &device);
        let (mean, log_std, value) = net.forward(obs);

        assert_eq!(mean.dims(), [4, ACTION_SIZE]);
        assert_eq!(log_std.dims(), [4, ACTION_SIZE]);
        assert_eq!(value.dims(), [4, 1]);
    }

    #[test]
    fn test_action_is_deterministic_and_bounded() {
        let mut policy = create_policy();
        let obs = [0.3f32; OBS_SIZE];

        let a = policy.action(&obs).unwrap();
        let b = policy.action(&obs).unwrap();
        assert_eq!(a, b, "same observation must give same action");

        for v in a {
            assert!(v.abs() <= 1.0, "action component {} outside [-1, 1]", v);
        }
    }

    #[test]
    fn test_checkpoint_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.bin");

        let device = NdArrayDevice::default();
        let net = PolicyNet::<InferenceBackend>::new(&device);
        let recorder = BinFileRecorder::<FullPrecisionSettings>::new();

        let obs = [0.1f32; OBS_SIZE];
        let mut original = PpoPolicy::from_net(net.clone());
        let expected = original.action(&obs).unwrap();

        net.save_file(&path, &recorder).unwrap();

        let mut loaded = PpoPolicy::load(&path).unwrap();
        assert_eq!(loaded.action(&obs).unwrap(), expected);
    }

    #[test]
    fn test_missing_checkpoint_is_an_error() {
        let err = PpoPolicy::load("does_not_exist.bin").unwrap_err();
        match err {
            PolicyError::Checkpoint { path, .. } => {
                assert!(path.to_string_lossy().contains("does_not_exist"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}

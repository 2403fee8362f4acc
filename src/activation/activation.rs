use serde::{Serialize, Deserialize};

use crate::error::SandboxError;

/// Bound on sigmoid's argument before the exponential. Any bound large enough
/// to keep `exp` finite in f64 works; the saturated result is 0 or 1 either way.
const SIGMOID_CLAMP: f64 = 500.0;

/// The closed registry of hidden-layer activations.
///
/// Each variant pairs an element-wise function with its derivative. The
/// output layer's nonlinearity is not selected from here; it is fixed by the
/// network's output size (sigmoid for binary, softmax for multi-class) in
/// `Network::forward()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// No nonlinearity; the whole network collapses to a linear map. Kept in
    /// the registry deliberately so its limitations can be demonstrated.
    Identity,
    ReLU,
    Sigmoid,
    Tanh,
}

impl Activation {
    pub const ALL: [Activation; 4] = [
        Activation::Identity,
        Activation::ReLU,
        Activation::Sigmoid,
        Activation::Tanh,
    ];

    /// Resolves a UI-facing name to a registry entry. Unknown names are a
    /// configuration error, never a silent default.
    pub fn from_name(name: &str) -> Result<Activation, SandboxError> {
        match name {
            "none" | "identity" => Ok(Activation::Identity),
            "relu" => Ok(Activation::ReLU),
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            other => Err(SandboxError::UnknownActivation(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Identity => "none",
            Activation::ReLU => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
        }
    }

    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Identity => x,
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => x.tanh(),
        }
    }

    /// Element-wise derivative, evaluated at the pre-activation value.
    ///
    /// ReLU's derivative is undefined at exactly 0; this registry uses the
    /// sub-gradient convention `derivative(0) = 0`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Identity => 1.0,
            Activation::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            Activation::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }
}

/// Logistic function with a clamped argument so `exp` never overflows.
pub(crate) fn sigmoid(x: f64) -> f64 {
    let x = x.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP);
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_resolves_every_registry_entry() {
        for act in Activation::ALL {
            assert_eq!(Activation::from_name(act.name()).unwrap(), act);
        }
        assert_eq!(Activation::from_name("identity").unwrap(), Activation::Identity);
    }

    #[test]
    fn from_name_rejects_unknown_names() {
        let err = Activation::from_name("softplus").unwrap_err();
        assert!(matches!(err, SandboxError::UnknownActivation(name) if name == "softplus"));
    }

    #[test]
    fn identity_passes_through_with_unit_derivative() {
        assert_eq!(Activation::Identity.function(-3.25), -3.25);
        assert_eq!(Activation::Identity.derivative(-3.25), 1.0);
    }

    #[test]
    fn relu_zeroes_negatives_and_uses_zero_subgradient_at_origin() {
        assert_eq!(Activation::ReLU.function(-2.0), 0.0);
        assert_eq!(Activation::ReLU.function(2.0), 2.0);
        assert_eq!(Activation::ReLU.derivative(-2.0), 0.0);
        assert_eq!(Activation::ReLU.derivative(2.0), 1.0);
        assert_eq!(Activation::ReLU.derivative(0.0), 0.0);
    }

    #[test]
    fn sigmoid_saturates_without_overflow() {
        let lo = Activation::Sigmoid.function(-1e9);
        let hi = Activation::Sigmoid.function(1e9);
        assert!(lo.is_finite() && hi.is_finite());
        assert!(lo < 1e-100);
        assert!((hi - 1.0).abs() < 1e-12);
        assert_eq!(Activation::Sigmoid.derivative(1e9), 0.0);
    }

    #[test]
    fn sigmoid_derivative_matches_s_times_one_minus_s() {
        let x = 0.7;
        let s = Activation::Sigmoid.function(x);
        assert!((Activation::Sigmoid.derivative(x) - s * (1.0 - s)).abs() < 1e-12);
    }

    #[test]
    fn tanh_derivative_matches_identity_one_minus_t_squared() {
        let x: f64 = -0.4;
        let t = x.tanh();
        assert!((Activation::Tanh.derivative(x) - (1.0 - t * t)).abs() < 1e-12);
    }
}

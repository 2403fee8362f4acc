use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::activation::activation::Activation;
use crate::error::SandboxError;
use crate::problem::catalog::catalog;
use crate::problem::problem::Problem;
use crate::session::session::Session;
use crate::train::epoch::train_epoch;

/// Bounds on the hidden-layer width, enforced at this boundary only; the
/// network model itself accepts any positive size.
pub const HIDDEN_SIZE_MIN: usize = 4;
pub const HIDDEN_SIZE_MAX: usize = 32;

/// Default rate for online SGD; adjustable per store.
pub const DEFAULT_LEARNING_RATE: f64 = 0.005;

/// Read-only view of the current session for display layers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub problem_id: &'static str,
    pub epoch: u64,
    pub loss: f64,
    pub hidden_size: usize,
    pub activation: Activation,
    pub training: bool,
}

impl SessionSnapshot {
    /// JSON rendering for display layers that want a plain string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The state machine over all per-problem sessions.
///
/// Two states: Idle and Training, tracked by the `training` flag. Every
/// structural transition (reset, activation change, hidden resize, problem
/// switch) forces Idle first, so a continuous driver can never run an epoch
/// against a session that was swapped out underneath it. `train_one_epoch`
/// is valid in either state and does not change which state is active.
///
/// The store owns its randomness source; construct with `with_seed` for
/// reproducible runs.
pub struct SessionStore {
    problems: Vec<Problem>,
    sessions: Vec<Session>,
    current: usize,
    activation: Activation,
    learning_rate: f64,
    training: bool,
    rng: StdRng,
}

impl SessionStore {
    /// Builds a store over the full catalog with entropy-seeded randomness.
    pub fn new() -> Result<SessionStore, SandboxError> {
        SessionStore::from_rng(StdRng::from_entropy())
    }

    /// Builds a deterministic store for tests and reproducible demos.
    pub fn with_seed(seed: u64) -> Result<SessionStore, SandboxError> {
        SessionStore::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Result<SessionStore, SandboxError> {
        let problems = catalog();

        // Validate catalog dimensions once; every later rebuild reuses them.
        for problem in &problems {
            for (which, value) in [
                ("input", problem.input_size),
                ("hidden", problem.hidden_size),
                ("output", problem.output_size),
            ] {
                if value == 0 {
                    return Err(SandboxError::InvalidLayerSize { which, value });
                }
            }
        }

        let sessions = problems
            .iter()
            .map(|p| Session::fresh(p, p.hidden_size, &mut rng))
            .collect();

        Ok(SessionStore {
            problems,
            sessions,
            current: 0,
            activation: Activation::ReLU,
            learning_rate: DEFAULT_LEARNING_RATE,
            training: false,
            rng,
        })
    }

    // ── Read accessors ─────────────────────────────────────────────────────

    pub fn current_problem(&self) -> &Problem {
        &self.problems[self.current]
    }

    pub fn current_session(&self) -> &Session {
        &self.sessions[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn problem_count(&self) -> usize {
        self.problems.len()
    }

    pub fn epoch(&self) -> u64 {
        self.sessions[self.current].epoch
    }

    pub fn loss(&self) -> f64 {
        self.sessions[self.current].loss
    }

    pub fn hidden_size(&self) -> usize {
        self.sessions[self.current].hidden_size
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = self.current_session();
        SessionSnapshot {
            problem_id: self.current_problem().id,
            epoch: session.epoch,
            loss: session.loss,
            hidden_size: session.hidden_size,
            activation: self.activation,
            training: self.training,
        }
    }

    // ── Transitions ────────────────────────────────────────────────────────

    pub fn start_training(&mut self) {
        self.training = true;
    }

    pub fn stop_training(&mut self) {
        self.training = false;
    }

    pub fn set_learning_rate(&mut self, lr: f64) {
        self.learning_rate = lr;
    }

    /// Runs one epoch on the current session. Valid whether Idle or Training;
    /// does not change the training flag.
    pub fn train_one_epoch(&mut self) {
        let session = &mut self.sessions[self.current];
        let loss = train_epoch(
            &mut session.network,
            &session.data,
            self.activation,
            self.learning_rate,
            &mut self.rng,
        );
        session.epoch += 1;
        session.loss = loss;
    }

    /// Discards the current session: new random weights, fresh dataset,
    /// epoch 0, placeholder loss 1.0. Forces Idle. Other sessions keep their
    /// progress.
    pub fn reset(&mut self) {
        self.training = false;
        let hidden = self.sessions[self.current].hidden_size;
        self.rebuild_current(hidden);
        debug!("reset '{}' (hidden {hidden})", self.current_problem().id);
    }

    /// Selects the hidden activation. Trained weights only mean anything
    /// under the activation they were trained with, so this forces Idle and
    /// resets the current session. A full restart, not a shortcut.
    pub fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
        self.reset();
        debug!("activation -> {}", activation.name());
    }

    /// Stringly boundary for UI dropdowns; unknown names fail fast.
    pub fn set_activation_by_name(&mut self, name: &str) -> Result<(), SandboxError> {
        let activation = Activation::from_name(name)?;
        self.set_activation(activation);
        Ok(())
    }

    /// Resizes the current problem's hidden layer, which means discarding the
    /// session and rebuilding at the new width. Forces Idle.
    pub fn set_hidden_size(&mut self, size: usize) -> Result<(), SandboxError> {
        if !(HIDDEN_SIZE_MIN..=HIDDEN_SIZE_MAX).contains(&size) {
            return Err(SandboxError::HiddenSizeOutOfRange {
                size,
                min: HIDDEN_SIZE_MIN,
                max: HIDDEN_SIZE_MAX,
            });
        }
        self.training = false;
        self.rebuild_current(size);
        debug!("hidden size -> {size} on '{}'", self.current_problem().id);
        Ok(())
    }

    /// Advances to the next problem in catalog order, wrapping at the end.
    /// Forces Idle so a running driver stops before the active session
    /// changes; the sessions themselves are untouched.
    pub fn next_problem(&mut self) {
        self.training = false;
        self.current = (self.current + 1) % self.problems.len();
        debug!("switched to '{}'", self.current_problem().id);
    }

    /// Cyclic counterpart of `next_problem`.
    pub fn prev_problem(&mut self) {
        self.training = false;
        self.current = (self.current + self.problems.len() - 1) % self.problems.len();
        debug!("switched to '{}'", self.current_problem().id);
    }

    fn rebuild_current(&mut self, hidden_size: usize) {
        self.sessions[self.current] =
            Session::fresh(&self.problems[self.current], hidden_size, &mut self.rng);
    }
}

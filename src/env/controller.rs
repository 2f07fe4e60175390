//! Episode controller: sequences reset/step calls against one engine session.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::codec::{ActionCodec, ActionSpace, DecodedAction, ObservationSpace};
use crate::core::{EngineError, EnvConfig, EnvError, EnvResult};
use crate::engine::Engine;

use super::observation::Observation;
use super::trajectory::{EpisodeTrajectory, Transition};

/// Reward returned by every step.
///
/// The signal is episode length, not game score.
pub const STEP_REWARD: f64 = 1.0;

/// Auxiliary per-step information. Always empty.
pub type StepInfo = FxHashMap<String, i64>;

/// Session lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodePhase {
    /// No session yet, or the last reset failed.
    Uninitialized,
    /// A session is live and has not signalled completion.
    Ready,
    /// The engine reported `done`. Steps are still forwarded.
    Terminal,
}

/// Result of one `step` call.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Latest roll followed by the post-move state vector.
    pub observation: Observation,

    /// Always `STEP_REWARD`.
    pub reward: f64,

    /// Engine completion flag.
    pub done: bool,

    /// Empty info mapping.
    pub info: StepInfo,
}

/// Owns one engine session and exposes the flat `reset`/`step` interface.
///
/// ## Example
///
/// ```
/// use cantstop_gym::env::EpisodeController;
/// use cantstop_gym::games::simple::SimpleDiceEngineBuilder;
///
/// let builder = SimpleDiceEngineBuilder::new();
/// let config = builder.env_config();
/// let mut env = EpisodeController::new(builder.build(42), config).unwrap();
///
/// let obs = env.reset().unwrap();
/// assert_eq!(obs.len(), 4 + 12);
///
/// let result = env.step(12).unwrap();
/// assert_eq!(result.reward, 1.0);
/// assert!(result.info.is_empty());
/// ```
pub struct EpisodeController<E: Engine> {
    engine: E,
    config: EnvConfig,
    codec: ActionCodec,
    phase: EpisodePhase,
    steps: u64,
    episodes: u64,
    trajectory: Option<EpisodeTrajectory>,
}

impl<E: Engine> EpisodeController<E> {
    /// Create a controller and run the engine's one-time setup.
    pub fn new(mut engine: E, config: EnvConfig) -> EnvResult<Self> {
        config.validate()?;
        let codec = ActionCodec::from_config(&config)?;
        engine.initialize()?;

        Ok(Self {
            engine,
            config,
            codec,
            phase: EpisodePhase::Uninitialized,
            steps: 0,
            episodes: 0,
            trajectory: None,
        })
    }

    /// Start a fresh episode, discarding any episode in progress.
    ///
    /// Returns the initial roll followed by the initial state vector.
    pub fn reset(&mut self) -> EnvResult<Observation> {
        // A failed reset leaves no usable session behind.
        self.phase = EpisodePhase::Uninitialized;
        self.trajectory = None;

        let state = self.engine.reset()?;
        let roll = self.engine.roll()?;
        self.check_shape(&roll, &state)?;
        let observation = Observation::assemble(&roll, &state);

        self.phase = EpisodePhase::Ready;
        self.steps = 0;
        self.episodes += 1;
        if self.config.record_trajectory {
            self.trajectory = Some(EpisodeTrajectory::new(self.episodes, observation.clone()));
        }

        Ok(observation)
    }

    /// Decode `index`, submit the move, and observe the result.
    ///
    /// Fails with `SessionNotReady` before the first successful `reset` and
    /// with `InvalidAction` for indices outside `[0, 2M)`; neither reaches
    /// the engine. Engine faults, including answers that do not fit the
    /// configured shape, are returned as `EnvError::Engine` and leave the
    /// phase unchanged.
    pub fn step(&mut self, index: usize) -> EnvResult<StepResult> {
        self.ensure_session()?;
        let action = self.codec.decode(index)?;
        self.apply(index, action)
    }

    /// `step` for signed action indices. Negative indices are invalid.
    pub fn step_signed(&mut self, index: i64) -> EnvResult<StepResult> {
        self.ensure_session()?;
        let action = self.codec.decode_signed(index)?;
        let index = usize::try_from(index).map_err(|_| EnvError::InvalidAction {
            index: i128::from(index),
            action_count: self.codec.action_count(),
        })?;
        self.apply(index, action)
    }

    fn ensure_session(&self) -> EnvResult<()> {
        match self.phase {
            EpisodePhase::Uninitialized => Err(EnvError::SessionNotReady),
            EpisodePhase::Ready | EpisodePhase::Terminal => Ok(()),
        }
    }

    /// Reject engine answers that do not fit the configured observation shape.
    fn check_shape(&self, roll: &[i64], state: &[i64]) -> Result<(), EngineError> {
        if state.len() != self.config.state_len {
            return Err(EngineError::MalformedResponse(format!(
                "state has {} entries, expected {}",
                state.len(),
                self.config.state_len
            )));
        }
        if roll.len() > self.config.dice_count {
            return Err(EngineError::MalformedResponse(format!(
                "roll has {} dice, expected at most {}",
                roll.len(),
                self.config.dice_count
            )));
        }
        Ok(())
    }

    fn apply(&mut self, index: usize, action: DecodedAction) -> EnvResult<StepResult> {
        self.engine.apply_move(action.mv.cells(), action.stop)?;

        let state = self.engine.state()?;
        let roll = self.engine.roll()?;
        let done = self.engine.is_done()?;
        self.check_shape(&roll, &state)?;
        let observation = Observation::assemble(&roll, &state);

        self.steps += 1;
        if done {
            self.phase = EpisodePhase::Terminal;
        }
        if let Some(trajectory) = self.trajectory.as_mut() {
            trajectory.push(Transition {
                index,
                action,
                observation: observation.clone(),
                reward: STEP_REWARD,
                done,
            });
        }

        Ok(StepResult {
            observation,
            reward: STEP_REWARD,
            done,
            info: StepInfo::default(),
        })
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Successful steps in the current episode.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Successful resets over the controller's lifetime.
    #[must_use]
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// The action codec.
    #[must_use]
    pub fn codec(&self) -> &ActionCodec {
        &self.codec
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Flat action space.
    #[must_use]
    pub fn action_space(&self) -> ActionSpace {
        ActionSpace::from_config(&self.config)
    }

    /// Observation space.
    #[must_use]
    pub fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::from_config(&self.config)
    }

    /// Recorded trajectory of the current episode, if recording is enabled.
    #[must_use]
    pub fn trajectory(&self) -> Option<&EpisodeTrajectory> {
        self.trajectory.as_ref()
    }

    /// Take the current trajectory, leaving none until the next reset.
    pub fn take_trajectory(&mut self) -> Option<EpisodeTrajectory> {
        self.trajectory.take()
    }

    /// Borrow the engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutably borrow the engine.
    ///
    /// Mutating the session behind the controller's back is the caller's
    /// responsibility.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consume the controller and return the engine.
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// One-line status.
    #[must_use]
    pub fn render(&self) -> String {
        format!("Num of time steps: {}", self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineError, Roll, StateVector};
    use smallvec::smallvec;

    /// Finishes after `limit` moves; fails on demand.
    struct CountingEngine {
        moves: usize,
        limit: usize,
        fail_next: bool,
        state_len: usize,
    }

    impl CountingEngine {
        fn new(limit: usize) -> Self {
            Self {
                moves: 0,
                limit,
                fail_next: false,
                state_len: 1,
            }
        }
    }

    impl Engine for CountingEngine {
        fn initialize(&mut self) -> Result<(), EngineError> {
            Ok(())
        }

        fn reset(&mut self) -> Result<StateVector, EngineError> {
            self.moves = 0;
            Ok(vec![0; self.state_len])
        }

        fn apply_move(&mut self, _cells: &[u8], _stop: bool) -> Result<(), EngineError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(EngineError::Transport("lost connection".into()));
            }
            self.moves += 1;
            Ok(())
        }

        fn state(&self) -> Result<StateVector, EngineError> {
            Ok(vec![self.moves as i64; self.state_len])
        }

        fn roll(&self) -> Result<Roll, EngineError> {
            Ok(smallvec![1, 2, 3, 4])
        }

        fn is_done(&self) -> Result<bool, EngineError> {
            Ok(self.moves >= self.limit)
        }
    }

    fn controller(limit: usize) -> EpisodeController<CountingEngine> {
        EpisodeController::new(CountingEngine::new(limit), EnvConfig::default()).unwrap()
    }

    #[test]
    fn test_step_before_reset() {
        let mut env = controller(3);
        assert_eq!(env.phase(), EpisodePhase::Uninitialized);
        assert_eq!(env.step(0), Err(EnvError::SessionNotReady));
        assert_eq!(env.step_signed(-1), Err(EnvError::SessionNotReady));
    }

    #[test]
    fn test_phase_transitions() {
        let mut env = controller(2);
        env.reset().unwrap();
        assert_eq!(env.phase(), EpisodePhase::Ready);

        assert!(!env.step(0).unwrap().done);
        assert_eq!(env.phase(), EpisodePhase::Ready);

        assert!(env.step(1).unwrap().done);
        assert_eq!(env.phase(), EpisodePhase::Terminal);

        let after = env.step(2).unwrap();
        assert_eq!(after.observation.len(), 5);
        assert_eq!(env.phase(), EpisodePhase::Terminal);

        env.reset().unwrap();
        assert_eq!(env.phase(), EpisodePhase::Ready);
        assert_eq!(env.steps(), 0);
        assert_eq!(env.episodes(), 2);
    }

    #[test]
    fn test_invalid_action_is_not_forwarded() {
        let mut env = controller(5);
        env.reset().unwrap();

        assert_eq!(
            env.step(156),
            Err(EnvError::InvalidAction { index: 156, action_count: 156 })
        );
        assert_eq!(
            env.step_signed(-1),
            Err(EnvError::InvalidAction { index: -1, action_count: 156 })
        );
        assert_eq!(env.engine().moves, 0);
        assert_eq!(env.steps(), 0);
    }

    #[test]
    fn test_engine_fault_propagates() {
        let mut env = controller(5);
        env.reset().unwrap();
        env.engine_mut().fail_next = true;

        assert_eq!(
            env.step(3),
            Err(EnvError::Engine(EngineError::Transport("lost connection".into())))
        );
        assert_eq!(env.phase(), EpisodePhase::Ready);
        assert_eq!(env.steps(), 0);
        assert!(env.step(3).is_ok());
    }

    #[test]
    fn test_state_length_mismatch_is_malformed() {
        let mut engine = CountingEngine::new(5);
        engine.state_len = 5;
        let mut env = EpisodeController::new(engine, EnvConfig::default()).unwrap();

        assert!(matches!(
            env.reset(),
            Err(EnvError::Engine(EngineError::MalformedResponse(_)))
        ));
        assert_eq!(env.phase(), EpisodePhase::Uninitialized);

        env.engine_mut().state_len = 1;
        env.reset().unwrap();
        env.engine_mut().state_len = 7;
        assert!(matches!(
            env.step(0),
            Err(EnvError::Engine(EngineError::MalformedResponse(_)))
        ));
        assert_eq!(env.steps(), 0);
        assert_eq!(env.phase(), EpisodePhase::Ready);
    }

    #[test]
    fn test_reward_and_info() {
        let mut env = controller(5);
        env.reset().unwrap();
        let result = env.step_signed(100).unwrap();
        assert_eq!(result.reward, STEP_REWARD);
        assert!(result.info.is_empty());
        assert_eq!(result.observation.state(), &[1]);
    }

    #[test]
    fn test_render() {
        let mut env = controller(5);
        env.reset().unwrap();
        env.step(0).unwrap();
        env.step(1).unwrap();
        assert_eq!(env.render(), "Num of time steps: 2");
    }

    #[test]
    fn test_trajectory_recording() {
        let config = EnvConfig::default().with_trajectory(true);
        let mut env = EpisodeController::new(CountingEngine::new(2), config).unwrap();
        assert!(env.trajectory().is_none());

        env.reset().unwrap();
        env.step(5).unwrap();
        env.step(90).unwrap();

        let trajectory = env.take_trajectory().unwrap();
        assert_eq!(trajectory.episode, 1);
        assert_eq!(trajectory.actions().collect::<Vec<_>>(), vec![5, 90]);
        assert!(trajectory.transitions[1].action.stop);
        assert!(trajectory.is_complete());
        assert!(env.trajectory().is_none());
    }

    #[test]
    fn test_invalid_config() {
        let result = EpisodeController::new(CountingEngine::new(1), EnvConfig::default().with_tracks(1));
        assert!(matches!(result, Err(EnvError::InvalidConfig(_))));
    }
}

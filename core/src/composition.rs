//! Reducer composition utilities
//!
//! [`scope_reducer`] embeds a child reducer inside a parent: the parent
//! state lends out the child's slice, parent actions are filtered down to
//! child actions, and any effects the child returns are lifted back into
//! parent actions.
//!
//! # Examples
//!
//! ```
//! use tasklist_core::composition::scope_reducer;
//! use tasklist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct ToggleState {
//!     on: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum ToggleAction {
//!     Flip,
//! }
//!
//! struct ToggleReducer;
//!
//! impl Reducer for ToggleReducer {
//!     type State = ToggleState;
//!     type Action = ToggleAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut ToggleState, _action: ToggleAction, _env: &()) -> SmallVec<[Effect<ToggleAction>; 4]> {
//!         state.on = !state.on;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Default)]
//! struct PanelState {
//!     toggle: ToggleState,
//!     title: String,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum PanelAction {
//!     Toggle(ToggleAction),
//!     Rename(String),
//! }
//!
//! let scoped = scope_reducer(
//!     ToggleReducer,
//!     |panel: &mut PanelState| &mut panel.toggle,
//!     |action: PanelAction| match action {
//!         PanelAction::Toggle(inner) => Some(inner),
//!         PanelAction::Rename(_) => None,
//!     },
//!     PanelAction::Toggle,
//! );
//!
//! let mut state = PanelState::default();
//! scoped.reduce(&mut state, PanelAction::Toggle(ToggleAction::Flip), &());
//! assert!(state.toggle.on);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Scopes a reducer to operate on a slice of a larger state.
///
/// # Arguments
///
/// - `reducer`: The child reducer
/// - `state`: Projects the parent state onto the child's state
/// - `extract`: Picks child actions out of parent actions; other actions are ignored
/// - `embed`: Wraps child actions produced by effects back into parent actions
pub fn scope_reducer<S, A, R>(
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
) -> ScopedReducer<S, A, R>
where
    R: Reducer,
{
    ScopedReducer {
        reducer,
        state,
        extract,
        embed,
    }
}

/// A scoped reducer that operates on a slice of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, A, R>
where
    R: Reducer,
{
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
}

impl<S, A, R> Clone for ScopedReducer<S, A, R>
where
    R: Reducer + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            state: self.state,
            extract: self.extract,
            embed: self.embed,
        }
    }
}

impl<S, A, R> std::fmt::Debug for ScopedReducer<S, A, R>
where
    R: Reducer + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl<S, A, R> Reducer for ScopedReducer<S, A, R>
where
    R: Reducer,
    R::Action: Send + 'static,
    A: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.state)(state);
        self.reducer
            .reduce(child_state, child_action, env)
            .into_iter()
            .map(|effect| effect.map(self.embed))
            .collect()
    }
}

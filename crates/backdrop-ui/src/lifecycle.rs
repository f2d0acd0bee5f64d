//! Node lifecycle state machine.
//!
//! ```text
//! Active(S) ──tear_down──▶ TornDown   (terminal)
//! ```
//!
//! The active state is only reachable through [`Lifecycle::active_mut`], so a
//! torn-down node has no state left to mutate and no resources left to free.

/// Lifecycle of a node holding state `S`.
#[derive(Debug)]
pub enum Lifecycle<S> {
    Active(S),
    TornDown,
}

impl<S> Lifecycle<S> {
    #[inline]
    pub fn new(state: S) -> Self {
        Lifecycle::Active(state)
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        matches!(self, Lifecycle::TornDown)
    }

    #[inline]
    pub fn active(&self) -> Option<&S> {
        match self {
            Lifecycle::Active(state) => Some(state),
            Lifecycle::TornDown => None,
        }
    }

    #[inline]
    pub fn active_mut(&mut self) -> Option<&mut S> {
        match self {
            Lifecycle::Active(state) => Some(state),
            Lifecycle::TornDown => None,
        }
    }

    /// Moves to `TornDown`, handing back the active state the first time.
    ///
    /// Returns `None` on every later call.
    pub fn tear_down(&mut self) -> Option<S> {
        match std::mem::replace(self, Lifecycle::TornDown) {
            Lifecycle::Active(state) => Some(state),
            Lifecycle::TornDown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tear_down_yields_state_once() {
        let mut life = Lifecycle::new(vec![1, 2, 3]);
        assert!(!life.is_torn_down());
        assert_eq!(life.active().map(Vec::len), Some(3));

        assert_eq!(life.tear_down(), Some(vec![1, 2, 3]));
        assert!(life.is_torn_down());
        assert_eq!(life.tear_down(), None);
    }

    #[test]
    fn torn_down_state_is_unreachable() {
        let mut life = Lifecycle::new(0u32);
        if let Some(n) = life.active_mut() {
            *n += 5;
        }
        assert_eq!(life.active(), Some(&5));

        life.tear_down();
        assert!(life.active_mut().is_none());
        assert!(life.active().is_none());
    }
}

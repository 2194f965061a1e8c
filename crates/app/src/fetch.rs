//! Explicit fetch lifecycle state.
//!
//! Every remote read a controller owns is one of these four states rather
//! than a pair of boolean flags. Superseding requests are not cancelled;
//! whichever response lands last wins the slot.

/// Lifecycle of one remote read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    /// Never requested.
    #[default]
    Idle,

    /// Request in flight.
    Loading,

    /// Last request succeeded.
    Ready(T),

    /// Last request failed, with the surfaced message.
    Failed(String),
}

impl<T> FetchState<T> {
    /// The value, when the last request succeeded.
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, when the last request failed.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_the_variant() {
        assert_eq!(FetchState::<u8>::default(), FetchState::Idle);
        assert!(FetchState::<u8>::Loading.is_loading());
        assert_eq!(FetchState::Ready(7).ready(), Some(&7));
        assert_eq!(
            FetchState::<u8>::Failed("boom".to_string()).failure(),
            Some("boom")
        );
        assert_eq!(FetchState::<u8>::Idle.ready(), None);
    }
}

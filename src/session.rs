//! Session Lifecycle
//!
//! Top-level session state machine driving routing. A fresh load starts in
//! `CheckingSetup`, probes the setup-status endpoint exactly once, and then
//! settles into `NeedsSetup` or the unauthenticated/authenticated pair. The
//! machine is a pure reducer: callers feed it the outcomes of external calls
//! and query it for route decisions.

use crate::access::{self, LOGIN_PATH, Outcome, Principal, SETUP_PATH};

/// Session lifecycle states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Initial state: the setup-status probe has not completed yet.
    #[default]
    CheckingSetup,

    /// No administrator is configured. Only the setup path is reachable.
    NeedsSetup,

    /// Setup done, nobody logged in.
    Unauthenticated,

    /// A principal is logged in.
    Authenticated(Principal),
}

/// Route decision for a single navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Setup probe still in flight; show a loading placeholder.
    Pending,

    /// Redirect to the given path.
    Redirect(&'static str),

    /// Render the destination.
    Allowed,
}

/// The session state machine.
///
/// Invalid transitions are ignored rather than panicking: the machine only
/// moves along the edges described on each method, so a stray event (say, a
/// second login success after logout already ran) cannot corrupt the state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMachine {
    state: SessionState,
}

impl SessionMachine {
    /// Create a machine in `CheckingSetup`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The logged-in principal, when in `Authenticated`.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match &self.state {
            SessionState::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }

    /// Record the setup-status probe result. Only valid from `CheckingSetup`.
    ///
    /// An unconfigured backend moves to `NeedsSetup`; otherwise a stored
    /// credential restores `Authenticated` and its absence lands on
    /// `Unauthenticated`. Callers report a failed probe as unconfigured, so
    /// an unreachable backend still routes somewhere sensible.
    pub fn setup_checked(&mut self, is_configured: bool, stored: Option<Principal>) {
        if self.state != SessionState::CheckingSetup {
            return;
        }

        self.state = if !is_configured {
            SessionState::NeedsSetup
        } else if let Some(principal) = stored {
            SessionState::Authenticated(principal)
        } else {
            SessionState::Unauthenticated
        };
    }

    /// Record a completed admin setup. Only valid from `NeedsSetup`; the
    /// transition is permanent for this session.
    pub fn setup_completed(&mut self) {
        if self.state == SessionState::NeedsSetup {
            self.state = SessionState::Unauthenticated;
        }
    }

    /// Record a successful login. Only valid from `Unauthenticated`.
    pub fn login_succeeded(&mut self, principal: Principal) {
        if self.state == SessionState::Unauthenticated {
            self.state = SessionState::Authenticated(principal);
        }
    }

    /// Record a logout. Only valid from `Authenticated`.
    pub fn logged_out(&mut self) {
        if matches!(self.state, SessionState::Authenticated(_)) {
            self.state = SessionState::Unauthenticated;
        }
    }

    /// Record an authentication-failure signal from the API. Behaves like a
    /// logout: the stored credential is no longer honored by the server.
    pub fn auth_failed(&mut self) {
        self.logged_out();
    }

    /// Decide what to do with a navigation to `path`.
    ///
    /// `required` is the destination's permission slug, if it has one.
    /// While `NeedsSetup`, every path except the setup path redirects there;
    /// once configured, the setup path itself redirects away. Everything
    /// else delegates to [`access::guard`].
    #[must_use]
    pub fn route(&self, path: &str, required: Option<&str>) -> RouteDecision {
        match &self.state {
            SessionState::CheckingSetup => RouteDecision::Pending,
            SessionState::NeedsSetup => {
                if path == SETUP_PATH {
                    RouteDecision::Allowed
                } else {
                    RouteDecision::Redirect(SETUP_PATH)
                }
            }
            SessionState::Unauthenticated => {
                if path == LOGIN_PATH {
                    RouteDecision::Allowed
                } else {
                    RouteDecision::Redirect(LOGIN_PATH)
                }
            }
            SessionState::Authenticated(principal) => {
                if path == LOGIN_PATH || path == SETUP_PATH {
                    return RouteDecision::Redirect(access::first_available_route(principal));
                }

                match access::guard(Some(principal), required) {
                    Outcome::Allowed => RouteDecision::Allowed,
                    Outcome::Forbidden { redirect } => RouteDecision::Redirect(redirect),
                    Outcome::Unauthenticated => RouteDecision::Redirect(LOGIN_PATH),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cashier() -> Principal {
        Principal {
            id: 2,
            name: "Cashier".to_string(),
            email: "cashier@example.com".to_string(),
            role: "CASHIER".to_string(),
            permissions: ["sales:create".to_string()].into_iter().collect(),
        }
    }

    #[test]
    fn starts_checking_setup() {
        let machine = SessionMachine::new();

        assert_eq!(machine.state(), &SessionState::CheckingSetup);
        assert_eq!(machine.route("/pos", None), RouteDecision::Pending);
    }

    #[test]
    fn unconfigured_backend_needs_setup() {
        let mut machine = SessionMachine::new();

        machine.setup_checked(false, None);

        assert_eq!(machine.state(), &SessionState::NeedsSetup);
        assert_eq!(machine.route(SETUP_PATH, None), RouteDecision::Allowed);
        assert_eq!(
            machine.route("/pos", Some("sales:create")),
            RouteDecision::Redirect(SETUP_PATH)
        );
        assert_eq!(
            machine.route(LOGIN_PATH, None),
            RouteDecision::Redirect(SETUP_PATH)
        );
    }

    #[test]
    fn stored_credential_restores_authentication() {
        let mut machine = SessionMachine::new();

        machine.setup_checked(true, Some(cashier()));

        assert_eq!(machine.principal().map(|p| p.id), Some(2));
        assert_eq!(
            machine.route("/pos", Some("sales:create")),
            RouteDecision::Allowed
        );
    }

    #[test]
    fn configured_backend_without_credential_is_unauthenticated() {
        let mut machine = SessionMachine::new();

        machine.setup_checked(true, None);

        assert_eq!(machine.state(), &SessionState::Unauthenticated);
        assert_eq!(machine.route(LOGIN_PATH, None), RouteDecision::Allowed);
        assert_eq!(
            machine.route("/pos", Some("sales:create")),
            RouteDecision::Redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn setup_completed_leaves_needs_setup_permanently() {
        let mut machine = SessionMachine::new();

        machine.setup_checked(false, None);
        machine.setup_completed();

        assert_eq!(machine.state(), &SessionState::Unauthenticated);
        assert_eq!(
            machine.route(SETUP_PATH, None),
            RouteDecision::Redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn login_and_logout_round_trip() {
        let mut machine = SessionMachine::new();

        machine.setup_checked(true, None);
        machine.login_succeeded(cashier());

        assert!(machine.principal().is_some());

        machine.logged_out();

        assert_eq!(machine.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn auth_failure_signal_drops_the_session() {
        let mut machine = SessionMachine::new();

        machine.setup_checked(true, Some(cashier()));
        machine.auth_failed();

        assert_eq!(machine.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn setup_checked_is_only_honored_once() {
        let mut machine = SessionMachine::new();

        machine.setup_checked(true, None);
        machine.setup_checked(false, None);

        assert_eq!(machine.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn authenticated_login_path_redirects_to_first_available_route() {
        let mut machine = SessionMachine::new();

        machine.setup_checked(true, Some(cashier()));

        assert_eq!(
            machine.route(LOGIN_PATH, None),
            RouteDecision::Redirect("/pos")
        );
    }

    #[test]
    fn forbidden_destination_redirects_to_first_available_route() {
        let mut machine = SessionMachine::new();

        machine.setup_checked(true, Some(cashier()));

        assert_eq!(
            machine.route("/users", Some("users:read")),
            RouteDecision::Redirect("/pos")
        );
    }

    #[test]
    fn login_after_setup_completion_is_ignored_until_unauthenticated() {
        let mut machine = SessionMachine::new();

        // login_succeeded from CheckingSetup is a stray event and must no-op.
        machine.login_succeeded(cashier());

        assert_eq!(machine.state(), &SessionState::CheckingSetup);
    }
}

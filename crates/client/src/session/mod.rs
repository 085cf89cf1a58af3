//! Realtime session channel.
//!
//! One [`SocketSession`] is created by [`SessionProvider`] when the app starts
//! and shared through context. It owns at most one live connection. Route
//! gates ask it to connect and read its status; they never hold the socket.
//!
//! ```text
//!   Disconnected ──connect()──▶ Connecting ──handshake ok──▶ Connected
//!        ▲                          │                            │
//!        └──── connect failed ──────┘                            │
//!        └──── disconnect() / forceLogout / socket closed ───────┘
//! ```
//!
//! Everything runs on the UI thread, so state lives in `Rc<RefCell<_>>`.
//! `connect` checks and marks `Connecting` inside a single borrow before its
//! first `.await`; a second caller in the same tick sees `Connecting` and
//! returns without opening anything.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use futures_util::future::LocalBoxFuture;
use wagerdesk_shared::{ForceLogoutEvent, PresenceStatus, ServerEvent, SessionError, UserType};

mod connector;
mod provider;

pub use connector::WsConnector;
pub use provider::{use_session, SessionContext, SessionProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    pub fn is_connecting(self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionStatus {
    pub is_connected: bool,
    pub is_connecting: bool,
}

impl From<ConnectionState> for ConnectionStatus {
    fn from(state: ConnectionState) -> Self {
        Self {
            is_connected: state.is_connected(),
            is_connecting: state.is_connecting(),
        }
    }
}

/// Identity a connection was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub login_id: String,
    pub user_type: UserType,
}

/// What a [`Connector`] needs to open the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub url: String,
    pub identity: SessionIdentity,
}

/// An open connection. Closing it must not call back into [`SessionEvents`].
pub trait SessionLink {
    fn close(&mut self);
}

/// Opens the underlying transport. Resolves once the server acknowledged the
/// handshake; inbound traffic is reported through `events`.
pub trait Connector {
    fn open(
        &self,
        request: ConnectRequest,
        events: SessionEvents,
    ) -> LocalBoxFuture<'static, Result<Box<dyn SessionLink>, SessionError>>;
}

type ForceLogoutHandler = Rc<dyn Fn(ForceLogoutEvent)>;
type StateListener = Rc<dyn Fn(ConnectionStatus)>;

struct Inner {
    state: ConnectionState,
    identity: Option<SessionIdentity>,
    link: Option<Box<dyn SessionLink>>,
    // Bumped on every connect attempt and teardown; events from older links are dropped.
    generation: u64,
    on_force_logout: Option<ForceLogoutHandler>,
    on_state_change: Option<StateListener>,
    presence: HashMap<String, PresenceStatus>,
}

impl Inner {
    fn teardown(&mut self) -> Option<Box<dyn SessionLink>> {
        self.generation += 1;
        self.state = ConnectionState::Disconnected;
        self.identity = None;
        self.presence.clear();
        self.link.take()
    }
}

/// Process-wide realtime session. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SocketSession {
    socket_url: Rc<str>,
    connector: Rc<dyn Connector>,
    inner: Rc<RefCell<Inner>>,
}

impl SocketSession {
    pub fn new(socket_url: impl Into<String>, connector: Rc<dyn Connector>) -> Self {
        let socket_url: String = socket_url.into();
        Self {
            socket_url: socket_url.into(),
            connector,
            inner: Rc::new(RefCell::new(Inner {
                state: ConnectionState::Disconnected,
                identity: None,
                link: None,
                generation: 0,
                on_force_logout: None,
                on_state_change: None,
                presence: HashMap::new(),
            })),
        }
    }

    /// Open the channel for `login_id` unless one is already open or opening.
    pub async fn connect(&self, login_id: &str, user_type: UserType) -> Result<(), SessionError> {
        let identity = SessionIdentity {
            login_id: login_id.to_string(),
            user_type,
        };

        let (request, events) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != ConnectionState::Disconnected {
                if inner.identity.as_ref() != Some(&identity) {
                    crate::log_warn!(
                        "session: connect for {} ignored, channel already held by {:?}",
                        identity.login_id,
                        inner.identity.as_ref().map(|i| i.login_id.as_str())
                    );
                }
                return Ok(());
            }
            let url = self.session_url(&identity)?;
            inner.generation += 1;
            inner.state = ConnectionState::Connecting;
            inner.identity = Some(identity.clone());
            let events = SessionEvents {
                inner: Rc::downgrade(&self.inner),
                generation: inner.generation,
            };
            (ConnectRequest { url, identity }, events)
        };
        notify(&self.inner);

        let generation = events.generation;
        crate::log_info!(
            "session: connecting as {} ({})",
            request.identity.login_id,
            request.identity.user_type
        );

        let mut guard = HandshakeGuard {
            inner: Rc::downgrade(&self.inner),
            generation,
            armed: true,
        };
        let opened = self.connector.open(request, events).await;
        guard.armed = false;

        let stale = {
            let mut inner = self.inner.borrow_mut();
            let current =
                inner.generation == generation && inner.state == ConnectionState::Connecting;
            match opened {
                Ok(link) if current => {
                    inner.link = Some(link);
                    inner.state = ConnectionState::Connected;
                    None
                }
                Ok(link) => Some(link),
                Err(e) => {
                    if current {
                        inner.state = ConnectionState::Disconnected;
                        inner.identity = None;
                    }
                    drop(inner);
                    notify(&self.inner);
                    crate::log_warn!("session: connect failed: {}", e);
                    return Err(e);
                }
            }
        };

        match stale {
            None => {
                notify(&self.inner);
                crate::log_info!("session: connected");
                Ok(())
            }
            // Torn down while the handshake was in flight.
            Some(mut link) => {
                link.close();
                Err(SessionError::ClosedDuringHandshake)
            }
        }
    }

    /// Close the live connection, if any.
    pub fn disconnect(&self) {
        let link = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == ConnectionState::Disconnected && inner.link.is_none() {
                return;
            }
            inner.teardown()
        };
        if let Some(mut link) = link {
            link.close();
        }
        notify(&self.inner);
        crate::log_info!("session: disconnected");
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.borrow().state
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.state().into()
    }

    pub fn identity(&self) -> Option<SessionIdentity> {
        self.inner.borrow().identity.clone()
    }

    /// Replace the forced-logout handler. Registering a no-op detaches.
    pub fn on_force_logout(&self, handler: impl Fn(ForceLogoutEvent) + 'static) {
        self.inner.borrow_mut().on_force_logout = Some(Rc::new(handler));
    }

    pub fn clear_force_logout(&self) {
        self.inner.borrow_mut().on_force_logout = None;
    }

    /// Replace the listener told about every status transition.
    pub fn on_state_change(&self, listener: impl Fn(ConnectionStatus) + 'static) {
        self.inner.borrow_mut().on_state_change = Some(Rc::new(listener));
    }

    /// Last presence broadcast seen for `user_id` on the current connection.
    pub fn presence(&self, user_id: &str) -> Option<PresenceStatus> {
        self.inner.borrow().presence.get(user_id).copied()
    }

    fn session_url(&self, identity: &SessionIdentity) -> Result<String, SessionError> {
        let mut url = url::Url::parse(&self.socket_url)
            .map_err(|e| SessionError::Connect(format!("invalid socket url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("loginId", &identity.login_id)
            .append_pair("userType", identity.user_type.as_str());
        Ok(url.into())
    }
}

fn notify(inner: &Rc<RefCell<Inner>>) {
    let (listener, status) = {
        let inner = inner.borrow();
        (inner.on_state_change.clone(), ConnectionStatus::from(inner.state))
    };
    if let Some(listener) = listener {
        listener(status);
    }
}

// Resets `Connecting` if the connect future is dropped mid-handshake.
struct HandshakeGuard {
    inner: Weak<RefCell<Inner>>,
    generation: u64,
    armed: bool,
}

impl Drop for HandshakeGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let reset = {
            let mut state = inner.borrow_mut();
            if state.generation == self.generation && state.state == ConnectionState::Connecting {
                state.teardown();
                true
            } else {
                false
            }
        };
        if reset {
            notify(&inner);
        }
    }
}

/// Sink a [`Connector`] reports inbound traffic to.
///
/// Bound to one connect attempt; once the session moves on, calls are ignored.
#[derive(Clone)]
pub struct SessionEvents {
    inner: Weak<RefCell<Inner>>,
    generation: u64,
}

impl SessionEvents {
    pub fn dispatch(&self, event: ServerEvent) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        match event {
            ServerEvent::UserLoginStatus { user_id, status } => {
                let mut state = inner.borrow_mut();
                if state.generation == self.generation {
                    state.presence.insert(user_id, status);
                }
            }
            ServerEvent::ForceLogout(event) => {
                let (handler, link) = {
                    let mut state = inner.borrow_mut();
                    if state.generation != self.generation {
                        return;
                    }
                    let link = state.teardown();
                    (state.on_force_logout.clone(), link)
                };
                crate::log_warn!("session: forced logout: {}", event.reason);
                if let Some(mut link) = link {
                    link.close();
                }
                notify(&inner);
                if let Some(handler) = handler {
                    handler(event);
                }
            }
        }
    }

    /// Parse and dispatch one text frame.
    pub fn dispatch_text(&self, text: &str) {
        match ServerEvent::parse(text) {
            Ok(Some(event)) => self.dispatch(event),
            Ok(None) => crate::log_debug!("session: ignoring frame {}", text),
            Err(e) => crate::log_warn!("session: unreadable frame: {}", e),
        }
    }

    /// The transport closed on its own.
    pub fn closed(&self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let link = {
            let mut state = inner.borrow_mut();
            if state.generation != self.generation || state.state == ConnectionState::Disconnected
            {
                return;
            }
            state.teardown()
        };
        drop(link);
        notify(&inner);
        crate::log_info!("session: socket closed by peer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures::executor::block_on;
    use futures::future::join;
    use wagerdesk_shared::PresenceStatus;

    /// Pending once, then ready; lets a second caller run mid-handshake.
    #[derive(Default)]
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();
        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    struct TestLink(Rc<Cell<usize>>);

    impl SessionLink for TestLink {
        fn close(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[derive(Clone, Default)]
    struct ScriptedConnector {
        opened: Rc<Cell<usize>>,
        closed: Rc<Cell<usize>>,
        fail: bool,
        requests: Rc<RefCell<Vec<ConnectRequest>>>,
        events: Rc<RefCell<Vec<SessionEvents>>>,
    }

    impl Connector for ScriptedConnector {
        fn open(
            &self,
            request: ConnectRequest,
            events: SessionEvents,
        ) -> LocalBoxFuture<'static, Result<Box<dyn SessionLink>, SessionError>> {
            self.opened.set(self.opened.get() + 1);
            self.requests.borrow_mut().push(request);
            self.events.borrow_mut().push(events);
            let fail = self.fail;
            let closed = self.closed.clone();
            Box::pin(async move {
                YieldOnce::default().await;
                if fail {
                    Err(SessionError::Connect("refused".to_string()))
                } else {
                    Ok(Box::new(TestLink(closed)) as Box<dyn SessionLink>)
                }
            })
        }
    }

    fn session(connector: &ScriptedConnector) -> SocketSession {
        SocketSession::new("ws://localhost:5000/session", Rc::new(connector.clone()))
    }

    #[test]
    fn concurrent_connects_open_one_connection() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);

        let first = session.connect("master01", UserType::Master);
        let second = session.connect("master01", UserType::Master);
        let (a, b) = block_on(join(first, second));

        assert_eq!(a, Ok(()));
        assert_eq!(b, Ok(()));
        assert_eq!(connector.opened.get(), 1);
        assert_eq!(session.state(), ConnectionState::Connected);
    }

    #[test]
    fn connect_when_connected_is_a_no_op() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        block_on(session.connect("master01", UserType::Master)).unwrap();
        block_on(session.connect("master01", UserType::Master)).unwrap();
        assert_eq!(connector.opened.get(), 1);
    }

    #[test]
    fn request_carries_identity_in_query() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        block_on(session.connect("master01", UserType::Master)).unwrap();
        let requests = connector.requests.borrow();
        assert_eq!(
            requests[0].url,
            "ws://localhost:5000/session?loginId=master01&userType=master"
        );
        assert_eq!(
            session.identity(),
            Some(SessionIdentity {
                login_id: "master01".to_string(),
                user_type: UserType::Master
            })
        );
    }

    #[test]
    fn status_is_read_without_connecting() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        assert_eq!(session.connection_status(), ConnectionStatus::default());
        assert_eq!(connector.opened.get(), 0);
    }

    #[test]
    fn failed_connect_returns_to_disconnected() {
        let connector = ScriptedConnector {
            fail: true,
            ..Default::default()
        };
        let session = session(&connector);
        let result = block_on(session.connect("agent7", UserType::Agent));
        assert_eq!(result, Err(SessionError::Connect("refused".to_string())));
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(session.identity(), None);
    }

    #[test]
    fn force_logout_invokes_handler_and_tears_down() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        let received = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = received.clone();
        session.on_force_logout(move |event| sink.borrow_mut().push(event.reason));

        block_on(session.connect("master01", UserType::Master)).unwrap();
        let events = connector.events.borrow()[0].clone();
        events.dispatch_text(r#"{"event":"forceLogout","data":{"reason":"duplicate session"}}"#);

        assert_eq!(received.borrow().as_slice(), ["duplicate session".to_string()]);
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(connector.closed.get(), 1);
    }

    #[test]
    fn re_registering_replaces_the_handler() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        session.on_force_logout(move |_| counter.set(counter.get() + 1));
        session.on_force_logout(|_| {});

        block_on(session.connect("master01", UserType::Master)).unwrap();
        let events = connector.events.borrow()[0].clone();
        events.dispatch(ServerEvent::ForceLogout(ForceLogoutEvent {
            reason: "kicked".to_string(),
        }));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn events_from_a_previous_connection_are_ignored() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        session.on_force_logout(move |_| counter.set(counter.get() + 1));

        block_on(session.connect("master01", UserType::Master)).unwrap();
        session.disconnect();
        block_on(session.connect("master01", UserType::Master)).unwrap();

        let old = connector.events.borrow()[0].clone();
        old.dispatch(ServerEvent::ForceLogout(ForceLogoutEvent {
            reason: "stale".to_string(),
        }));
        old.closed();
        assert_eq!(hits.get(), 0);
        assert_eq!(session.state(), ConnectionState::Connected);
    }

    #[test]
    fn presence_updates_are_tracked_per_connection() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        block_on(session.connect("master01", UserType::Master)).unwrap();
        let events = connector.events.borrow()[0].clone();
        events.dispatch_text(r#"{"event":"userLoginStatus","data":{"userId":"u1","status":true}}"#);
        events.dispatch_text(r#"{"event":"userLoginStatus","data":{"userId":"u2","status":false}}"#);

        assert_eq!(session.presence("u1"), Some(PresenceStatus::Online));
        assert_eq!(session.presence("u2"), Some(PresenceStatus::Offline));
        assert_eq!(session.presence("u3"), None);

        session.disconnect();
        assert_eq!(session.presence("u1"), None);
    }

    #[test]
    fn peer_close_allows_reconnect() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        block_on(session.connect("master01", UserType::Master)).unwrap();
        connector.events.borrow()[0].clone().closed();
        assert_eq!(session.state(), ConnectionState::Disconnected);

        block_on(session.connect("master01", UserType::Master)).unwrap();
        assert_eq!(connector.opened.get(), 2);
    }

    #[test]
    fn disconnect_during_handshake_discards_the_link() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        let mut connecting = Box::pin(session.connect("master01", UserType::Master));
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        assert!(connecting.as_mut().poll(&mut cx).is_pending());

        session.disconnect();
        assert_eq!(session.state(), ConnectionState::Disconnected);

        let result = block_on(connecting);
        assert_eq!(result, Err(SessionError::ClosedDuringHandshake));
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(connector.closed.get(), 1);
    }

    #[test]
    fn dropped_connect_future_resets_state() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        {
            let mut pending = Box::pin(session.connect("master01", UserType::Master));
            let waker = futures::task::noop_waker();
            let mut cx = Context::from_waker(&waker);
            assert!(pending.as_mut().poll(&mut cx).is_pending());
            assert_eq!(session.state(), ConnectionState::Connecting);
        }
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn state_listener_sees_transitions() {
        let connector = ScriptedConnector::default();
        let session = session(&connector);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.on_state_change(move |status| sink.borrow_mut().push(status));

        block_on(session.connect("master01", UserType::Master)).unwrap();
        session.disconnect();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].is_connecting);
        assert!(seen[1].is_connected);
        assert_eq!(seen[2], ConnectionStatus::default());
    }
}

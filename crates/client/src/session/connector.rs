//! Platform transports for the session channel.
//!
//! The browser build drives `web_sys::WebSocket` through JS callbacks; the
//! desktop build runs tokio-tungstenite on a UI-thread task. Both resolve
//! `open` only after the socket is open, and never reconnect on their own:
//! a new connection is only opened when a route gate asks for one.

use futures_util::future::LocalBoxFuture;
use wagerdesk_shared::SessionError;

use super::{ConnectRequest, Connector, SessionEvents, SessionLink};

/// Milliseconds to wait for the socket to open.
pub const HANDSHAKE_TIMEOUT_MS: u32 = 5_000;

/// Production connector used by [`SessionProvider`](super::SessionProvider).
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

impl Connector for WsConnector {
    fn open(
        &self,
        request: ConnectRequest,
        events: SessionEvents,
    ) -> LocalBoxFuture<'static, Result<Box<dyn SessionLink>, SessionError>> {
        Box::pin(platform::open(request.url, events))
    }
}

#[cfg(target_arch = "wasm32")]
mod platform {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{js_sys, CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

    use super::{SessionError, SessionEvents, SessionLink, HANDSHAKE_TIMEOUT_MS};
    use crate::timer::sleep_ms;

    const POLL_MS: u32 = 10;

    /// Open socket plus the callbacks it calls into.
    struct BrowserLink {
        ws: WebSocket,
        _on_message: Closure<dyn FnMut(MessageEvent)>,
        _on_close: Closure<dyn FnMut(CloseEvent)>,
        _on_error: Closure<dyn FnMut(ErrorEvent)>,
    }

    impl SessionLink for BrowserLink {
        fn close(&mut self) {
            self.ws.set_onmessage(None);
            self.ws.set_onclose(None);
            self.ws.set_onerror(None);
            if let Err(e) = self.ws.close() {
                crate::log_warn!("session: close failed: {:?}", e);
            }
        }
    }

    impl Drop for BrowserLink {
        fn drop(&mut self) {
            // Callbacks are freed with the link; JS must not call them afterwards.
            self.ws.set_onopen(None);
            self.ws.set_onmessage(None);
            self.ws.set_onclose(None);
            self.ws.set_onerror(None);
        }
    }

    pub(super) async fn open(
        url: String,
        events: SessionEvents,
    ) -> Result<Box<dyn SessionLink>, SessionError> {
        let ws = WebSocket::new(&url)
            .map_err(|e| SessionError::Connect(format!("failed to create socket: {e:?}")))?;

        let opened = Rc::new(RefCell::new(false));
        let failure = Rc::new(RefCell::new(None::<String>));

        let opened_flag = opened.clone();
        let on_open = Closure::wrap(Box::new(move |_: Event| {
            *opened_flag.borrow_mut() = true;
        }) as Box<dyn FnMut(Event)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let message_events = events.clone();
        let on_message = Closure::wrap(Box::new(move |e: MessageEvent| {
            if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
                let text: String = text.into();
                message_events.dispatch_text(&text);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let close_failure = failure.clone();
        let close_opened = opened.clone();
        let close_events = events.clone();
        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            let reason = if e.reason().is_empty() {
                format!("code {}", e.code())
            } else {
                e.reason()
            };
            if *close_opened.borrow() {
                crate::log_info!("session: socket closed: {}", reason);
                close_events.closed();
            } else {
                *close_failure.borrow_mut() = Some(reason);
            }
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let error_failure = failure.clone();
        let on_error = Closure::wrap(Box::new(move |_: ErrorEvent| {
            crate::log_error!("session: socket error");
            error_failure
                .borrow_mut()
                .get_or_insert_with(|| "socket error".to_string());
        }) as Box<dyn FnMut(ErrorEvent)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let link = BrowserLink {
            ws,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        };

        let mut waited = 0;
        while waited < HANDSHAKE_TIMEOUT_MS {
            if *opened.borrow() {
                link.ws.set_onopen(None);
                drop(on_open);
                return Ok(Box::new(link));
            }
            if let Some(reason) = failure.borrow().clone() {
                return Err(SessionError::Connect(reason));
            }
            sleep_ms(POLL_MS).await;
            waited += POLL_MS;
        }

        let mut link = link;
        link.close();
        Err(SessionError::Connect("handshake timed out".to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use std::time::Duration;

    use futures_channel::oneshot;
    use futures_util::{SinkExt, StreamExt};
    use tokio_tungstenite::{connect_async, tungstenite::Message};

    use super::{SessionError, SessionEvents, SessionLink, HANDSHAKE_TIMEOUT_MS};

    struct NativeLink {
        close_tx: Option<oneshot::Sender<()>>,
    }

    impl SessionLink for NativeLink {
        fn close(&mut self) {
            if let Some(tx) = self.close_tx.take() {
                let _ = tx.send(());
            }
        }
    }

    pub(super) async fn open(
        url: String,
        events: SessionEvents,
    ) -> Result<Box<dyn SessionLink>, SessionError> {
        let timeout = Duration::from_millis(u64::from(HANDSHAKE_TIMEOUT_MS));
        let (stream, _response) = tokio::time::timeout(timeout, connect_async(url.as_str()))
            .await
            .map_err(|_| SessionError::Connect("handshake timed out".to_string()))?
            .map_err(|e| SessionError::Connect(e.to_string()))?;

        let (mut write, mut read) = stream.split();
        let (close_tx, mut close_rx) = oneshot::channel::<()>();

        // SessionEvents is tied to the UI thread, so the reader runs there too.
        dioxus::dioxus_core::spawn_forever(async move {
            loop {
                tokio::select! {
                    _ = &mut close_rx => {
                        let _ = write.close().await;
                        return;
                    }
                    frame = read.next() => match frame {
                        Some(Ok(Message::Text(text))) => events.dispatch_text(text.as_str()),
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            crate::log_error!("session: read error: {}", e);
                            break;
                        }
                    },
                }
            }
            events.closed();
        });

        Ok(Box::new(NativeLink {
            close_tx: Some(close_tx),
        }))
    }
}

//! HTTP bridge between the engine and the panel.
//!
//! The engine (or a relay in front of its websocket) talks to the panel
//! over plain HTTP:
//!
//! | Method | Path               | Description                           |
//! |--------|--------------------|---------------------------------------|
//! | POST   | `/engine/message`  | Push one engine message (JSON body)   |
//! | GET    | `/engine/outbound` | Drain queued panel->engine messages   |
//! | GET    | `/engine/health`   | Health check                          |
//!
//! rouille runs the server on a background thread; messages cross to the
//! egui thread over the [`EngineLink`] channel pair. CORS is wide open so
//! browser-hosted relays can reach the bridge.

use std::thread;

use rouille::{Request, Response};
use serde::Serialize;

use crate::remote::link::{EngineLink, EngineRemote};
use crate::remote::msg::InboundMsg;

/// Generic bridge response body.
#[derive(Serialize)]
struct BridgeResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl BridgeResponse {
    fn ok() -> Self {
        Self { success: true, message: None, error: None }
    }

    fn ok_msg(msg: &str) -> Self {
        Self { success: true, message: Some(msg.to_string()), error: None }
    }

    fn err(msg: &str) -> Self {
        Self { success: false, message: None, error: Some(msg.to_string()) }
    }
}

/// HTTP bridge runner.
pub struct EngineBridge {
    port: u16,
    remote: EngineRemote,
}

impl EngineBridge {
    /// Start the bridge on a background thread and hand back the UI-side
    /// link.
    pub fn start(port: u16) -> EngineLink {
        let (link, remote) = EngineLink::pair();
        let bridge = EngineBridge { port, remote };
        thread::spawn(move || bridge.run());
        link
    }

    fn run(self) {
        let addr = format!("0.0.0.0:{}", self.port);
        log::info!("engine bridge listening on http://{}", addr);

        let remote = self.remote;
        rouille::start_server(&addr, move |request| Self::handle_request(request, &remote));
    }

    fn handle_request(request: &Request, remote: &EngineRemote) -> Response {
        if request.method() == "OPTIONS" {
            return Response::empty_204()
                .with_additional_header("Access-Control-Allow-Origin", "*")
                .with_additional_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
                .with_additional_header("Access-Control-Allow-Headers", "Content-Type");
        }

        let response = rouille::router!(request,
            (POST) ["/engine/message"] => {
                Self::handle_message(request, remote)
            },

            (GET) ["/engine/outbound"] => {
                // Everything the panel queued since the last poll
                let queued: Vec<_> = remote.out_rx.try_iter().collect();
                Response::json(&queued)
            },

            (GET) ["/engine/health"] => {
                Response::json(&BridgeResponse::ok_msg("demoscope engine bridge"))
            },

            _ => {
                Response::json(&BridgeResponse::err("Not found")).with_status_code(404)
            }
        );

        response.with_additional_header("Access-Control-Allow-Origin", "*")
    }

    fn handle_message(request: &Request, remote: &EngineRemote) -> Response {
        let msg: InboundMsg = match rouille::input::json_input(request) {
            Ok(msg) => msg,
            Err(e) => {
                log::warn!("rejected engine message: {e}");
                return Response::json(&BridgeResponse::err("Invalid message body"))
                    .with_status_code(400);
            }
        };
        if remote.in_tx.send(msg).is_err() {
            // UI side shut down; report it so the relay can back off
            return Response::json(&BridgeResponse::err("Panel is shutting down"))
                .with_status_code(503);
        }
        Response::json(&BridgeResponse::ok())
    }
}

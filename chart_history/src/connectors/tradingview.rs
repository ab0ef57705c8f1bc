// @file: chart_history/src/connectors/tradingview.rs
// @description: WebSocket transport for the chart data socket (tokio-tungstenite).
// @author: LAS.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use log::debug;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;
use crate::core::errors::FetchError;
use crate::core::interfaces::{Connector, TransportEvent, TransportSession};
use crate::core::models::Endpoint;


type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;


//
// CONNECTOR
//

#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn open(&self, endpoint: &Endpoint) -> Result<Box<dyn TransportSession>, FetchError> {
        // #1. Validate before dialing
        let url: Url = Url::parse(&endpoint.url)
            .map_err(|e| FetchError::Transport(format!("URL Parse Error: {}", e)))?;

        // #2. The service rejects handshakes without its own Origin
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let origin = HeaderValue::from_str(&endpoint.origin)
            .map_err(|e| FetchError::Transport(format!("Invalid origin header: {}", e)))?;
        request.headers_mut().insert("Origin", origin);

        debug!("Connecting to {}", url);

        let (stream, _) = connect_async(request)
            .await
            .map_err(|e| FetchError::Transport(format!("Connection failed: {}", e)))?;

        Ok(Box::new(WsTransport { stream }))
    }
}


//
// SESSION
//

pub struct WsTransport {
    stream: WsStream,
}

#[async_trait]
impl TransportSession for WsTransport {
    async fn send_text(&mut self, text: String) -> Result<(), FetchError> {
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    async fn next_event(&mut self) -> TransportEvent {
        while let Some(msg) = self.stream.next().await {
            match msg {
                Ok(Message::Text(text)) => return TransportEvent::Text(text),
                Ok(Message::Binary(bytes)) => {
                    return TransportEvent::Text(String::from_utf8_lossy(&bytes).into_owned());
                }
                Ok(Message::Close(_)) => return TransportEvent::Closed,
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => {}
                Err(e) => return TransportEvent::Error(e.to_string()),
            }
        }
        TransportEvent::Closed
    }

    async fn close(&mut self) -> Result<(), FetchError> {
        self.stream
            .close(None)
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use grammarlite_core::{ClientMessage, EngineMessage, ErrorCode};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::DaemonConfig;
use crate::corrector::CorrectorRouter;
use crate::session::PageSession;

pub struct SuggestionServer {
    config: Arc<DaemonConfig>,
    corrector: Arc<CorrectorRouter>,
}

impl SuggestionServer {
    pub fn new(config: DaemonConfig, corrector: CorrectorRouter) -> Self {
        Self {
            config: Arc::new(config),
            corrector: Arc::new(corrector),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let socket_path = &self.config.server.socket_path;
        self.prepare_socket_path().await?;
        if socket_path.exists() {
            fs::remove_file(socket_path).await.with_context(|| {
                format!("failed to cleanup stale socket {}", socket_path.display())
            })?;
        }

        let listener = UnixListener::bind(socket_path).with_context(|| {
            format!("failed to bind unix socket at {}", socket_path.display())
        })?;
        info!("grammarlite daemon listening on {}", socket_path.display());

        loop {
            let (stream, _) = listener.accept().await?;
            let config = self.config.clone();
            let corrector = self.corrector.clone();
            tokio::spawn(async move {
                if let Err(error) = handle_connection(stream, config, corrector).await {
                    warn!("connection closed with error: {error:#}");
                }
            });
        }
    }

    async fn prepare_socket_path(&self) -> Result<()> {
        if let Some(parent) = Path::new(&self.config.server.socket_path).parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create socket directory {}", parent.display())
            })?;
        }
        Ok(())
    }
}

async fn handle_connection(
    stream: UnixStream,
    config: Arc<DaemonConfig>,
    corrector: Arc<CorrectorRouter>,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<EngineMessage>();
    let (inbound_tx, inbound_rx) = mpsc::channel::<ClientMessage>(64);
    let session = PageSession::new(&config, corrector, outbound_tx.clone());
    let session_task = tokio::spawn(session.run(inbound_rx));
    info!("page connected");

    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            let mut payload = serde_json::to_string(&message)?;
            payload.push('\n');
            writer.write_all(payload.as_bytes()).await?;
        }
        anyhow::Ok(())
    });

    let outcome = async {
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Ok(message) => {
                    let unload = matches!(message, ClientMessage::Unload);
                    if inbound_tx.send(message).await.is_err() || unload {
                        break;
                    }
                }
                Err(reply) => {
                    let _ = outbound_tx.send(reply);
                }
            }
        }
        anyhow::Ok(())
    }
    .await;

    drop(inbound_tx);
    drop(outbound_tx);
    session_task.await.context("page session panicked")?;
    writer_task.await.context("writer task panicked")??;
    info!("page disconnected");
    outcome
}

fn parse_line(line: &str) -> std::result::Result<ClientMessage, EngineMessage> {
    serde_json::from_str::<ClientMessage>(line).map_err(|error| {
        error!("invalid client message: {error}");
        EngineMessage::Error {
            code: ErrorCode::InvalidRequest,
            message: format!("invalid JSON payload: {error}"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::config::CheckConfig;

    #[test]
    fn parses_client_line() {
        let message = parse_line(r#"{"type":"overlay_click","field_id":"essay"}"#).unwrap();
        assert!(matches!(
            message,
            ClientMessage::OverlayClick { field_id } if field_id == "essay"
        ));
    }

    #[test]
    fn malformed_line_yields_error_reply() {
        match parse_line("{not json") {
            Err(EngineMessage::Error { code, message }) => {
                assert_eq!(code, ErrorCode::InvalidRequest);
                assert!(message.starts_with("invalid JSON payload"));
            }
            other => panic!("unexpected parse result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn serves_jsonl_over_socket() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut config = DaemonConfig::default();
        config.server.socket_path =
            std::env::temp_dir().join(format!("grammarlite-test-{nanos}.sock"));
        let socket_path = config.server.socket_path.clone();

        let corrector = CorrectorRouter::new(
            &config.backend,
            &CheckConfig {
                enable: false,
                ..CheckConfig::default()
            },
        )
        .unwrap();
        let server = SuggestionServer::new(config, corrector);
        let server_task = tokio::spawn(async move { server.run().await });

        let mut stream = None;
        for _ in 0..50 {
            if let Ok(connected) = UnixStream::connect(&socket_path).await {
                stream = Some(connected);
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        let stream = stream.expect("daemon never started listening");
        let (reader, mut writer) = stream.into_split();
        let mut replies = BufReader::new(reader).lines();

        writer.write_all(b"{\"type\":\"ping\"}\n").await.unwrap();
        let pong: EngineMessage =
            serde_json::from_str(&replies.next_line().await.unwrap().unwrap()).unwrap();
        assert_eq!(pong, EngineMessage::Pong);

        writer.write_all(b"garbage\n").await.unwrap();
        let error: EngineMessage =
            serde_json::from_str(&replies.next_line().await.unwrap().unwrap()).unwrap();
        assert!(matches!(error, EngineMessage::Error { .. }));

        server_task.abort();
        let _ = std::fs::remove_file(&socket_path);
    }
}

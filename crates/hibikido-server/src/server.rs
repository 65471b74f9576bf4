use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::Notify;
use tracing::{error, info, instrument, warn};

use hibikido_compose::Composer;
use hibikido_embed::EmbeddingProvider;
use hibikido_index::VectorIndex;
use hibikido_orchestrator::Orchestrator;
use hibikido_retrieval::RetrievalEngine;
use hibikido_store::{DocumentStore, InMemoryBackend, StoreBackend};

use crate::commands::{self, Outcome};
use crate::config::{HibikidoConfig, MongoConfig};
use crate::error::ServerError;
use crate::state::ServerState;
use crate::transport;

#[cfg(feature = "mongo")]
fn build_backend(config: &MongoConfig) -> anyhow::Result<Box<dyn StoreBackend>> {
    if config.uri.is_empty() {
        Ok(Box::new(InMemoryBackend::new()))
    } else {
        let backend = hibikido_store::MongoBackend::connect(&config.uri, &config.database)
            .map_err(|e| anyhow::anyhow!("mongodb connection failed: {e}"))?;
        Ok(Box::new(backend))
    }
}

#[cfg(not(feature = "mongo"))]
fn build_backend(_config: &MongoConfig) -> anyhow::Result<Box<dyn StoreBackend>> {
    Ok(Box::new(InMemoryBackend::new()))
}

fn build_index(index_path: &PathBuf, dim: usize) -> anyhow::Result<VectorIndex> {
    if index_path.exists() {
        VectorIndex::load(index_path, dim).map_err(|e| anyhow::anyhow!("failed to load vector index: {e}"))
    } else {
        Ok(VectorIndex::new(dim))
    }
}

/// Constructs store -> index -> engine -> orchestrator -> transport in
/// that dependency order (spec.md §9), then runs the inbound command
/// loop and the periodic tick driver until `/stop` or a signal arrives.
/// Exits 0 on a clean `/stop`; returns `Err` on any startup failure
/// (store unreachable, model unavailable, socket bind failure), which
/// `main` turns into a non-zero exit code.
pub async fn run(config: HibikidoConfig) -> anyhow::Result<()> {
    let backend = build_backend(&config.mongodb)?;
    let store = Arc::new(DocumentStore::new(backend));

    let index_path = PathBuf::from(&config.embedding.index_file);
    let index = Arc::new(build_index(&index_path, config.embedding.dim)?);

    let embedder: Arc<dyn EmbeddingProvider> = Arc::from(
        hibikido_embed::build_provider(&config.embedding)
            .map_err(|e| anyhow::anyhow!("embedding provider unavailable: {e}"))?,
    );

    let engine = Arc::new(RetrievalEngine::new(
        store,
        index,
        embedder,
        Composer::default(),
    ));
    let orchestrator = Arc::new(Orchestrator::with_system_clock(config.orchestrator));
    let state = ServerState::new(engine, orchestrator, config.search);

    let listen_addr: SocketAddr = format!("{}:{}", config.osc.listen_ip, config.osc.listen_port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen address: {e}"))?;
    let send_addr: SocketAddr = format!("{}:{}", config.osc.send_ip, config.osc.send_port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid send address: {e}"))?;
    let socket = Arc::new(
        UdpSocket::bind(listen_addr)
            .await
            .map_err(|e| anyhow::anyhow!("failed to bind {listen_addr}: {e}"))?,
    );
    info!(%listen_addr, %send_addr, "hibikido listening");

    let shutdown = Arc::new(Notify::new());
    let tick_interval = Duration::from_secs_f64(config.orchestrator.tick_interval_seconds.max(0.001));

    let tick_task = tokio::spawn(run_tick_loop(
        state.clone(),
        socket.clone(),
        send_addr,
        tick_interval,
        shutdown.clone(),
    ));

    run_inbound_loop(state.clone(), socket, send_addr, shutdown).await?;
    tick_task.await.map_err(|e| anyhow::anyhow!("tick task panicked: {e}"))?;

    state
        .engine
        .index()
        .save(&index_path)
        .map_err(|e| anyhow::anyhow!("failed to persist vector index: {e}"))?;
    info!("hibikido shut down cleanly");
    Ok(())
}

async fn run_tick_loop(
    state: ServerState,
    socket: Arc<UdpSocket>,
    send_addr: SocketAddr,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) {
    let mut ticker = tokio::time::interval(tick_interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for admission in state.orchestrator.tick() {
                    send(&socket, send_addr, transport::encode_admission(&state, &admission)).await;
                }
            }
            _ = shutdown.notified() => break,
        }
    }
}

#[instrument(skip(state, socket))]
async fn run_inbound_loop(
    state: ServerState,
    socket: Arc<UdpSocket>,
    send_addr: SocketAddr,
    shutdown: Arc<Notify>,
) -> anyhow::Result<()> {
    let mut buf = vec![0u8; 65_536];
    loop {
        let (len, _from) = socket
            .recv_from(&mut buf)
            .await
            .map_err(|e| anyhow::anyhow!("inbound socket error: {e}"))?;

        match process_datagram(&state, &buf[..len]) {
            Ok(Outcome::Confirm(message)) => send(&socket, send_addr, transport::encode_confirm(&message)).await,
            Ok(Outcome::Stats(stats)) => send(&socket, send_addr, transport::encode_stats_result(stats)).await,
            Ok(Outcome::Stop) => {
                send(&socket, send_addr, transport::encode_confirm("stopping")).await;
                shutdown.notify_waiters();
                return Ok(());
            }
            Err(err) => {
                warn!(error = %err, "command failed");
                send(&socket, send_addr, transport::encode_error(&err)).await;
            }
        }
    }
}

fn process_datagram(state: &ServerState, buf: &[u8]) -> Result<Outcome, ServerError> {
    let message = transport::decode_packet(buf)?;
    let command = commands::decode(&message)?;
    commands::handle(state, command)
}

async fn send(socket: &UdpSocket, addr: SocketAddr, encoded: Result<Vec<u8>, ServerError>) {
    match encoded {
        Ok(bytes) => {
            if let Err(e) = socket.send_to(&bytes, addr).await {
                error!(error = %e, %addr, "failed to send OSC packet");
            }
        }
        Err(e) => error!(error = %e, "failed to encode outbound OSC packet"),
    }
}

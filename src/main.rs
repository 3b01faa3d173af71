//! Verdict HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use verdict::attest::{AttestationSigner, KeyCustodian};
use verdict::cascade::MatchCascade;
use verdict::config::Config;
use verdict::embedding::{EncoderConfig, TextEncoder};
use verdict::gateway::{HandlerState, create_router};
use verdict::policy::EscalationPolicy;
use verdict::reasoning::{GenaiReasoner, ReasoningOracle};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██╗   ██╗███████╗██████╗ ██████╗ ██╗ ██████╗████████╗
██║   ██║██╔════╝██╔══██╗██╔══██╗██║██╔════╝╚══██╔══╝
██║   ██║█████╗  ██████╔╝██║  ██║██║██║        ██║
╚██╗ ██╔╝██╔══╝  ██╔══██╗██║  ██║██║██║        ██║
 ╚████╔╝ ███████╗██║  ██║██████╔╝██║╚██████╗   ██║
  ╚═══╝  ╚══════╝╚═╝  ╚═╝╚═════╝ ╚═╝ ╚═════╝   ╚═╝

        MATCH. ESCALATE. ATTEST.
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        threshold = config.default_threshold,
        "Verdict starting"
    );

    let encoder_config = if let Some(dir) = &config.model_dir {
        EncoderConfig::new(dir.clone())
    } else {
        tracing::warn!("No VERDICT_MODEL_DIR configured, running encoder in stub mode");
        EncoderConfig::stub()
    };
    let encoder = TextEncoder::load(encoder_config)?;

    let signer = match KeyCustodian::load_or_create(&config.key_path) {
        Ok(custodian) => {
            tracing::info!(
                key_path = %config.key_path.display(),
                public_key = %custodian.public_key_base64(),
                "Attestation key ready"
            );
            AttestationSigner::new(Arc::new(custodian))
        }
        Err(e) => {
            tracing::error!("Failed to load signing key: {e}. Verdicts will be unsigned.");
            AttestationSigner::disabled()
        }
    };

    let reasoner = GenaiReasoner::new(config.reasoning_config());
    if !reasoner.is_available() {
        tracing::warn!("Remote reasoning disabled, ambiguous scores use the local fallback");
    }

    let cascade = Arc::new(MatchCascade::new(
        encoder,
        reasoner,
        EscalationPolicy::new(config.policy_config()),
        config.cascade_config(),
    ));

    let state = HandlerState::new(cascade, Arc::new(signer));
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Verdict shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("VERDICT_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/health", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

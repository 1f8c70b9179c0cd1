//! Bootstrap sequencing.
//!
//! Startup runs three phases in order: validate configuration, connect the
//! persistence layer, then bind the listener. A failure in any phase is
//! logged and returned before anything is bound, so no request is ever
//! accepted without a working persistence layer.

mod config;

pub use config::{ServerSettings, SettingsError};

use std::fmt;
use std::io;
use std::net::SocketAddr;

use actix_web::dev::{Server, ServerHandle};
use actix_web::{HttpServer, web};
use tracing::{error, info};

use crate::domain::ports::{PersistenceConnectionError, PersistenceConnector};
use crate::inbound::http::{HttpState, Pipeline};
use crate::outbound::persistence::DieselPersistenceConnector;

/// Phase of the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    /// Loading and validating configuration.
    Config,
    /// Establishing the persistence layer.
    Connecting,
    /// Binding the listener.
    Serving,
}

impl fmt::Display for BootPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "config",
            Self::Connecting => "connecting",
            Self::Serving => "serving",
        })
    }
}

/// Startup failed; the listener was not bound.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] SettingsError),
    /// The persistence layer could not be reached.
    #[error(transparent)]
    Persistence(#[from] PersistenceConnectionError),
    /// The listener could not be bound.
    #[error("failed to bind listener: {0}")]
    Bind(#[source] io::Error),
}

impl StartupError {
    /// Phase in which startup failed.
    pub fn phase(&self) -> BootPhase {
        match self {
            Self::Config(_) => BootPhase::Config,
            Self::Persistence(_) => BootPhase::Connecting,
            Self::Bind(_) => BootPhase::Serving,
        }
    }
}

/// A bound, not yet awaited, HTTP server.
pub struct RunningServer {
    server: Server,
    addrs: Vec<SocketAddr>,
}

impl RunningServer {
    /// Addresses the listener is bound to.
    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    /// Handle for stopping the server.
    pub fn handle(&self) -> ServerHandle {
        self.server.handle()
    }

    /// Give up the server future, e.g. to spawn it.
    pub fn into_server(self) -> Server {
        self.server
    }

    /// Serve until the server stops.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the accept loop.
    pub async fn run(self) -> io::Result<()> {
        self.server.await
    }
}

/// Load configuration and start against PostgreSQL.
///
/// # Errors
///
/// Returns [`StartupError`] for the first failing phase.
pub async fn launch() -> Result<RunningServer, StartupError> {
    let loaded = ServerSettings::load().and_then(|settings| {
        let pool = settings.pool_config()?;
        Ok((settings, pool))
    });
    let (settings, pool) = match loaded {
        Ok(loaded) => loaded,
        Err(err) => return Err(report(err.into())),
    };
    start(&settings, &DieselPersistenceConnector::new(pool)).await
}

/// Run the bootstrap sequence with the given persistence connector.
///
/// # Errors
///
/// Returns [`StartupError`] for the first failing phase. The listener is
/// only bound after `connector` succeeds.
pub async fn start<C>(settings: &ServerSettings, connector: &C) -> Result<RunningServer, StartupError>
where
    C: PersistenceConnector + ?Sized,
{
    sequence(settings, connector).await.map_err(report)
}

async fn sequence<C>(settings: &ServerSettings, connector: &C) -> Result<RunningServer, StartupError>
where
    C: PersistenceConnector + ?Sized,
{
    settings.validate()?;

    let faqs = connector.connect().await?;
    let state = web::Data::new(HttpState::new(faqs));
    let pipeline = Pipeline::standard(settings.allowed_origin().map(str::to_owned));

    let server = HttpServer::new(move || pipeline.build(state.clone()))
        .workers(settings.workers())
        .bind((settings.host(), settings.port()))
        .map_err(StartupError::Bind)?;
    let addrs = server.addrs();
    let server = server.run();

    for addr in &addrs {
        info!(%addr, "server is running");
    }
    Ok(RunningServer { server, addrs })
}

fn report(err: StartupError) -> StartupError {
    error!(phase = %err.phase(), error = %err, "couldn't start the server");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn startup_errors_report_their_phase() {
        let config = StartupError::from(SettingsError::MissingDatabaseUrl);
        let persistence = StartupError::from(PersistenceConnectionError::new("refused"));
        let bind = StartupError::Bind(io::Error::from(io::ErrorKind::AddrInUse));

        assert_eq!(config.phase(), BootPhase::Config);
        assert_eq!(persistence.phase(), BootPhase::Connecting);
        assert_eq!(bind.phase(), BootPhase::Serving);
        assert_eq!(BootPhase::Connecting.to_string(), "connecting");
    }
}

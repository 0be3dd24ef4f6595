use std::{fmt, future::Future};

/// Signals that end the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Terminate,
    Interrupt,
}

impl fmt::Display for Shutdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shutdown::Terminate => f.write_str("SIGTERM"),
            Shutdown::Interrupt => f.write_str("SIGINT"),
        }
    }
}

/// Installs the handlers up front so a registration failure surfaces at
/// startup; the returned future resolves on the first signal.
#[cfg(unix)]
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = Shutdown>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    Ok(async move {
        tokio::select! {
            _ = sigterm.recv() => Shutdown::Terminate,
            _ = sigint.recv() => Shutdown::Interrupt,
        }
    })
}

/// Ctrl+C is the only termination signal outside unix.
#[cfg(not(unix))]
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = Shutdown>> {
    Ok(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("unable to listen for ctrl-c :: {e:?}");
            std::future::pending::<()>().await;
        }
        Shutdown::Interrupt
    })
}

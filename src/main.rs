use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jdsl::cancel::{self, CancelReason, Canceller};
use jdsl::cli::Cli;
use jdsl::runner;
use jdsl::transpiler::Transpiler;

/// Log filter used when `RUST_LOG` is unset. Quiet unless `--verbose`.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "jdsl=debug"
    } else {
        "jdsl=warn"
    }
}

/// Initialize tracing on stderr so run mode keeps stdout for the script.
fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let plan = cli.into_plan()?;

    let (canceller, signal) = cancel::channel();
    tokio::spawn(cancel_on_shutdown(canceller));

    // History reads and file writes are synchronous; keep them off the runtime.
    let options = plan.options.clone();
    let transpile_signal = signal.clone();
    tokio::task::spawn_blocking(move || {
        let transpiler = Transpiler::open(&options.root)?;
        transpiler.transpile(&options, &transpile_signal)
    })
    .await
    .context("transpile task failed")?
    .context("transpile error")?;

    if let Some((interpreter, script)) = plan.run {
        runner::run_script(&interpreter, &script, signal)
            .await
            .context("run error")?;
    }

    Ok(())
}

async fn cancel_on_shutdown(canceller: Canceller) {
    match shutdown_signal().await {
        Ok(reason) => {
            tracing::warn!("{}, stopping after the current unit", reason);
            canceller.cancel(reason);
        }
        Err(e) => tracing::error!("installing signal handlers: {}", e),
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<CancelReason> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    let name = tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    };
    Ok(CancelReason::Signal(name.to_string()))
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<CancelReason> {
    tokio::signal::ctrl_c().await?;
    Ok(CancelReason::Signal("Ctrl-C".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_logs_need_verbose() {
        assert_eq!(default_filter(false), "jdsl=warn");
        assert_eq!(default_filter(true), "jdsl=debug");
    }
}

//! Tick driver shared by the continuous modes.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::{Frame, Screen};

/// A presentation mode driven by [`run`].
pub trait Mode {
    /// Printed once before the first tick.
    fn banner(&self) -> Option<String> {
        None
    }

    /// Take a fresh snapshot and produce what to show for it.
    fn tick(&mut self) -> impl Future<Output = Frame>;
}

/// Run `mode` every `interval` until `shutdown` resolves.
///
/// Ticks never overlap: the next one starts `interval` after the previous
/// frame was drawn. Once `shutdown` fires no new tick starts, and a tick
/// still in flight is dropped along with any child processes it spawned.
pub async fn run<M, W, S>(
    mode: &mut M,
    screen: &mut Screen<W>,
    interval: Duration,
    shutdown: S,
) -> anyhow::Result<()>
where
    M: Mode,
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    if let Some(banner) = mode.banner() {
        screen.draw(&Frame::append(vec![banner]))?;
    }

    let mut ticks: u64 = 0;
    loop {
        let frame = tokio::select! {
            biased;
            _ = &mut shutdown => break,
            frame = mode.tick() => frame,
        };
        ticks += 1;
        screen.draw(&frame)?;

        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = sleep(interval) => {}
        }
    }

    debug!(ticks = ticks, "Interrupted, stopping");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        ticks: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl Mode for Counter {
        fn banner(&self) -> Option<String> {
            Some("counting".to_string())
        }

        async fn tick(&mut self) -> Frame {
            sleep(self.delay).await;
            let n = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
            Frame::append(vec![format!("tick {}", n)])
        }
    }

    fn counter(delay: Duration) -> (Counter, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        let mode = Counter {
            ticks: ticks.clone(),
            delay,
        };
        (mode, ticks)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_shutdown() {
        let (mut mode, ticks) = counter(Duration::ZERO);
        let mut screen = Screen::new(Vec::new(), false);

        // Ticks at t=0, 2, 4; shutdown at t=5 lands in the idle sleep.
        run(
            &mut mode,
            &mut screen,
            Duration::from_secs(2),
            sleep(Duration::from_secs(5)),
        )
        .await
        .unwrap();

        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        let out = String::from_utf8(screen.into_inner()).unwrap();
        assert_eq!(out, "counting\ntick 1\ntick 2\ntick 3\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_abandons_in_flight_tick() {
        let (mut mode, ticks) = counter(Duration::from_secs(10));
        let mut screen = Screen::new(Vec::new(), false);

        run(
            &mut mode,
            &mut screen,
            Duration::from_secs(1),
            sleep(Duration::from_secs(3)),
        )
        .await
        .unwrap();

        assert_eq!(ticks.load(Ordering::SeqCst), 0);
        let out = String::from_utf8(screen.into_inner()).unwrap();
        assert_eq!(out, "counting\n");
    }

    #[tokio::test]
    async fn test_immediate_shutdown_starts_no_tick() {
        let (mut mode, ticks) = counter(Duration::ZERO);
        let mut screen = Screen::new(Vec::new(), false);

        run(&mut mode, &mut screen, Duration::from_secs(1), async {})
            .await
            .unwrap();

        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{atomic::Ordering, Arc},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use scanbot::{Error, Scan};
use tracing::{debug, error, warn};

use crate::lidar::LidarCore;

/// Called from the scan thread with every completed sweep.
///
/// Errors and panics are logged and do not stop the scan. The next sweep starts only
/// after the callback returns, so it should not block.
pub type ScanCallback = Box<dyn FnMut(&Scan) -> Result<(), Error> + Send>;

/// How long `stop_continuous_scan` waits for the scan thread to exit.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// Handle to a running background scan thread.
#[derive(Debug)]
pub(crate) struct ContinuousScan {
    stop_sender: flume::Sender<()>,
    // Never sent on. The thread owns the sender and disconnects it when it exits.
    exit_receiver: flume::Receiver<()>,
    handle: JoinHandle<()>,
}

impl ContinuousScan {
    pub(crate) fn spawn(core: Arc<LidarCore>, callback: Option<ScanCallback>) -> Result<Self, Error> {
        let (stop_sender, stop_receiver) = flume::bounded(1);
        let (exit_sender, exit_receiver) = flume::bounded::<()>(0);
        let handle = thread::Builder::new()
            .name("scanbot-lidar".to_owned())
            .spawn(move || {
                let _exit_sender = exit_sender;
                run(&core, callback, &stop_receiver);
            })
            .context("failed to spawn the continuous scan thread")?;
        Ok(Self {
            stop_sender,
            exit_receiver,
            handle,
        })
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Raises the stop signal and waits up to `timeout` for the thread to exit.
    ///
    /// On timeout the thread is detached and [`Error::ShutdownTimeout`] is returned.
    pub(crate) fn stop(self, timeout: Duration) -> Result<(), Error> {
        // Full means a stop is already pending.
        let _ = self.stop_sender.try_send(());
        match self.exit_receiver.recv_timeout(timeout) {
            Err(flume::RecvTimeoutError::Timeout) => Err(Error::ShutdownTimeout { timeout }),
            _ => {
                self.join();
                Ok(())
            }
        }
    }

    pub(crate) fn join(self) {
        if self.handle.join().is_err() {
            error!("LIDAR: continuous scan thread panicked");
        }
    }
}

fn stop_requested(stop_receiver: &flume::Receiver<()>) -> bool {
    !matches!(stop_receiver.try_recv(), Err(flume::TryRecvError::Empty))
}

fn run(core: &LidarCore, mut callback: Option<ScanCallback>, stop_receiver: &flume::Receiver<()>) {
    while !stop_requested(stop_receiver) {
        let cycle_start = Instant::now();

        let scan = match core.get_scan() {
            Ok(scan) => Arc::new(scan),
            Err(e) => {
                error!("LIDAR: continuous scan aborted: {e}");
                break;
            }
        };
        let scan_index = core.scan_count.fetch_add(1, Ordering::Relaxed) + 1;
        *core.latest_scan.lock() = Some(scan.clone());
        debug!(
            scan_index,
            detected = scan.detected_count(),
            "LIDAR: completed scan"
        );

        if let Some(callback) = callback.as_mut() {
            if let Err(e) = invoke_callback(callback, &scan, scan_index) {
                warn!("{e}");
            }
        }

        let Some(remaining) = core.scan_period().checked_sub(cycle_start.elapsed()) else {
            continue;
        };
        if !matches!(
            stop_receiver.recv_timeout(remaining),
            Err(flume::RecvTimeoutError::Timeout)
        ) {
            break;
        }
    }
    debug!("LIDAR: continuous scan thread exiting");
}

fn invoke_callback(callback: &mut ScanCallback, scan: &Scan, scan_index: u64) -> Result<(), Error> {
    let message = match panic::catch_unwind(AssertUnwindSafe(|| callback(scan))) {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };
    Err(Error::CallbackFailure {
        scan_index,
        timestamp: scan.timestamp().unwrap_or_default(),
        message,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_owned()
    }
}

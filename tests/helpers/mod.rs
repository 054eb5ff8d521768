//! In-memory doubles for the bus and timer seams.
use poco_n2k::protocol::transport::{
    can_frame::CanFrame,
    traits::{can_bus::CanBus, poco_timer::PocoTimer},
};
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

/// One end of a point-to-point bus: what one side sends, the other receives.
pub struct MockCanBus {
    tx: mpsc::UnboundedSender<CanFrame>,
    rx: mpsc::UnboundedReceiver<CanFrame>,
}

impl MockCanBus {
    /// Device-under-test end first, host end second.
    pub fn create_pair() -> (Self, Self) {
        let (dut_tx, host_rx) = mpsc::unbounded_channel();
        let (host_tx, dut_rx) = mpsc::unbounded_channel();
        (
            Self { tx: dut_tx, rx: dut_rx },
            Self { tx: host_tx, rx: host_rx },
        )
    }
}

impl CanBus for MockCanBus {
    /// The peer end was dropped.
    type Error = ();

    /// Only the identifier and payload cross the wire: the peer rebuilds the
    /// frame from them, as a driver would.
    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        let wire = CanFrame::new(frame.id(), frame.payload()).map_err(|_| ())?;
        self.tx.send(wire).map_err(|_| ())
    }

    async fn recv(&mut self) -> Result<CanFrame, Self::Error> {
        self.rx.recv().await.ok_or(())
    }
}

/// Timer backed by `tokio::time::sleep`.
pub struct MockTimer;

impl PocoTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(u64::from(millis))).await;
    }
}

use cosponsor_core::LegislatorId;
use cosponsor_graph::{PolicyFilter, SamplingStrategy};
use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};

/// Where an activation came from, for logging and for widgets that react
/// differently to their own events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationOrigin {
    Canvas,
    DetailPanel,
    Search,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Dataset lifecycle
    DataLoaded,
    DataFailed {
        message: String,
        detail: String,
    },

    // Filter controls
    ThresholdChanged {
        min_collaborations: u32,
    },
    PolicySelected {
        policy: PolicyFilter,
    },
    SamplingChanged {
        strategy: SamplingStrategy,
    },
    SearchChanged {
        query: String,
    },

    // Canvas activations
    NodeActivated {
        id: LegislatorId,
        origin: ActivationOrigin,
    },
    StateLabelActivated {
        state: String,
    },
    BackgroundActivated,

    // Notifications
    ShowWarning {
        message: String,
    },
    ShowError {
        message: String,
    },
}

/// Unbounded in-process channel the widgets publish into and the app
/// drains once per frame.
#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    /// Hand every pending event to `listener`; used once per UI frame.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// Implemented by components that respond to events.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}

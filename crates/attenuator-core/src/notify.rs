use crate::curve_type::CurveType;
use crate::validate::Axis;

/// What changed in the editor. Fired after accepted and rejected edits alike,
/// so a view can always re-render from the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveEvent {
    ValueEdited {
        index: usize,
        axis: Axis,
        accepted: bool,
    },
    ShapeChanged {
        index: usize,
    },
    PointInserted {
        index: usize,
    },
    InsertRejected,
    PointDeleted {
        index: usize,
        accepted: bool,
    },
    CurveTypeChanged(CurveType),
    Reloaded,
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CurveEvent)>;

/// Single-threaded observer list.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CurveEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn notify(&mut self, event: CurveEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

use crate::frame::Frame;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(u64);

/// Registry of post-render listeners.
///
/// The render loop calls `fire` after each frame and notifies the returned
/// listeners in registration order. Owners keep their `HookId` and must
/// `unregister` when they detach.
#[derive(Debug, Default)]
pub struct FrameHooks {
    next_id: u64,
    hooks: Vec<(HookId, &'static str)>,
    last_frame: Option<Frame>,
}

impl FrameHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &'static str) -> HookId {
        let id = HookId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.hooks.push((id, name));
        tracing::debug!(hook = name, "post-render hook registered");
        id
    }

    /// Returns `true` if the hook was registered.
    pub fn unregister(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(h, _)| *h != id);
        self.hooks.len() != before
    }

    pub fn is_registered(&self, id: HookId) -> bool {
        self.hooks.iter().any(|(h, _)| *h == id)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.last_frame
    }

    /// Records `frame` as rendered and returns the listeners to notify.
    pub fn fire(&mut self, frame: Frame) -> Vec<HookId> {
        self.last_frame = Some(frame);
        self.hooks.iter().map(|(id, _)| *id).collect()
    }
}

/// A subscriber receives the owner of the channel plus the event payload.
pub type Subscriber<Ctx, E> = Box<dyn FnMut(&mut Ctx, &E)>;

/// A synchronous, single-kind event channel.
///
/// Subscribers are invoked in registration order, on the caller's stack, before
/// `emit` returns. The channel is owned by the component that emits on it.
pub struct EventChannel<Ctx, E> {
    subscribers: Vec<Subscriber<Ctx, E>>,
}

impl<Ctx, E> std::fmt::Debug for EventChannel<Ctx, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &format!("<{} subscribers>", self.subscribers.len()))
            .finish()
    }
}

impl<Ctx, E> Default for EventChannel<Ctx, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, E> EventChannel<Ctx, E> {
    /// Creates a channel with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Subscribe a handler; it runs after every handler registered before it
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&mut Ctx, &E) + 'static,
    {
        self.subscribers.push(Box::new(handler));
    }

    /// Emit an event to all registered handlers
    pub fn emit(&mut self, ctx: &mut Ctx, event: &E) {
        for handler in &mut self.subscribers {
            handler(ctx, event);
        }
    }

    /// Appends the subscribers of `other` after this channel's own.
    pub fn append(&mut self, other: &mut Self) {
        self.subscribers.append(&mut other.subscribers);
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

//! Ordered multicast of typed events.
//!
//! Each event type has its own subscriber list, run in registration order on
//! the calling thread. A subscriber that returns `Err` or panics is logged and
//! counted; the remaining subscribers still run.

use crate::events::{
    ChatEvent, CommandEvent, GatherEvent, NpcDeathEvent, NpcHurtEvent, PlayerConnectedEvent,
    PlayerDeathEvent, PlayerDisconnectedEvent, PlayerHurtEvent,
};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{error, trace, warn};

/// What a subscriber returns.
pub type HandlerResult = anyhow::Result<()>;

/// Handle returned by every `on_*` registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Outcome of delivering one event to its subscribers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Subscribers that returned `Ok`.
    pub delivered: usize,
    /// Subscribers that returned `Err` or panicked.
    pub faulted: usize,
}

impl DispatchReport {
    pub fn subscribers(&self) -> usize {
        self.delivered + self.faulted
    }
}

pub(crate) type ChatHandler = dyn for<'a> FnMut(&mut ChatEvent<'a>) -> HandlerResult;
pub(crate) type CommandHandler = dyn for<'a> FnMut(&mut CommandEvent<'a>) -> HandlerResult;
pub(crate) type GatherHandler = dyn for<'a> FnMut(&mut GatherEvent<'a>) -> HandlerResult;
pub(crate) type NpcHurtHandler = dyn for<'a> FnMut(&mut NpcHurtEvent<'a>) -> HandlerResult;
pub(crate) type NpcDeathHandler = dyn for<'a> FnMut(&mut NpcDeathEvent<'a>) -> HandlerResult;
pub(crate) type ConnectedHandler = dyn for<'a> FnMut(&mut PlayerConnectedEvent<'a>) -> HandlerResult;
pub(crate) type DisconnectedHandler =
    dyn for<'a> FnMut(&mut PlayerDisconnectedEvent<'a>) -> HandlerResult;
pub(crate) type PlayerDeathHandler = dyn for<'a> FnMut(&mut PlayerDeathEvent<'a>) -> HandlerResult;
pub(crate) type PlayerHurtHandler = dyn for<'a> FnMut(&mut PlayerHurtEvent<'a>) -> HandlerResult;

/// Subscriber list for one event type.
pub(crate) struct Channel<H: ?Sized> {
    name: &'static str,
    handlers: Vec<(SubscriptionId, Box<H>)>,
}

impl<H: ?Sized> Channel<H> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: Vec::new(),
        }
    }

    fn push(&mut self, id: SubscriptionId, handler: Box<H>) {
        self.handlers.push((id, handler));
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sid, _)| *sid != id);
        self.handlers.len() != before
    }

    fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Runs `invoke` once per subscriber, isolating each one.
    pub(crate) fn dispatch(
        &mut self,
        mut invoke: impl FnMut(&mut H) -> HandlerResult,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        for (id, handler) in self.handlers.iter_mut() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| invoke(handler.as_mut())));
            match outcome {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(e)) => {
                    warn!(subscription = %id, event = self.name, "Subscriber failed: {:#}", e);
                    report.faulted += 1;
                }
                Err(payload) => {
                    error!(
                        subscription = %id,
                        event = self.name,
                        "Subscriber panicked: {}",
                        panic_message(&*payload)
                    );
                    report.faulted += 1;
                }
            }
        }
        trace!(event = self.name, ?report, "Dispatched");
        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

/// Subscriber lists for every event the dispatcher publishes.
pub struct EventBus {
    next_id: u64,
    pub(crate) chat: Channel<ChatHandler>,
    pub(crate) command: Channel<CommandHandler>,
    pub(crate) gather: Channel<GatherHandler>,
    pub(crate) npc_hurt: Channel<NpcHurtHandler>,
    pub(crate) npc_died: Channel<NpcDeathHandler>,
    pub(crate) player_connected: Channel<ConnectedHandler>,
    pub(crate) player_disconnected: Channel<DisconnectedHandler>,
    pub(crate) player_died: Channel<PlayerDeathHandler>,
    pub(crate) player_hurt: Channel<PlayerHurtHandler>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            chat: Channel::new("chat"),
            command: Channel::new("command"),
            gather: Channel::new("gathering"),
            npc_hurt: Channel::new("npc_hurt"),
            npc_died: Channel::new("npc_died"),
            player_connected: Channel::new("player_connected"),
            player_disconnected: Channel::new("player_disconnected"),
            player_died: Channel::new("player_died"),
            player_hurt: Channel::new("player_hurt"),
        }
    }

    fn allocate(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    pub fn on_chat<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: for<'a> FnMut(&mut ChatEvent<'a>) -> HandlerResult + 'static,
    {
        let id = self.allocate();
        self.chat.push(id, Box::new(handler));
        id
    }

    pub fn on_command<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: for<'a> FnMut(&mut CommandEvent<'a>) -> HandlerResult + 'static,
    {
        let id = self.allocate();
        self.command.push(id, Box::new(handler));
        id
    }

    pub fn on_gather<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: for<'a> FnMut(&mut GatherEvent<'a>) -> HandlerResult + 'static,
    {
        let id = self.allocate();
        self.gather.push(id, Box::new(handler));
        id
    }

    pub fn on_npc_hurt<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: for<'a> FnMut(&mut NpcHurtEvent<'a>) -> HandlerResult + 'static,
    {
        let id = self.allocate();
        self.npc_hurt.push(id, Box::new(handler));
        id
    }

    pub fn on_npc_died<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: for<'a> FnMut(&mut NpcDeathEvent<'a>) -> HandlerResult + 'static,
    {
        let id = self.allocate();
        self.npc_died.push(id, Box::new(handler));
        id
    }

    pub fn on_player_connected<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: for<'a> FnMut(&mut PlayerConnectedEvent<'a>) -> HandlerResult + 'static,
    {
        let id = self.allocate();
        self.player_connected.push(id, Box::new(handler));
        id
    }

    pub fn on_player_disconnected<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: for<'a> FnMut(&mut PlayerDisconnectedEvent<'a>) -> HandlerResult + 'static,
    {
        let id = self.allocate();
        self.player_disconnected.push(id, Box::new(handler));
        id
    }

    pub fn on_player_died<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: for<'a> FnMut(&mut PlayerDeathEvent<'a>) -> HandlerResult + 'static,
    {
        let id = self.allocate();
        self.player_died.push(id, Box::new(handler));
        id
    }

    pub fn on_player_hurt<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: for<'a> FnMut(&mut PlayerHurtEvent<'a>) -> HandlerResult + 'static,
    {
        let id = self.allocate();
        self.player_hurt.push(id, Box::new(handler));
        id
    }

    /// Removes a subscription. Returns `false` if `id` was unknown or
    /// already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.chat.remove(id)
            || self.command.remove(id)
            || self.gather.remove(id)
            || self.npc_hurt.remove(id)
            || self.npc_died.remove(id)
            || self.player_connected.remove(id)
            || self.player_disconnected.remove(id)
            || self.player_died.remove(id)
            || self.player_hurt.remove(id)
    }

    /// Total number of live subscriptions across every event type.
    pub fn subscriber_count(&self) -> usize {
        self.chat.len()
            + self.command.len()
            + self.gather.len()
            + self.npc_hurt.len()
            + self.npc_died.len()
            + self.player_connected.len()
            + self.player_disconnected.len()
            + self.player_died.len()
            + self.player_hurt.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

//! Working set of a screen: the fetched messages plus the selected order.
//!
//! The board owns the mode explicitly and hands it to [`order`] on every
//! change, so ordering itself stays stateless.

use crate::order::{order, OrderMode};
use crate::types::{Message, MessageId};

#[derive(Debug, Clone, Default)]
pub struct Board {
    messages: Vec<Message>,
    mode: OrderMode,
}

impl Board {
    pub fn new(mode: OrderMode) -> Self {
        Self {
            messages: Vec::new(),
            mode,
        }
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Install a freshly fetched listing, ordered by the current mode.
    pub fn replace(&mut self, listing: Vec<Message>) {
        self.messages = order(&listing, self.mode);
    }

    /// Switch mode and re-order what is already on screen.
    pub fn set_mode(&mut self, mode: OrderMode) {
        self.mode = mode;
        self.messages = order(&self.messages, mode);
    }

    /// Drop a message after the store confirmed its deletion. Ids match by
    /// text form, so a typed `"42"` removes a numeric `42`. Returns whether
    /// anything was removed.
    pub fn remove(&mut self, id: &MessageId) -> bool {
        let before = self.messages.len();
        self.messages
            .retain(|m| !m.id.as_ref().is_some_and(|own| own.same_as(id)));
        before != self.messages.len()
    }
}

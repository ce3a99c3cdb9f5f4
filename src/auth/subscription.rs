// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::session::AuthState;

type Listener = dyn Fn(&AuthState);

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Rc<Listener>)>,
}

/// Explicit subscriber list for auth-state changes.
#[derive(Default)]
pub(crate) struct Listeners {
    registry: Rc<RefCell<Registry>>,
}

impl Listeners {
    pub(crate) fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id = registry.next_id.wrapping_add(1);
        registry.entries.push((id, Rc::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Calls every listener once, in subscription order.
    ///
    /// Works on a snapshot so listeners may drop subscriptions (their own or others') while
    /// being notified; removals take effect from the next notification.
    pub(crate) fn notify(&self, state: &AuthState) {
        let snapshot: Vec<Rc<Listener>> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Disposer handle returned by `SessionStore::subscribe`.
///
/// Dropping it (or calling `unsubscribe`) removes the listener. Outliving the store is fine.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        registry
            .borrow_mut()
            .entries
            .retain(|(id, _)| *id != self.id);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::Listeners;
    use crate::auth::session::AuthState;

    #[test]
    fn drop_unsubscribes() {
        let listeners = Listeners::default();
        let calls = Rc::new(Cell::new(0));

        let sub = listeners.subscribe({
            let calls = Rc::clone(&calls);
            move |_| calls.set(calls.get() + 1)
        });
        listeners.notify(&AuthState::Unauthenticated);
        assert_eq!(calls.get(), 1);

        sub.unsubscribe();
        assert_eq!(listeners.len(), 0);
        listeners.notify(&AuthState::Unauthenticated);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn listener_may_drop_another_subscription_during_notify() {
        let listeners = Listeners::default();
        let victim_calls = Rc::new(Cell::new(0));
        let victim_slot = Rc::new(RefCell::new(None));

        let _killer = listeners.subscribe({
            let victim_slot = Rc::clone(&victim_slot);
            move |_| {
                victim_slot.borrow_mut().take();
            }
        });
        let victim = listeners.subscribe({
            let victim_calls = Rc::clone(&victim_calls);
            move |_| victim_calls.set(victim_calls.get() + 1)
        });
        *victim_slot.borrow_mut() = Some(victim);

        listeners.notify(&AuthState::Unauthenticated);
        // Snapshot semantics: the victim still sees the in-flight notification.
        assert_eq!(victim_calls.get(), 1);
        assert_eq!(listeners.len(), 1);

        listeners.notify(&AuthState::Unauthenticated);
        assert_eq!(victim_calls.get(), 1);
    }

    #[test]
    fn subscription_outliving_listeners_is_harmless() {
        let listeners = Listeners::default();
        let sub = listeners.subscribe(|_| {});
        drop(listeners);
        drop(sub);
    }
}

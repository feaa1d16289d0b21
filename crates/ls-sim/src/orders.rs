//! `OrderStream` — orders keyed by the tick they take effect.
//!
//! Every participant must feed the same stream; the sim drains it at the
//! start of each tick.  Orders recorded for a tick that has already been
//! processed are delivered on the next tick rather than dropped.

use std::collections::BTreeMap;

use ls_core::Tick;
use ls_order::Order;

#[derive(Default, Debug)]
pub struct OrderStream {
    inner: BTreeMap<Tick, Vec<Order>>,
    /// Cached total order count for O(1) `len()`.
    total: usize,
}

impl OrderStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `order` for `tick`.  Orders at the same tick keep insertion
    /// order.
    pub fn push(&mut self, tick: Tick, order: Order) {
        self.inner.entry(tick).or_default().push(order);
        self.total += 1;
    }

    /// Remove and return every order scheduled at or before `tick`, earliest
    /// tick first.
    pub fn drain_until(&mut self, tick: Tick) -> Vec<Order> {
        let later = self.inner.split_off(&Tick(tick.0.saturating_add(1)));
        let due = std::mem::replace(&mut self.inner, later);
        let orders: Vec<Order> = due.into_values().flatten().collect();
        self.total -= orders.len();
        orders
    }

    /// The earliest tick with a pending order.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tick, &Order)> {
        self.inner
            .iter()
            .flat_map(|(&t, orders)| orders.iter().map(move |o| (t, o)))
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl FromIterator<(Tick, Order)> for OrderStream {
    fn from_iter<I: IntoIterator<Item = (Tick, Order)>>(iter: I) -> Self {
        let mut stream = Self::new();
        for (tick, order) in iter {
            stream.push(tick, order);
        }
        stream
    }
}

use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, PaymentConfirmedEvent, PaymentPendingEvent};

/// The producer handles the reconciliation API publishes through. One producer per subscribed
/// handler; an empty set of producers means events vanish silently, which is the correct behavior
/// when nothing is wired up (e.g. in tests).
#[derive(Default, Clone)]
pub struct EventProducers {
    pub payment_confirmed: Vec<EventProducer<PaymentConfirmedEvent>>,
    pub payment_pending: Vec<EventProducer<PaymentPendingEvent>>,
}

/// Callbacks to run on engine events. Wired up once at startup and handed to [`EventHandlers`].
#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_payment_confirmed: Option<Handler<PaymentConfirmedEvent>>,
    pub on_payment_pending: Option<Handler<PaymentPendingEvent>>,
}

impl EventHooks {
    pub fn on_payment_confirmed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(PaymentConfirmedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_payment_confirmed = Some(Arc::new(f));
        self
    }

    pub fn on_payment_pending<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(PaymentPendingEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_payment_pending = Some(Arc::new(f));
        self
    }
}

pub struct EventHandlers {
    pub on_payment_confirmed: Option<EventHandler<PaymentConfirmedEvent>>,
    pub on_payment_pending: Option<EventHandler<PaymentPendingEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_payment_confirmed = hooks.on_payment_confirmed.map(|f| EventHandler::new(buffer_size, f));
        let on_payment_pending = hooks.on_payment_pending.map(|f| EventHandler::new(buffer_size, f));
        Self { on_payment_confirmed, on_payment_pending }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_payment_confirmed {
            result.payment_confirmed.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_payment_pending {
            result.payment_pending.push(handler.subscribe());
        }
        result
    }

    /// Spawns one task per configured handler. The tasks exit on their own once every producer
    /// has been dropped.
    pub fn start_handlers(self) {
        if let Some(handler) = self.on_payment_confirmed {
            tokio::spawn(handler.run());
        }
        if let Some(handler) = self.on_payment_pending {
            tokio::spawn(handler.run());
        }
    }
}

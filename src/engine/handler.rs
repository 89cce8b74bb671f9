//! Handler registry seam between the engine and application code.

use crate::core::{EventQueue, HandlerIndex};
use std::fmt;

/// Indexed set of transition handlers.
///
/// The engine only ever calls `invoke` with an index below `len()`. A handler
/// returns `true` on success and `false` on failure; either way the engine
/// advances the state. Handlers may schedule follow-up events through
/// `events`, which the engine processes before `control` returns.
///
/// Implement this directly when handlers are methods on one device object:
///
/// ```rust
/// use microfsm::core::{EventQueue, HandlerIndex};
/// use microfsm::engine::HandlerRegistry;
///
/// struct Modem {
///     resets: u32,
/// }
///
/// impl HandlerRegistry<()> for Modem {
///     fn len(&self) -> usize {
///         2
///     }
///
///     fn invoke<'a>(
///         &mut self,
///         index: HandlerIndex,
///         _parameters: Option<&'a ()>,
///         _events: &mut EventQueue<'a, ()>,
///     ) -> bool {
///         match index {
///             0 => false,
///             _ => {
///                 self.resets += 1;
///                 true
///             }
///         }
///     }
/// }
/// ```
pub trait HandlerRegistry<P: ?Sized> {
    /// Number of handler slots.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run the handler at `index`.
    fn invoke<'a>(
        &mut self,
        index: HandlerIndex,
        parameters: Option<&'a P>,
        events: &mut EventQueue<'a, P>,
    ) -> bool;
}

/// Boxed handler closure stored in a [`HandlerTable`].
pub type Handler<P> = Box<dyn for<'a> FnMut(Option<&'a P>, &mut EventQueue<'a, P>) -> bool>;

/// Registry backed by a vector of closures, indexed in registration order.
///
/// # Example
///
/// ```rust
/// use microfsm::engine::{HandlerRegistry, HandlerTable};
///
/// let mut handlers = HandlerTable::<u32>::new();
/// let internal_error = handlers.register(|_, _| false);
/// let reset = handlers.register(|params, _| params.is_some_and(|p| *p > 0));
///
/// assert_eq!((internal_error, reset), (0, 1));
/// assert_eq!(handlers.len(), 2);
/// ```
pub struct HandlerTable<P: ?Sized> {
    handlers: Vec<Handler<P>>,
}

impl<P: ?Sized> HandlerTable<P> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Add a handler, returning its index.
    pub fn register<F>(&mut self, handler: F) -> HandlerIndex
    where
        F: for<'a> FnMut(Option<&'a P>, &mut EventQueue<'a, P>) -> bool + 'static,
    {
        self.handlers.push(Box::new(handler));
        self.handlers.len() - 1
    }

    /// Add a handler in builder style.
    pub fn with<F>(mut self, handler: F) -> Self
    where
        F: for<'a> FnMut(Option<&'a P>, &mut EventQueue<'a, P>) -> bool + 'static,
    {
        self.register(handler);
        self
    }
}

impl<P: ?Sized> Default for HandlerTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for HandlerTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<P: ?Sized> HandlerRegistry<P> for HandlerTable<P> {
    fn len(&self) -> usize {
        self.handlers.len()
    }

    fn invoke<'a>(
        &mut self,
        index: HandlerIndex,
        parameters: Option<&'a P>,
        events: &mut EventQueue<'a, P>,
    ) -> bool {
        match self.handlers.get_mut(index) {
            Some(handler) => handler(parameters, events),
            None => false,
        }
    }
}

// src/services/keyboard.rs

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Other,
}

type Handler = Arc<dyn Fn(Key) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

// Registro explícito de ouvintes de teclado. Cada inscrição vive enquanto
// o `KeyRegistration` existir; largar o guard remove o ouvinte.
#[derive(Clone, Default)]
pub struct Keyboard {
    listeners: Arc<Mutex<Listeners>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, handler: impl Fn(Key) + Send + Sync + 'static) -> KeyRegistration {
        let mut listeners = self.listeners.lock().unwrap_or_else(|p| p.into_inner());
        let id = listeners.next_id;
        listeners.next_id += 1;
        let handler: Handler = Arc::new(handler);
        listeners.handlers.push((id, handler));

        KeyRegistration {
            id,
            listeners: Arc::clone(&self.listeners),
        }
    }

    /// Entrega a tecla a todos os ouvintes ativos.
    pub fn dispatch(&self, key: Key) {
        // Copia os handlers antes de chamar: um handler pode se desinscrever
        let handlers: Vec<Handler> = {
            let listeners = self.listeners.lock().unwrap_or_else(|p| p.into_inner());
            listeners.handlers.iter().map(|(_, h)| Arc::clone(h)).collect()
        };
        for handler in handlers {
            handler(key);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .handlers
            .len()
    }
}

#[must_use = "largar o registro remove o ouvinte"]
pub struct KeyRegistration {
    id: u64,
    listeners: Arc<Mutex<Listeners>>,
}

impl Drop for KeyRegistration {
    fn drop(&mut self) {
        let mut listeners = self.listeners.lock().unwrap_or_else(|p| p.into_inner());
        listeners.handlers.retain(|(id, _)| *id != self.id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn dropping_the_registration_removes_the_listener() {
        let keyboard = Keyboard::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let registration = keyboard.register(move |key| {
            if key == Key::Escape {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert_eq!(keyboard.listener_count(), 1);

        keyboard.dispatch(Key::Escape);
        keyboard.dispatch(Key::Enter);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        drop(registration);
        assert_eq!(keyboard.listener_count(), 0);
        keyboard.dispatch(Key::Escape);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handler_may_unregister_itself_during_dispatch() {
        let keyboard = Keyboard::new();
        let slot: Arc<Mutex<Option<KeyRegistration>>> = Arc::new(Mutex::new(None));

        let inner = Arc::clone(&slot);
        let registration = keyboard.register(move |_| {
            inner.lock().unwrap().take();
        });
        *slot.lock().unwrap() = Some(registration);

        keyboard.dispatch(Key::Escape);
        assert_eq!(keyboard.listener_count(), 0);
    }
}

//! Observable state containers.
//!
//! A [`Store`] holds one value. Readers either take a snapshot with
//! [`Store::get`] or subscribe and get notified on every write.

use tokio::sync::watch;

/// A value shared between a writer and any number of observers.
#[derive(Debug)]
pub struct Store<T> {
    sender: watch::Sender<T>,
}

impl<T> Store<T> {
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self { sender }
    }

    /// Receiver notified after every write.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Mutates the value in place and notifies subscribers once.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(f);
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.sender.borrow())
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone> Store<T> {
    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

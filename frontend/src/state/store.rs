//! # State Store
//!
//! A single current value plus an ordered stream of updates, backed by a
//! `tokio::sync::watch` channel. Every ViewModel keeps its UI state in one.
//!
//! [`TaskScope`] owns the background loads a ViewModel starts; dropping the
//! scope aborts them. Saves are never put in a scope.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct StateStore<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateStore<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T: Clone> StateStore<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Snapshot of the current state
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.sender.send_modify(f);
    }

    /// Apply `f` atomically; subscribers are only notified when it returns true
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.sender.send_if_modified(f)
    }

    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }
}

/// Background tasks owned by one ViewModel
#[derive(Debug, Default)]
pub struct TaskScope {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        let mut handles = self.handles.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Abort every task still running in this scope
    pub fn cancel_all(&self) {
        let mut handles = self.handles.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for handle in handles.drain(..) {
            handle.abort();
        }
    }

    pub fn active(&self) -> usize {
        let handles = self.handles.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        handles.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Run a mutation outside any scope so it completes even if its screen goes away
pub fn spawn_detached<F>(future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_store_updates_in_order() {
        let store = StateStore::new(0u32);
        let mut receiver = store.subscribe();

        store.update(|v| *v += 1);
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), 1);

        store.set(5);
        assert_eq!(store.get(), 5);
        assert_eq!(store.with(|v| *v * 2), 10);
    }

    #[tokio::test]
    async fn test_update_if_only_notifies_on_change() {
        let store = StateStore::new(false);
        let receiver = store.subscribe();

        assert!(!store.update_if(|_| false));
        assert!(!receiver.has_changed().unwrap());

        assert!(store.update_if(|v| {
            *v = true;
            true
        }));
        assert!(receiver.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_dropping_scope_aborts_tasks() {
        let (tx, rx) = oneshot::channel::<()>();
        let scope = TaskScope::new();
        scope.spawn(async move {
            let _keep = tx;
            std::future::pending::<()>().await;
        });
        assert_eq!(scope.active(), 1);

        drop(scope);

        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_detached_task_outlives_scope() {
        let (tx, rx) = oneshot::channel();
        let scope = TaskScope::new();
        let handle = spawn_detached(async move {
            tokio::task::yield_now().await;
            let _ = tx.send(42);
        });

        drop(scope);

        handle.await.unwrap();
        assert_eq!(rx.await.unwrap(), 42);
    }
}

//! Live read support.
//!
//! Every store exposes its record set through a `tokio::sync::watch`
//! channel: subscribers get the current snapshot immediately and a new
//! snapshot after every committed write, in write order. `derive` builds
//! a filtered or re-sorted live view on top of a store feed.

use tokio::sync::watch;

/// Derive a live view from an existing feed by mapping each snapshot.
///
/// The returned receiver replays the mapped current value on subscribe
/// and follows the source until either side is dropped. Must be called
/// from within a tokio runtime.
pub fn derive<T, U, F>(mut source: watch::Receiver<T>, map: F) -> watch::Receiver<U>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    F: Fn(&T) -> U + Send + 'static,
{
    let initial = map(&source.borrow());
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        while source.changed().await.is_ok() {
            let next = map(&source.borrow());
            if tx.send(next).is_err() {
                // Derived view dropped
                break;
            }
        }
    });

    rx
}

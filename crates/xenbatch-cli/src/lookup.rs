//! Bounded fan-out for per-sub-account chain reads.

use std::future::Future;

use futures::stream::{self, StreamExt};

/// Chain reads kept in flight at once while listing sub-accounts.
pub const MAX_IN_FLIGHT_LOOKUPS: usize = 16;

/// Run `f` over `items` with at most `limit` futures pending at a time.
/// Results come back in input order.
pub async fn buffered_in_order<I, F, Fut, T>(items: I, limit: usize, f: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    stream::iter(items).map(f).buffered(limit.max(1)).collect().await
}

/// Splits `items` into consecutive groups of at most `batch_size`.
///
/// `batch_size` below 1 is treated as 1. Order and count are preserved; only
/// the last group may be short.
pub fn chunk<T: Clone>(items: &[T], batch_size: i64) -> Vec<Vec<T>> {
    let size = usize::try_from(batch_size.max(1)).unwrap_or(usize::MAX);
    items.chunks(size)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Owning variant of [`chunk`] that moves items instead of cloning them.
pub fn chunk_owned<T>(items: Vec<T>, batch_size: i64) -> Vec<Vec<T>> {
    let size = usize::try_from(batch_size.max(1)).unwrap_or(usize::MAX);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut current = Vec::with_capacity(size.min(items.len()));
    for item in items {
        current.push(item);
        if current.len() == size {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

//! Fixed pool of line buffers exchanged between a producer and the
//! interpreter.
//!
//! Every [`WorkItem`] is in exactly one place: the free pool, the pending
//! queue, or the hands of whoever took it out. Items are moved, never
//! cloned, so none can be duplicated. When all of them are pending or being
//! processed the producer gets nothing, which is the only flow control.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};

use modshell_types::error::{Result, ShellError};

/// One reusable line buffer.
#[derive(Debug)]
pub struct WorkItem {
    id: usize,
    line: String,
    capacity: usize,
}

impl WorkItem {
    fn new(id: usize, capacity: usize) -> Self {
        Self {
            id,
            line: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Position of this item in the pool.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// Buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replace the buffer contents with `text`, minus any line terminator.
    /// Text beyond the capacity is cut at a char boundary.
    pub fn fill(&mut self, text: &str) {
        let text = text.trim_end_matches(['\n', '\r']);
        let mut end = text.len().min(self.capacity);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end < text.len() {
            log::warn!("line truncated to {} bytes", self.capacity);
        }
        self.line.clear();
        self.line.push_str(&text[..end]);
    }

    fn clear(&mut self) {
        self.line.clear();
    }
}

/// Producer half: takes free items, fills them, and submits them.
#[derive(Debug)]
pub struct LineProducer {
    free: Receiver<WorkItem>,
    pending: SyncSender<WorkItem>,
}

impl LineProducer {
    /// Take a free item without waiting. `Ok(None)` means every item is
    /// pending or being processed.
    pub fn try_acquire(&self) -> Result<Option<WorkItem>> {
        match self.free.try_recv() {
            Ok(item) => Ok(Some(item)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ShellError::QueueClosed),
        }
    }

    /// Wait until an item is returned to the free pool.
    pub fn acquire(&self) -> Result<WorkItem> {
        self.free.recv().map_err(|_| ShellError::QueueClosed)
    }

    /// Queue a filled item for the interpreter.
    pub fn submit(&self, item: WorkItem) -> Result<()> {
        self.pending.send(item).map_err(|_| ShellError::QueueClosed)
    }
}

/// Consumer half: takes pending items and returns them to the pool.
#[derive(Debug)]
pub struct LineConsumer {
    pending: Receiver<WorkItem>,
    free: SyncSender<WorkItem>,
    size: usize,
}

impl LineConsumer {
    /// Wait for the next pending item. `None` once the producer is gone
    /// and nothing is left pending.
    pub fn recv(&self) -> Option<WorkItem> {
        self.pending.recv().ok()
    }

    /// Take a pending item without waiting.
    pub fn try_recv(&self) -> Option<WorkItem> {
        self.pending.try_recv().ok()
    }

    /// Return a processed item to the free pool.
    pub fn release(&self, mut item: WorkItem) {
        item.clear();
        if self.free.send(item).is_err() {
            log::debug!("producer gone, line buffer discarded");
        }
    }

    /// Number of items in the pool.
    pub fn pool_size(&self) -> usize {
        self.size
    }
}

/// Create a pool of `size` line buffers of `line_len` bytes each, all
/// starting free.
pub fn line_pool(size: usize, line_len: usize) -> Result<(LineProducer, LineConsumer)> {
    if size == 0 {
        return Err(ShellError::Config("line pool needs at least one item".to_string()));
    }
    let (free_tx, free_rx) = mpsc::sync_channel(size);
    let (pending_tx, pending_rx) = mpsc::sync_channel(size);
    for id in 0..size {
        free_tx
            .send(WorkItem::new(id, line_len))
            .map_err(|_| ShellError::QueueClosed)?;
    }
    log::debug!("line pool ready: {size} buffers of {line_len} bytes");
    Ok((
        LineProducer {
            free: free_rx,
            pending: pending_tx,
        },
        LineConsumer {
            pending: pending_rx,
            free: free_tx,
            size,
        },
    ))
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn zero_size_rejected() {
        assert!(matches!(line_pool(0, 16), Err(ShellError::Config(_))));
    }

    #[test]
    fn all_items_start_free() {
        let (producer, consumer) = line_pool(3, 16).unwrap();
        let mut ids = Vec::new();
        while let Some(item) = producer.try_acquire().unwrap() {
            ids.push(item.id());
        }
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(consumer.pool_size(), 3);
        assert!(consumer.try_recv().is_none());
    }

    #[test]
    fn exhausted_pool_gives_nothing_until_release() {
        let (producer, consumer) = line_pool(2, 16).unwrap();
        for text in ["a", "b"] {
            let mut item = producer.try_acquire().unwrap().unwrap();
            item.fill(text);
            producer.submit(item).unwrap();
        }
        assert!(producer.try_acquire().unwrap().is_none());

        let item = consumer.recv().unwrap();
        assert_eq!(item.line(), "a");
        consumer.release(item);
        let again = producer.try_acquire().unwrap().unwrap();
        assert!(again.line().is_empty());
    }

    #[test]
    fn pending_is_fifo() {
        let (producer, consumer) = line_pool(3, 16).unwrap();
        for text in ["one", "two", "three"] {
            let mut item = producer.acquire().unwrap();
            item.fill(text);
            producer.submit(item).unwrap();
        }
        let lines: Vec<String> = std::iter::from_fn(|| consumer.try_recv())
            .map(|item| item.line().to_string())
            .collect();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn fill_strips_terminator_and_truncates() {
        let (producer, _consumer) = line_pool(1, 4).unwrap();
        let mut item = producer.acquire().unwrap();
        item.fill("ab\r\n");
        assert_eq!(item.line(), "ab");
        item.fill("abcdef");
        assert_eq!(item.line(), "abcd");
        item.fill("abcé");
        assert_eq!(item.line(), "abc");
        assert_eq!(item.capacity(), 4);
    }

    #[test]
    fn consumer_sees_end_when_producer_dropped() {
        let (producer, consumer) = line_pool(1, 8).unwrap();
        let mut item = producer.acquire().unwrap();
        item.fill("last");
        producer.submit(item).unwrap();
        drop(producer);
        assert_eq!(consumer.recv().unwrap().line(), "last");
        assert!(consumer.recv().is_none());
    }

    #[test]
    fn producer_sees_closed_queue() {
        let (producer, consumer) = line_pool(1, 8).unwrap();
        let item = producer.acquire().unwrap();
        drop(consumer);
        assert!(matches!(
            producer.submit(item),
            Err(ShellError::QueueClosed)
        ));
        assert!(matches!(
            producer.try_acquire(),
            Err(ShellError::QueueClosed)
        ));
    }

    #[test]
    fn producer_on_another_thread() {
        let (producer, consumer) = line_pool(2, 32).unwrap();
        let handle = thread::spawn(move || {
            for i in 0..10 {
                let mut item = producer.acquire().unwrap();
                item.fill(&format!("line {i}"));
                producer.submit(item).unwrap();
            }
        });
        let mut seen = Vec::new();
        while let Some(item) = consumer.recv() {
            seen.push(item.line().to_string());
            consumer.release(item);
        }
        handle.join().unwrap();
        assert_eq!(seen.len(), 10);
        assert_eq!(seen[9], "line 9");
    }
}

//! Bounded FIFO of formatted records awaiting transmission.

use std::{collections::VecDeque, num::NonZeroUsize};

use crate::error::SinkError;

/// Fixed-capacity queue owned by the stream forwarder.
///
/// Inserting into a full buffer is an error; the buffer never drops or
/// evicts records on its own.
#[derive(Debug)]
pub struct RetryBuffer {
    records: VecDeque<Vec<u8>>,
    capacity: NonZeroUsize,
}

impl RetryBuffer {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Append `record`, or hand back [`SinkError::BufferFull`] untouched.
    pub fn push(&mut self, record: Vec<u8>) -> Result<(), SinkError> {
        if self.is_full() {
            return Err(SinkError::BufferFull {
                capacity: self.capacity.get(),
            });
        }
        self.records.push_back(record);
        Ok(())
    }

    /// Oldest record, if any.
    pub fn front(&self) -> Option<&[u8]> {
        self.records.front().map(Vec::as_slice)
    }

    pub fn pop_front(&mut self) -> Option<Vec<u8>> {
        self.records.pop_front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity.get()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Discard every record, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.records.len();
        self.records.clear();
        dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.records.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn buffer() -> RetryBuffer {
        RetryBuffer::new(NonZeroUsize::new(2).unwrap())
    }

    #[rstest]
    fn pops_in_insertion_order(mut buffer: RetryBuffer) {
        buffer.push(b"a".to_vec()).unwrap();
        buffer.push(b"b".to_vec()).unwrap();
        assert_eq!(buffer.front(), Some(&b"a"[..]));
        assert_eq!(buffer.pop_front(), Some(b"a".to_vec()));
        assert_eq!(buffer.pop_front(), Some(b"b".to_vec()));
        assert_eq!(buffer.pop_front(), None);
    }

    #[rstest]
    fn overflow_is_an_error_and_leaves_contents(mut buffer: RetryBuffer) {
        buffer.push(b"a".to_vec()).unwrap();
        buffer.push(b"b".to_vec()).unwrap();
        let err = buffer.push(b"c".to_vec()).expect_err("third push overflows");
        assert!(matches!(err, SinkError::BufferFull { capacity: 2 }));
        let contents: Vec<_> = buffer.iter().collect();
        assert_eq!(contents, vec![&b"a"[..], &b"b"[..]]);
    }

    #[rstest]
    fn clear_reports_dropped_count(mut buffer: RetryBuffer) {
        buffer.push(b"a".to_vec()).unwrap();
        assert_eq!(buffer.clear(), 1);
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 2);
    }
}

//! Buffered inserts for the metadata export.

use mister_arcade_db::{OperationError, insert_games};
use mister_arcade_meta::GameRecord;
use rusqlite::Connection;

/// Collects export records and writes them in fixed-size transactions.
///
/// Nothing is written until a batch fills up or [`BatchWriter::flush`] is
/// called; a committed batch stays committed even if a later one fails.
#[derive(Debug)]
pub struct BatchWriter {
    batch_size: usize,
    pending: Vec<GameRecord>,
    written: u64,
}

impl BatchWriter {
    /// A batch size of zero is treated as one.
    pub fn new(batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            batch_size,
            pending: Vec::with_capacity(batch_size),
            written: 0,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Records waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Rows actually inserted so far (duplicates excluded).
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Queue a record, flushing when the batch is full.
    pub fn push(&mut self, conn: &Connection, record: GameRecord) -> Result<(), OperationError> {
        self.pending.push(record);
        if self.pending.len() >= self.batch_size {
            self.flush(conn)?;
        }
        Ok(())
    }

    /// Write everything pending in one transaction.
    pub fn flush(&mut self, conn: &Connection) -> Result<(), OperationError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let inserted = insert_games(conn, &self.pending)?;
        let ignored = self.pending.len() - inserted;
        if ignored > 0 {
            log::debug!("{} duplicate export record(s) ignored", ignored);
        }
        self.written += inserted as u64;
        self.pending.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mister_arcade_db::{open_memory, store_stats};

    fn record(setname: &str) -> GameRecord {
        GameRecord {
            setname: setname.to_string(),
            description: setname.to_uppercase(),
            name: setname.to_string(),
            ..GameRecord::default()
        }
    }

    #[test]
    fn test_flushes_when_full() {
        let conn = open_memory().unwrap();
        let mut batch = BatchWriter::new(2);

        batch.push(&conn, record("a")).unwrap();
        assert_eq!(batch.pending(), 1);
        assert_eq!(store_stats(&conn).unwrap().games, 0);

        batch.push(&conn, record("b")).unwrap();
        assert_eq!(batch.pending(), 0);
        assert_eq!(store_stats(&conn).unwrap().games, 2);

        batch.push(&conn, record("c")).unwrap();
        batch.flush(&conn).unwrap();
        assert_eq!(batch.pending(), 0);
        assert_eq!(batch.written(), 3);
        assert_eq!(store_stats(&conn).unwrap().games, 3);
    }

    #[test]
    fn test_duplicates_not_counted() {
        let conn = open_memory().unwrap();
        let mut batch = BatchWriter::new(10);
        batch.push(&conn, record("a")).unwrap();
        batch.push(&conn, record("a")).unwrap();
        batch.flush(&conn).unwrap();
        assert_eq!(batch.written(), 1);
    }

    #[test]
    fn test_zero_batch_size() {
        let conn = open_memory().unwrap();
        let mut batch = BatchWriter::new(0);
        assert_eq!(batch.batch_size(), 1);
        batch.push(&conn, record("a")).unwrap();
        assert_eq!(batch.pending(), 0);
    }
}

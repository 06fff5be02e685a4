// arena.rs — bump allocator for fixed-size block-index records.
//
// Migrated from the chanode_t/chastore_t arena in git's diff-delta.c:
// records are allocated in page-like chunks and never freed individually;
// the whole arena is dropped as one unit (cha_init / cha_alloc / cha_free
// collapse into `Arena::new` / `Arena::alloc` / `Drop`).

/// Failure to grow a [`Arena`] or its backing storage. Carries no payload;
/// callers map it to the richer `DeltaError::OutOfMemory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

struct Chunk<T> {
    records: Vec<T>,
}

/// Bump-allocates fixed-size `T` records in page-like chunks.
///
/// Records are never freed individually; dropping the arena drops every
/// chunk (and every record) at once. An [`ArenaIndex`] returned by
/// [`Arena::alloc`] stays valid for the arena's lifetime — it is a
/// `(chunk, slot)` pair rather than a raw pointer, so it survives the
/// `Vec<Chunk<T>>` reallocating as new chunks are pushed.
pub struct Arena<T> {
    records_per_chunk: usize,
    chunks: Vec<Chunk<T>>,
}

impl<T> Arena<T> {
    /// `records_per_chunk` mirrors `cha_init`'s `size` argument: how many
    /// `T`-sized records each page holds before a new one is allocated.
    pub fn new(records_per_chunk: usize) -> Self {
        assert!(records_per_chunk > 0);
        Arena {
            records_per_chunk,
            chunks: Vec::new(),
        }
    }

    /// Allocate one record, returning a stable handle to it.
    /// Equivalent to `cha_alloc`: pushes a fresh chunk when the current
    /// one is full or none exists yet.
    pub fn alloc(&mut self, value: T) -> Result<ArenaIndex, AllocError> {
        let needs_new_chunk = self
            .chunks
            .last()
            .map_or(true, |c| c.records.len() == self.records_per_chunk);

        if needs_new_chunk {
            let mut records = Vec::new();
            records
                .try_reserve_exact(self.records_per_chunk)
                .map_err(|_| AllocError)?;
            self.chunks.push(Chunk { records });
        }

        let chunk = self.chunks.last_mut().expect("chunk just pushed or present");
        let slot = chunk.records.len();
        chunk.records.push(value);
        Ok(ArenaIndex {
            chunk: self.chunks.len() - 1,
            slot,
        })
    }

    pub fn get(&self, idx: ArenaIndex) -> &T {
        &self.chunks[idx.chunk].records[idx.slot]
    }
}

/// Stable handle to a record allocated from an [`Arena`].
/// Equivalent to a `bdrecord_t*` pointer in diff-delta.c, but as an index
/// pair rather than an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaIndex {
    chunk: usize,
    slot: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_across_chunk_boundary() {
        let mut arena: Arena<u32> = Arena::new(2);
        let a = arena.alloc(10).unwrap();
        let b = arena.alloc(20).unwrap();
        let c = arena.alloc(30).unwrap();

        assert_eq!(*arena.get(a), 10);
        assert_eq!(*arena.get(b), 20);
        assert_eq!(*arena.get(c), 30);
    }

    #[test]
    fn earlier_handles_stay_valid_after_growth() {
        let mut arena: Arena<u32> = Arena::new(1);
        let mut handles = Vec::new();
        for n in 0..50u32 {
            handles.push(arena.alloc(n).unwrap());
        }
        for (n, handle) in handles.into_iter().enumerate() {
            assert_eq!(*arena.get(handle), n as u32);
        }
    }
}

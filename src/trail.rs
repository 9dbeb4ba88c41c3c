//! Transactional storage with O(changes) rollback.
//!
//! A [`Trail`] owns an arena of restorable cells and an undo log. Writing a
//! cell first saves its old value on the log, but only once per frame:
//! repeated writes inside one propagation step cost a single log entry.
//! [`Trail::mark`] captures the current log length as a checkpoint and
//! [`Trail::restore`] pops the log back to it, rewriting every touched cell.
//!
//! Marks must be used in stack discipline: restore only to the most recent
//! outstanding mark (or an enclosing one), never to a mark that has already
//! been restored past.

/// Handle to a cell allocated in a [`Trail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(usize);

/// Checkpoint returned by [`Trail::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

impl Mark {
    /// The checkpoint before any write was logged.
    pub const BASE: Mark = Mark(0);
}

/// Sentinel for cells that have never been saved on the log.
const NEVER_SAVED: usize = usize::MAX;

#[derive(Debug, Clone)]
struct Cell<T> {
    value: T,
    /// Frame in which this cell was last saved on the log.
    last_saved: usize,
}

#[derive(Debug, Clone)]
struct LogEntry<T> {
    cell: CellId,
    saved_value: T,
    old_frame: usize,
}

/// Growable store of undoable cells.
#[derive(Debug)]
pub struct Trail<T> {
    cells: Vec<Cell<T>>,
    log: Vec<LogEntry<T>>,
    /// Current frame pointer: the log length captured by the latest
    /// mark or restore.
    frame: usize,
}

impl<T: Clone> Trail<T> {
    pub fn new() -> Self {
        Trail {
            cells: Vec::new(),
            log: Vec::with_capacity(128),
            frame: 0,
        }
    }

    /// Allocates a new cell holding `initial`.
    pub fn alloc(&mut self, initial: T) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(Cell {
            value: initial,
            last_saved: NEVER_SAVED,
        });
        id
    }

    /// Current value of a cell.
    pub fn get(&self, id: CellId) -> &T {
        &self.cells[id.0].value
    }

    /// Overwrites a cell, saving the old value on the log unless the cell
    /// was already saved in the current frame.
    pub fn set(&mut self, id: CellId, value: T) {
        let cell = &mut self.cells[id.0];
        if cell.last_saved != self.frame {
            self.log.push(LogEntry {
                cell: id,
                saved_value: cell.value.clone(),
                old_frame: cell.last_saved,
            });
            cell.last_saved = self.frame;
        }
        cell.value = value;
    }

    /// Replaces a cell's value without undo bookkeeping.
    ///
    /// Only legal before the cell has ever been saved on the log, i.e.
    /// during problem configuration. Fails afterwards so that search-time
    /// mutations cannot bypass the undo machinery.
    pub fn set_initial(&mut self, id: CellId, value: T) -> Result<(), String> {
        let cell = &mut self.cells[id.0];
        if cell.last_saved != NEVER_SAVED {
            return Err("cannot set initial value after the cell has been saved".into());
        }
        cell.value = value;
        Ok(())
    }

    /// Captures the current log position as a checkpoint and opens a new
    /// save frame.
    pub fn mark(&mut self) -> Mark {
        self.frame = self.log.len();
        Mark(self.frame)
    }

    /// Undoes every write since `mark`, in reverse order, restoring both
    /// values and save-frame bookkeeping. The log never shrinks its
    /// allocation; only its logical length.
    pub fn restore(&mut self, mark: Mark) {
        while self.log.len() > mark.0 {
            let entry = self.log.pop().expect("log length checked above");
            let cell = &mut self.cells[entry.cell.0];
            cell.value = entry.saved_value;
            cell.last_saved = entry.old_frame;
        }
        self.frame = mark.0;
    }

    /// Number of allocated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<T: Clone> Default for Trail<T> {
    fn default() -> Self {
        Self::new()
    }
}

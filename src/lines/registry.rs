use super::line::LineRef;
use serde::{Deserialize, Serialize};

/// Stable handle of a line slot inside a [`LineRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl LineId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena of active lines with an index list ordered by start time.
///
/// Slots never move while a scan runs: removing a line vacates its slot and
/// leaves a stale entry in `order` until [`compact`](Self::compact) is
/// called. Inserting compacts first, so `order` only ever holds live ids
/// when a new entry is placed.
#[derive(Debug, Default)]
pub struct LineRegistry {
    slots: Vec<Option<LineRef>>,
    free: Vec<LineId>,
    order: Vec<LineId>,
    dirty: bool,
}

impl LineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live lines.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Id at scan position `pos`; may point at a vacated slot.
    pub fn id_at(&self, pos: usize) -> Option<LineId> {
        self.order.get(pos).copied()
    }

    pub fn get(&self, id: LineId) -> Option<&LineRef> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: LineId) -> Option<&mut LineRef> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Store `line`, keeping `order` sorted by start time. Lines with equal
    /// start times keep insertion order.
    pub fn insert(&mut self, line: LineRef) -> LineId {
        self.compact();
        let start = line.start_time_in_run();
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(line);
                id
            }
            None => {
                let id = LineId(self.slots.len() as u32);
                self.slots.push(Some(line));
                id
            }
        };
        let slots = &self.slots;
        let pos = self.order.partition_point(|other| {
            slots[other.index()]
                .as_ref()
                .is_some_and(|l| l.start_time_in_run() <= start)
        });
        self.order.insert(pos, id);
        id
    }

    /// Take a line out of the registry. Its order entry goes stale until the
    /// next [`compact`](Self::compact).
    pub fn remove(&mut self, id: LineId) -> Option<LineRef> {
        let line = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id);
        self.dirty = true;
        Some(line)
    }

    /// Drop stale ids from the ordered index.
    pub fn compact(&mut self) {
        if !self.dirty {
            return;
        }
        let slots = &self.slots;
        self.order.retain(|id| slots[id.index()].is_some());
        self.dirty = false;
    }

    /// Remove every line, returned in start-time order.
    pub fn drain_all(&mut self) -> Vec<LineRef> {
        let order = std::mem::take(&mut self.order);
        let mut lines = Vec::with_capacity(order.len());
        for id in order {
            if let Some(line) = self.slots.get_mut(id.index()).and_then(Option::take) {
                lines.push(line);
            }
        }
        self.slots.clear();
        self.free.clear();
        self.dirty = false;
        lines
    }

    /// Live lines in start-time order.
    pub fn iter(&self) -> impl Iterator<Item = (LineId, &LineRef)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.get(id).map(|line| (id, line)))
    }
}

//! Two-level track → setup grouping with explicit insertion order.

use std::collections::HashMap;
use std::hash::Hash;

use super::keys::{SetupKey, TrackKey};
use crate::runs::types::Run;

/// Map that iterates in the order keys were first inserted.
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Default> OrderedGroups<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, inserting a default at the end if it is new.
    pub fn entry(&mut self, key: K) -> &mut V {
        let existing = self.index.get(&key).copied();
        let pos = match existing {
            Some(pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(key.clone(), pos);
                self.entries.push((key, V::default()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }
}

impl<K, V> OrderedGroups<K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<K, V> IntoIterator for OrderedGroups<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Runs of one track, with the same runs split again by setup.
#[derive(Debug, Clone, Default)]
pub struct TrackBucket<'a> {
    pub runs: Vec<&'a Run>,
    pub setups: OrderedGroups<SetupKey, Vec<&'a Run>>,
}

/// Partition runs by track, then by setup within each track.
///
/// Both levels keep first-seen order; callers decide how tracks are sorted.
pub fn group_runs<'a, I>(runs: I) -> OrderedGroups<TrackKey, TrackBucket<'a>>
where
    I: IntoIterator<Item = &'a Run>,
{
    let mut tracks: OrderedGroups<TrackKey, TrackBucket<'a>> = OrderedGroups::new();
    for run in runs {
        let bucket = tracks.entry(TrackKey::for_target(run.input.target_distance_m));
        bucket.runs.push(run);
        bucket
            .setups
            .entry(SetupKey::for_input(&run.input))
            .push(run);
    }
    tracks
}

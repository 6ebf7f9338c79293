use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::snapshot::ClusterSnapshot;
use crate::topic::{Partition, Topic};

/// The topic/partition subset a user picked for reassignment.
///
/// Partition IDs are kept with set semantics: selecting the same
/// partition twice collapses to a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSelection {
    topics: BTreeMap<String, BTreeSet<i32>>,
}

impl PartitionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single partition of a topic to the selection.
    pub fn select(&mut self, topic: impl Into<String>, partition: i32) {
        self.topics.entry(topic.into()).or_default().insert(partition);
    }

    /// Add several partitions of a topic to the selection.
    pub fn select_many(
        &mut self,
        topic: impl Into<String>,
        partitions: impl IntoIterator<Item = i32>,
    ) {
        self.topics
            .entry(topic.into())
            .or_default()
            .extend(partitions);
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Selected topics with their partition IDs, in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<i32>)> {
        self.topics.iter().map(|(name, ids)| (name.as_str(), ids))
    }
}

/// One unit of planning work: a topic plus the selected subset of its
/// partitions, borrowed from the snapshot.
#[derive(Debug, Clone)]
pub struct TopicPartitions<'a> {
    pub topic: &'a Topic,
    pub partitions: Vec<&'a Partition>,
}

/// Resolve a raw selection into concrete topic/partition records.
///
/// Planning runs against a live, changing cluster, so this is best
/// effort: topics that no longer exist in the snapshot are dropped
/// rather than failing the whole operation, and selected partition IDs
/// that no longer exist simply do not match. Topics left with no
/// matching partitions are omitted.
///
/// The output is ordered by topic name with partitions in ascending ID
/// order; the planner's tie-breaking depends on this order being
/// reproducible for a given input.
pub fn resolve_selection<'a>(
    snapshot: &'a ClusterSnapshot,
    selection: &PartitionSelection,
) -> Vec<TopicPartitions<'a>> {
    let mut working_set = Vec::new();

    for (name, ids) in selection.iter() {
        let topic = match snapshot.topic(name) {
            Ok(topic) => topic,
            Err(_) => {
                debug!(topic = name, "selected topic not in snapshot, dropping");
                continue;
            }
        };

        let partitions: Vec<&Partition> = topic
            .partitions
            .values()
            .filter(|p| ids.contains(&p.id))
            .collect();

        if partitions.len() < ids.len() {
            debug!(
                topic = name,
                selected = ids.len(),
                matched = partitions.len(),
                "selection references partition IDs not present in snapshot",
            );
        }

        if partitions.is_empty() {
            continue;
        }

        working_set.push(TopicPartitions { topic, partitions });
    }

    working_set
}

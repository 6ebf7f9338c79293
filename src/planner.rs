use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::selection::TopicPartitions;
use crate::snapshot::ClusterSnapshot;
use crate::topic::Partition;

/// The computed replica assignment: topic name to partition ID to the
/// new replica list, leader first.
///
/// Covers exactly the partitions of the working set it was planned
/// for; partitions that were not selected are untouched and absent.
/// Immutable once returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReassignmentPlan {
    topics: BTreeMap<String, BTreeMap<i32, Vec<i32>>>,
}

impl ReassignmentPlan {
    pub(crate) fn new(topics: BTreeMap<String, BTreeMap<i32, Vec<i32>>>) -> Self {
        Self { topics }
    }

    /// Planned topics with their partition assignments, in ascending
    /// name order.
    pub fn topics(&self) -> impl Iterator<Item = (&str, &BTreeMap<i32, Vec<i32>>)> {
        self.topics
            .iter()
            .map(|(name, partitions)| (name.as_str(), partitions))
    }

    /// The planned replica list for a single partition.
    pub fn replicas(&self, topic: &str, partition: i32) -> Option<&[i32]> {
        self.topics
            .get(topic)?
            .get(&partition)
            .map(Vec::as_slice)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Total number of partitions covered by this plan.
    pub fn partition_count(&self) -> usize {
        self.topics.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// The largest replication factor across the working set, i.e. the
/// minimum number of target brokers a plan needs.
pub fn max_replication_factor(working_set: &[TopicPartitions<'_>]) -> usize {
    working_set
        .iter()
        .map(|tp| tp.topic.replication_factor.max(0) as usize)
        .max()
        .unwrap_or(0)
}

/// Computes a new replica assignment for a resolved working set.
///
/// One planner instance performs exactly one planning run: it owns a
/// private per-broker load tally seeded from the caller's size
/// estimate, mutates it while allocating partitions, and discards it
/// when [`plan`](Self::plan) returns. Planning is a bounded synchronous
/// computation over the immutable snapshot; separate runs never share
/// state.
#[derive(Debug)]
pub struct ReassignmentPlanner<'a> {
    snapshot: &'a ClusterSnapshot,

    /// Target brokers in caller order, duplicates removed.
    targets: Vec<i32>,

    /// Running total of bytes per target broker, existing plus newly
    /// planned.
    load: BTreeMap<i32, u64>,
}

impl<'a> ReassignmentPlanner<'a> {
    /// Create a planner for the given target brokers.
    ///
    /// `initial_load` is the per-broker byte estimate from
    /// [`broker_sizes`](crate::load::broker_sizes); target brokers
    /// without an entry start at zero. Every target ID must exist in
    /// the snapshot.
    pub fn new(
        snapshot: &'a ClusterSnapshot,
        target_brokers: &[i32],
        initial_load: BTreeMap<i32, u64>,
    ) -> Result<Self> {
        let mut targets = Vec::with_capacity(target_brokers.len());
        for &id in target_brokers {
            snapshot.broker(id)?;
            if !targets.contains(&id) {
                targets.push(id);
            }
        }

        let load = targets
            .iter()
            .map(|id| (*id, initial_load.get(id).copied().unwrap_or(0)))
            .collect();

        Ok(Self {
            snapshot,
            targets,
            load,
        })
    }

    /// Compute the replica assignment for every partition of the
    /// working set, in working-set order.
    ///
    /// Fails with [`Error::InsufficientBrokers`] when any topic's
    /// replication factor exceeds the target broker count, and with
    /// [`Error::InconsistentSnapshot`] when the working set references
    /// a topic the snapshot does not contain. No partial plan is ever
    /// returned.
    pub fn plan(mut self, working_set: &[TopicPartitions<'_>]) -> Result<ReassignmentPlan> {
        let actual = self.targets.len();
        let required = max_replication_factor(working_set);
        if actual < required {
            return Err(Error::InsufficientBrokers { required, actual });
        }

        let mut topics = BTreeMap::new();
        for tp in working_set {
            let name = &tp.topic.name;
            if self.snapshot.topic(name).is_err() {
                return Err(Error::InconsistentSnapshot {
                    topic: name.clone(),
                });
            }

            // The working set may contain topics the caller never ran
            // the precondition against, so the bound is re-checked per
            // topic.
            let factor = tp.topic.replication_factor.max(0) as usize;
            if actual < factor {
                return Err(Error::InsufficientBrokers {
                    required: factor,
                    actual,
                });
            }

            let mut assignments = BTreeMap::new();
            for partition in &tp.partitions {
                let replicas = self.place(partition, factor);

                for &broker in &replicas {
                    // A kept replica is already part of the estimator
                    // baseline; only newly placed replicas add load.
                    if !partition.replicas.contains(&broker) {
                        *self.load.entry(broker).or_insert(0) += partition.size_bytes;
                    }
                }

                debug!(
                    topic = %name,
                    partition = partition.id,
                    current = ?partition.replicas,
                    planned = ?replicas,
                    "planned replica set",
                );
                assignments.insert(partition.id, replicas);
            }

            topics.insert(name.clone(), assignments);
        }

        let plan = ReassignmentPlan::new(topics);
        info!(
            topics = plan.topic_count(),
            partitions = plan.partition_count(),
            target_brokers = self.targets.len(),
            "computed reassignment plan",
        );
        Ok(plan)
    }

    /// Choose `factor` distinct brokers for one partition.
    ///
    /// Target brokers already hosting a replica of this exact partition
    /// are taken first to minimize data movement, ranked among
    /// themselves by tracked load; remaining slots are filled from the
    /// rest of the targets, same ranking. Ties break on ascending
    /// broker ID. The final list is ordered by load so the leader slot
    /// goes to the least loaded chosen broker, whether or not it is an
    /// existing host.
    fn place(&self, partition: &Partition, factor: usize) -> Vec<i32> {
        let load_of = |id: i32| self.load.get(&id).copied().unwrap_or(0);

        let (mut hosts, mut rest): (Vec<i32>, Vec<i32>) = self
            .targets
            .iter()
            .copied()
            .partition(|id| partition.replicas.contains(id));
        hosts.sort_by_key(|&id| (load_of(id), id));
        rest.sort_by_key(|&id| (load_of(id), id));

        let mut chosen: Vec<i32> = hosts.into_iter().chain(rest).take(factor).collect();
        chosen.sort_by_key(|&id| (load_of(id), id));
        chosen
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::Lookup;
    use crate::load::broker_sizes;
    use crate::snapshot::Broker;
    use crate::topic::Topic;

    fn broker(id: i32) -> Broker {
        Broker {
            id,
            rack: None,
            storage_total_bytes: 100 << 30,
            storage_used_bytes: 0,
        }
    }

    fn topic(name: &str, factor: i16, partitions: &[(i32, &[i32], u64)]) -> Topic {
        Topic {
            name: name.to_string(),
            replication_factor: factor,
            cleanup_policy: None,
            partitions: partitions
                .iter()
                .map(|&(id, replicas, size_bytes)| {
                    (
                        id,
                        Partition {
                            id,
                            replicas: replicas.to_vec(),
                            size_bytes,
                        },
                    )
                })
                .collect(),
        }
    }

    fn working_set<'a>(snapshot: &'a ClusterSnapshot) -> Vec<TopicPartitions<'a>> {
        snapshot
            .topics()
            .map(|topic| TopicPartitions {
                topic,
                partitions: topic.partitions.values().collect(),
            })
            .collect()
    }

    #[test]
    fn unknown_target_broker_is_rejected() {
        let snapshot = ClusterSnapshot::new(vec![broker(0), broker(1)], vec![]);
        let result = ReassignmentPlanner::new(&snapshot, &[0, 9], BTreeMap::new());
        assert_matches!(result, Err(Error::NotFound(Lookup::Broker(9))));
    }

    #[test]
    fn duplicate_targets_collapse() {
        let snapshot = ClusterSnapshot::new(
            vec![broker(0), broker(1)],
            vec![topic("t", 2, &[(0, &[0, 1], 10)])],
        );
        let planner =
            ReassignmentPlanner::new(&snapshot, &[0, 0, 1, 1], broker_sizes(&snapshot)).unwrap();
        let plan = planner.plan(&working_set(&snapshot)).unwrap();
        assert_eq!(plan.replicas("t", 0), Some([0, 1].as_slice()));
    }

    #[test]
    fn replication_factor_exceeding_targets_fails() {
        let snapshot = ClusterSnapshot::new(
            vec![broker(0), broker(1)],
            vec![topic("wide", 3, &[(0, &[0, 1], 10)])],
        );

        let ws = working_set(&snapshot);
        let planner = ReassignmentPlanner::new(&snapshot, &[0, 1], BTreeMap::new()).unwrap();
        assert_matches!(
            planner.plan(&ws),
            Err(Error::InsufficientBrokers {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn foreign_topic_in_working_set_is_inconsistent() {
        let snapshot = ClusterSnapshot::new(vec![broker(0)], vec![]);
        let ghost = topic("ghost", 1, &[(0, &[0], 10)]);
        let ws = vec![TopicPartitions {
            topic: &ghost,
            partitions: ghost.partitions.values().collect(),
        }];

        let planner = ReassignmentPlanner::new(&snapshot, &[0], BTreeMap::new()).unwrap();
        assert_matches!(
            planner.plan(&ws),
            Err(Error::InconsistentSnapshot { topic }) if topic == "ghost"
        );
    }

    #[test]
    fn empty_working_set_yields_empty_plan() {
        let snapshot = ClusterSnapshot::new(vec![broker(0)], vec![]);
        let planner = ReassignmentPlanner::new(&snapshot, &[0], BTreeMap::new()).unwrap();
        let plan = planner.plan(&[]).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.partition_count(), 0);
    }

    #[test]
    fn leader_goes_to_least_loaded_chosen_broker() {
        // Broker 2 is idle; existing hosts 0 and 1 carry the partition
        // already. The leader slot must go to 2 even though it is not a
        // current host.
        let snapshot = ClusterSnapshot::new(
            vec![broker(0), broker(1), broker(2)],
            vec![topic("t", 3, &[(0, &[0, 1], 100)])],
        );
        let planner =
            ReassignmentPlanner::new(&snapshot, &[0, 1, 2], broker_sizes(&snapshot)).unwrap();
        let plan = planner.plan(&working_set(&snapshot)).unwrap();
        assert_eq!(plan.replicas("t", 0), Some([2, 0, 1].as_slice()));
    }
}

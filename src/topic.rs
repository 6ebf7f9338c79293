use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// The name of this topic.
    pub name: String,

    /// The number of replicas each partition of this topic keeps.
    pub replication_factor: i16,

    /// Cleanup/retention policy of the topic, passed through unchanged.
    pub cleanup_policy: Option<String>,

    /// Partition information, keyed by partition ID.
    pub partitions: BTreeMap<i32, Partition>,
}

impl Topic {
    /// The number of partitions of this topic.
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// The ID of this partition, unique within its topic.
    pub id: i32,

    /// The set of all brokers that host this partition, leader first.
    pub replicas: Vec<i32>,

    /// Estimated on-disk size of a single replica of this partition.
    pub size_bytes: u64,
}

impl Partition {
    /// The broker currently leading this partition, if any replica is
    /// assigned at all.
    pub fn leader(&self) -> Option<i32> {
        self.replicas.first().copied()
    }
}

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::error::{Error, Lookup, Result};
use crate::topic::{Partition, Topic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broker {
    /// Broker ID from the cluster metadata.
    pub id: i32,

    /// Rack identifier, if the broker reports one.
    pub rack: Option<String>,

    /// Total log dir capacity of the broker in bytes.
    pub storage_total_bytes: u64,

    /// Bytes of the log dir capacity currently in use.
    pub storage_used_bytes: u64,
}

impl Display for Broker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.rack {
            Some(rack) => write!(f, "broker {} (rack {rack})", self.id),
            None => write!(f, "broker {}", self.id),
        }
    }
}

/// Point-in-time view of brokers, topics and their partition replica
/// placement, captured once per planning run.
///
/// The snapshot is handed in by the caller; nothing here fetches or
/// refreshes cluster state. All lookups are indexed, built once at
/// construction. There are no mutation methods.
#[derive(Debug, Clone, Default)]
pub struct ClusterSnapshot {
    /// Brokers keyed by broker ID.
    brokers: BTreeMap<i32, Broker>,

    /// Topics keyed by topic name.
    topics: BTreeMap<String, Topic>,
}

impl ClusterSnapshot {
    pub fn new(brokers: Vec<Broker>, topics: Vec<Topic>) -> Self {
        Self {
            brokers: brokers.into_iter().map(|b| (b.id, b)).collect(),
            topics: topics.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    /// Returns the broker with the provided broker ID.
    pub fn broker(&self, id: i32) -> Result<&Broker> {
        self.brokers
            .get(&id)
            .ok_or(Error::NotFound(Lookup::Broker(id)))
    }

    /// Returns the topic with the provided name.
    pub fn topic(&self, name: &str) -> Result<&Topic> {
        self.topics
            .get(name)
            .ok_or_else(|| Error::NotFound(Lookup::Topic(name.to_string())))
    }

    /// Returns the partitions of the named topic, keyed by partition ID.
    pub fn partitions(&self, topic: &str) -> Result<&BTreeMap<i32, Partition>> {
        Ok(&self.topic(topic)?.partitions)
    }

    /// Returns a single partition of the named topic.
    pub fn partition(&self, topic: &str, id: i32) -> Result<&Partition> {
        self.topic(topic)?
            .partitions
            .get(&id)
            .ok_or_else(|| Error::NotFound(Lookup::Partition(topic.to_string(), id)))
    }

    /// All brokers, in ascending ID order.
    pub fn brokers(&self) -> impl Iterator<Item = &Broker> {
        self.brokers.values()
    }

    /// All topics, in ascending name order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics.values()
    }

    pub fn broker_count(&self) -> usize {
        self.brokers.len()
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn broker(id: i32) -> Broker {
        Broker {
            id,
            rack: None,
            storage_total_bytes: 10 << 30,
            storage_used_bytes: 0,
        }
    }

    fn snapshot() -> ClusterSnapshot {
        ClusterSnapshot::new(
            vec![broker(0), broker(1)],
            vec![Topic {
                name: "orders".to_string(),
                replication_factor: 2,
                cleanup_policy: None,
                partitions: BTreeMap::from([(
                    0,
                    Partition {
                        id: 0,
                        replicas: vec![0, 1],
                        size_bytes: 512,
                    },
                )]),
            }],
        )
    }

    #[test]
    fn broker_lookup() {
        let snapshot = snapshot();
        assert_eq!(snapshot.broker(1).unwrap().id, 1);
        assert_matches!(
            snapshot.broker(9),
            Err(Error::NotFound(Lookup::Broker(9)))
        );
    }

    #[test]
    fn topic_lookup() {
        let snapshot = snapshot();
        assert_eq!(snapshot.topic("orders").unwrap().replication_factor, 2);
        assert_matches!(
            snapshot.topic("ghost"),
            Err(Error::NotFound(Lookup::Topic(name))) if name == "ghost"
        );
    }

    #[test]
    fn partition_lookup() {
        let snapshot = snapshot();
        assert_eq!(snapshot.partitions("orders").unwrap().len(), 1);
        assert_eq!(snapshot.partition("orders", 0).unwrap().size_bytes, 512);
        assert_matches!(
            snapshot.partition("orders", 7),
            Err(Error::NotFound(Lookup::Partition(name, 7))) if name == "orders"
        );
    }
}

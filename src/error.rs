use std::fmt::{Display, Formatter};

use thiserror::Error;

/// The snapshot entity a failed lookup was about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A broker ID.
    Broker(i32),

    /// A topic name.
    Topic(String),

    /// A partition, identified by topic name and partition ID.
    Partition(String, i32),
}

impl Display for Lookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Broker(id) => write!(f, "broker {id}"),
            Self::Topic(name) => write!(f, "topic '{name}'"),
            Self::Partition(topic, id) => write!(f, "partition {id} of topic '{topic}'"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A lookup against the cluster snapshot failed.
    #[error("{0} not found in cluster snapshot")]
    NotFound(Lookup),

    /// Fewer target brokers were selected than the largest replication
    /// factor in the working set requires.
    ///
    /// Planning never works around this by under-replicating; the caller
    /// is expected to ask the user to select at least `required` brokers.
    #[error("not enough target brokers: replication factor requires at least {required}, got {actual}")]
    InsufficientBrokers { required: usize, actual: usize },

    /// The working set references a topic that is missing from the
    /// snapshot the planner was constructed with.
    #[error("working set references topic '{topic}' which is missing from the snapshot")]
    InconsistentSnapshot { topic: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

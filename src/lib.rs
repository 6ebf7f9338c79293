//! Replica reassignment planning for Kafka-compatible clusters.
//!
//! Given a point-in-time [`ClusterSnapshot`], a user's
//! [`PartitionSelection`] and a set of target brokers, this crate
//! computes a new replica assignment per selected partition that keeps
//! each topic's replication factor intact while balancing estimated
//! byte load across the targets. Existing replica hosts are preferred
//! to minimize data movement.
//!
//! The crate is a pure planning library: it does not talk to a
//! cluster, execute the reassignment or monitor progress. The caller
//! supplies the snapshot and submits the resulting
//! [`PartitionReassignmentRequest`] through its own API client.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use kafka_reassign::{
//!     broker_sizes, resolve_selection, Broker, ClusterSnapshot, Partition,
//!     PartitionReassignmentRequest, PartitionSelection, ReassignmentPlanner, Topic,
//! };
//!
//! # fn main() -> kafka_reassign::Result<()> {
//! let brokers = (0..4)
//!     .map(|id| Broker {
//!         id,
//!         rack: None,
//!         storage_total_bytes: 100 << 30,
//!         storage_used_bytes: 0,
//!     })
//!     .collect();
//! let topics = vec![Topic {
//!     name: "orders".to_string(),
//!     replication_factor: 3,
//!     cleanup_policy: None,
//!     partitions: BTreeMap::from([(
//!         0,
//!         Partition {
//!             id: 0,
//!             replicas: vec![0, 1, 2],
//!             size_bytes: 1 << 20,
//!         },
//!     )]),
//! }];
//! let snapshot = ClusterSnapshot::new(brokers, topics);
//!
//! let mut selection = PartitionSelection::new();
//! selection.select("orders", 0);
//!
//! let working_set = resolve_selection(&snapshot, &selection);
//! let planner = ReassignmentPlanner::new(&snapshot, &[0, 1, 2, 3], broker_sizes(&snapshot))?;
//! let plan = planner.plan(&working_set)?;
//!
//! let request = PartitionReassignmentRequest::from(&plan);
//! let _body = request.to_json().expect("serializable");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod load;
pub mod planner;
pub mod request;
pub mod selection;
pub mod snapshot;
pub mod topic;

pub use crate::error::{Error, Lookup, Result};
pub use crate::load::broker_sizes;
pub use crate::planner::{max_replication_factor, ReassignmentPlan, ReassignmentPlanner};
pub use crate::request::{PartitionAssignment, PartitionReassignmentRequest, TopicAssignment};
pub use crate::selection::{resolve_selection, PartitionSelection, TopicPartitions};
pub use crate::snapshot::{Broker, ClusterSnapshot};
pub use crate::topic::{Partition, Topic};

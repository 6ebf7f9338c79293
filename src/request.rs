use serde::{Deserialize, Serialize};

use crate::planner::ReassignmentPlan;

/// The payload handed to the cluster-control "start reassignment" API.
///
/// Pure transformation of a [`ReassignmentPlan`]; all invariants are
/// guaranteed upstream by the planner, so assembly cannot fail. This
/// crate only produces the payload, it never performs the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionReassignmentRequest {
    pub topics: Vec<TopicAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicAssignment {
    /// The topic name.
    pub topic_name: String,

    /// New assignments for each planned partition of the topic.
    pub partitions: Vec<PartitionAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionAssignment {
    /// The partition ID.
    pub partition_id: i32,

    /// The new replica list, leader first.
    pub replicas: Vec<i32>,
}

impl From<&ReassignmentPlan> for PartitionReassignmentRequest {
    fn from(plan: &ReassignmentPlan) -> Self {
        Self {
            topics: plan
                .topics()
                .map(|(name, partitions)| TopicAssignment {
                    topic_name: name.to_string(),
                    partitions: partitions
                        .iter()
                        .map(|(&partition_id, replicas)| PartitionAssignment {
                            partition_id,
                            replicas: replicas.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl PartitionReassignmentRequest {
    /// Serialize the request body for the HTTP call.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

use std::collections::BTreeMap;

use crate::snapshot::ClusterSnapshot;

/// Estimate the total replica bytes currently hosted per broker.
///
/// A partition with N replicas contributes its size to N brokers, once
/// each; leader and follower replicas weigh the same. Brokers hosting
/// nothing map to zero, and broker IDs that appear in a replica list
/// without a matching broker entry (the broker has since left the
/// cluster) still get an entry.
///
/// This is a pure function of the snapshot; callers recompute it before
/// each planning run so the numbers reflect current state.
pub fn broker_sizes(snapshot: &ClusterSnapshot) -> BTreeMap<i32, u64> {
    let mut sizes: BTreeMap<i32, u64> = snapshot.brokers().map(|b| (b.id, 0)).collect();

    for topic in snapshot.topics() {
        for partition in topic.partitions.values() {
            for &broker in &partition.replicas {
                *sizes.entry(broker).or_insert(0) += partition.size_bytes;
            }
        }
    }

    sizes
}

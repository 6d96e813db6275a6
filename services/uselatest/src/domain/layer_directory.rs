/// Layer directory
///
/// Snapshot of the layers available to the account in the current region,
/// as returned by ListLayers. Immutable once built.
use tracing::warn;

/// One layer available to the account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRecord {
    /// Layer name (`LayerName`)
    pub name: String,
    /// ARN of the latest version (`LatestMatchingVersion.LayerVersionArn`)
    pub latest_version_arn: String,
}

impl LayerRecord {
    pub fn new(name: impl Into<String>, latest_version_arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latest_version_arn: latest_version_arn.into(),
        }
    }
}

/// Ordered list of available layers
///
/// An empty directory is a valid state meaning no layers are provisioned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerDirectory {
    records: Vec<LayerRecord>,
}

impl LayerDirectory {
    pub fn new(records: Vec<LayerRecord>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Find the first record whose name equals `name` exactly
    pub fn find(&self, name: &str) -> Option<&LayerRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    /// Resolve a layer name to its latest version ARN
    ///
    /// Matching is exact and case-sensitive; the first match in directory
    /// order wins. When nothing matches the name itself is returned, so the
    /// template keeps whatever the author wrote.
    pub fn resolve_layer_name(&self, name: &str) -> String {
        match self.find(name) {
            Some(record) => record.latest_version_arn.clone(),
            None => {
                warn!(layer_name = name, "No available layer matching the name");
                name.to_string()
            }
        }
    }
}

impl FromIterator<LayerRecord> for LayerDirectory {
    fn from_iter<I: IntoIterator<Item = LayerRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

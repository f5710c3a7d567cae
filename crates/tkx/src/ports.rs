//! 🔌 PortSet — the guest list for ports. First come, first listed, no plus-ones.
//!
//! Every encoded key brings a port. Most ports show up more than once (that's
//! what load balancing looks like from the outside). The set keeps the first
//! arrival and ignores the repeats, and iterates in arrival order so the
//! `ports:` section comes out the same every run.
//!
//! 🧠 Knowledge graph:
//! - Built by: `extractor::extract_to`, one per pass, returned to the caller
//! - Read by: `emit::write_ports`
//! - Backed by `indexmap::IndexSet`: hash lookups, insertion-order iteration

use indexmap::IndexSet;

/// 🔌 Distinct `field4` values, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSet {
    ports: IndexSet<String>,
}

impl PortSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// ➕ Records `port`. Returns `true` if this is the first time we've seen it.
    pub fn insert(&mut self, port: &str) -> bool {
        // -- 🔍 membership check first so repeats don't pay for an allocation
        if self.ports.contains(port) {
            return false;
        }
        self.ports.insert(port.to_owned())
    }

    pub fn contains(&self, port: &str) -> bool {
        self.ports.contains(port)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// 🔄 Ports in the order they first appeared.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ports.iter().map(String::as_str)
    }
}

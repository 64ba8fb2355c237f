use indexmap::IndexMap;

use crate::error::{Error, Loc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub addr: u16,
    pub loc: Loc,
}

/// Labels in definition order.
#[derive(Debug, Default)]
pub struct Labels {
    labels: IndexMap<String, Label>,
}

impl Labels {
    pub fn new() -> Self {
        Labels {
            labels: IndexMap::new(),
        }
    }

    /// Record a new label. A name may only be defined once.
    pub fn insert(&mut self, name: String, addr: u16, loc: Loc) -> Result<(), Error> {
        if let Some(prev) = self.labels.get(&name) {
            log::debug!("`{}` already defined at {}", name, prev.loc);
            return Err(Error::RedefinedLabel(name));
        }
        log::debug!("label `{}` at 0x{:04X}", name, addr);
        self.labels.insert(name, Label { addr, loc });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Label> {
        self.labels.get(name)
    }

    pub fn get_val(&self, name: &str) -> Option<u16> {
        self.labels.get(name).map(|label| label.addr)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Label)> {
        self.labels.iter().map(|(name, label)| (name.as_str(), label))
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;

use crate::{error::Error, session::Session};

/// Label addresses of a finished session, written next to the program image.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolMap {
    pub origin: u16,
    pub size: usize,
    pub labels: IndexMap<String, u16>,
}

impl From<&Session> for SymbolMap {
    fn from(session: &Session) -> Self {
        SymbolMap {
            origin: session.origin(),
            size: session.image().len(),
            labels: session
                .labels()
                .iter()
                .map(|(name, label)| (name.to_string(), label.addr))
                .collect(),
        }
    }
}

impl SymbolMap {
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn write(&self, path: &str) -> Result<(), Error> {
        let file = File::create(path).map_err(|err| Error::FileWrite(path.to_string(), err))?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }
}

//! File records.
//!
//! Files are unrelated to users, banks and transactions; they only share the
//! world state.

use serde::{Deserialize, Serialize};

use crate::ids::FileId;
use crate::keys::Namespace;
use crate::record::Record;

/// A registered file and its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// File record identifier.
    pub id: FileId,

    /// Original file name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_name: String,

    /// Content hash.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,

    /// Registration time as supplied by the caller.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub time: String,
}

impl Record for File {
    type Id = FileId;
    const NAMESPACE: Namespace = Namespace::File;

    fn id(&self) -> &FileId {
        &self.id
    }
}

//! Per-function protocol UID assignment.
//!
//! UIDs are an explicit table built once from the full set of
//! `Interface.function` names, before any code generation. Each UID is a
//! stable content hash (FNV-1a, folded to 16 bits) so that adding or
//! removing unrelated functions never renumbers existing ones. A collision
//! aborts compilation with both colliding names.

use crate::error::{Error, GenResult};
use idl_types::Document;
use indexmap::IndexMap;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UidTable {
    entries: IndexMap<String, u16>,
}

impl UidTable {
    pub fn build(document: &Document) -> GenResult<UidTable> {
        let mut entries = IndexMap::new();
        let mut by_uid: HashMap<u16, String> = HashMap::new();

        for (interface_name, interface) in &document.interfaces {
            for function_name in interface.functions.keys() {
                let qualified = format!("{interface_name}.{function_name}");
                let uid = fold16(fnv1a32(qualified.as_bytes()));
                if let Some(existing) = by_uid.get(&uid) {
                    return Err(Error::UidCollision {
                        existing: existing.clone(),
                        incoming: qualified,
                        uid,
                    });
                }
                by_uid.insert(uid, qualified.clone());
                entries.insert(qualified, uid);
            }
        }

        Ok(UidTable { entries })
    }

    pub fn get(&self, interface: &str, function: &str) -> Option<u16> {
        self.entries.get(&format!("{interface}.{function}")).copied()
    }

    /// Entries in document declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.entries.iter().map(|(name, uid)| (name.as_str(), *uid))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn fnv1a32(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in bytes {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

fn fold16(hash: u32) -> u16 {
    ((hash >> 16) ^ (hash & 0xffff)) as u16
}

// file: src/dialect/table.rs
// version: 1.0.0
// guid: 8b2e4d61-0a3f-4c97-9e15-d6a7f3c2b084

//! Verb table: one row per operation, one column per dialect generation

use super::operation::Operation;
use super::DialectTag;

/// Executable every rendered command starts with
pub const LICHBD_BIN: &str = "lichbd";

/// Columns: Before375, Before403, Latest
const VERBS: &[(Operation, [&str; 3])] = &[
    (Operation::PoolCreate, ["mkpool", "pool create", "dir create"]),
    (Operation::PoolList, ["lspools", "pool ls", "dir ls"]),
    (Operation::PoolRemove, ["rmpool", "pool rm", "dir rm"]),
    (Operation::VolCreate, ["create", "vol create", "vol create"]),
    (Operation::VolCopy, ["copy", "vol copy", "vol copy"]),
    (Operation::VolImport, ["import", "vol import", "vol import"]),
    (Operation::VolImportStdin, ["import", "vol import", "vol import"]),
    (Operation::VolExport, ["export", "vol export", "vol export"]),
    (Operation::VolRemove, ["rm", "vol rm", "vol rm"]),
    (Operation::VolMove, ["mv", "vol mv", "vol mv"]),
    (Operation::VolInfo, ["info", "vol info", "vol info -C full"]),
    (Operation::SnapCreate, ["snap create", "snap create", "snap create"]),
    (Operation::SnapList, ["snap ls", "snap ls", "snap ls"]),
    (Operation::SnapRemove, ["snap remove", "snap rm", "snap rm"]),
    (Operation::SnapClone, ["clone", "snap clone", "snap clone"]),
    (Operation::SnapRollback, ["snap rollback", "snap rollback", "snap rollback"]),
    (Operation::SnapProtect, ["snap protect", "snap protect", "snap protect"]),
    (Operation::SnapUnprotect, ["snap unprotect", "snap unprotect", "snap unprotect"]),
];

/// Literal text emitted after the arguments, before any stderr redirect.
/// Deployed tooling matches these byte-for-byte.
const TRAILERS: &[(DialectTag, Operation, &str)] = &[
    (DialectTag::Latest, Operation::VolInfo, " "),
    (DialectTag::Latest, Operation::VolMove, " "),
];

pub(crate) fn verb(tag: DialectTag, op: Operation) -> Option<&'static str> {
    VERBS
        .iter()
        .find(|(row, _)| *row == op)
        .map(|(_, columns)| columns[tag.column()])
        .filter(|verb| !verb.is_empty())
}

pub(crate) fn trailer(tag: DialectTag, op: Operation) -> &'static str {
    TRAILERS
        .iter()
        .find(|(t, o, _)| *t == tag && *o == op)
        .map(|(_, _, text)| *text)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_has_a_verb_in_every_dialect() {
        for tag in DialectTag::ALL {
            for op in Operation::ALL {
                assert!(verb(tag, op).is_some(), "{:?} has no verb for {}", tag, op);
            }
        }
    }

    #[test]
    fn test_pool_verbs_per_generation() {
        assert_eq!(verb(DialectTag::Before375, Operation::PoolCreate), Some("mkpool"));
        assert_eq!(verb(DialectTag::Before403, Operation::PoolList), Some("pool ls"));
        assert_eq!(verb(DialectTag::Latest, Operation::PoolRemove), Some("dir rm"));
    }

    #[test]
    fn test_snapshot_verbs_renamed_after_first_generation() {
        assert_eq!(verb(DialectTag::Before375, Operation::SnapRemove), Some("snap remove"));
        assert_eq!(verb(DialectTag::Before403, Operation::SnapRemove), Some("snap rm"));
        assert_eq!(verb(DialectTag::Before375, Operation::SnapClone), Some("clone"));
        assert_eq!(verb(DialectTag::Latest, Operation::SnapClone), Some("snap clone"));
    }

    #[test]
    fn test_trailers_only_in_latest() {
        assert_eq!(trailer(DialectTag::Latest, Operation::VolInfo), " ");
        assert_eq!(trailer(DialectTag::Before403, Operation::VolInfo), "");
        assert_eq!(trailer(DialectTag::Latest, Operation::VolCreate), "");
    }
}

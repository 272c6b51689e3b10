// file: src/dialect/operation.rs
// version: 1.0.0
// guid: 3f1c9a27-5d84-4b6e-a0f2-7c9e1d4b8a63

//! Logical lichbd operations and their per-call parameters

use crate::error::{LichbdError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical operation, independent of the dialect that spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    PoolCreate,
    PoolList,
    PoolRemove,
    VolCreate,
    VolCopy,
    VolImport,
    VolImportStdin,
    VolExport,
    VolRemove,
    VolMove,
    VolInfo,
    SnapCreate,
    SnapList,
    SnapRemove,
    SnapClone,
    SnapRollback,
    SnapProtect,
    SnapUnprotect,
}

/// How an operation lays out its positional arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgLayout {
    /// No object argument; the path prefix alone is rendered when non-empty
    Bare,
    /// A single object path
    Path,
    /// A single object path followed by `--size <size>`
    PathWithSize,
    /// Source then destination
    SourceDest,
    /// `-` (stdin) then destination
    StdinDest,
}

impl Operation {
    /// Every operation, in table order
    pub const ALL: [Operation; 18] = [
        Operation::PoolCreate,
        Operation::PoolList,
        Operation::PoolRemove,
        Operation::VolCreate,
        Operation::VolCopy,
        Operation::VolImport,
        Operation::VolImportStdin,
        Operation::VolExport,
        Operation::VolRemove,
        Operation::VolMove,
        Operation::VolInfo,
        Operation::SnapCreate,
        Operation::SnapList,
        Operation::SnapRemove,
        Operation::SnapClone,
        Operation::SnapRollback,
        Operation::SnapProtect,
        Operation::SnapUnprotect,
    ];

    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::PoolCreate => "pool-create",
            Operation::PoolList => "pool-list",
            Operation::PoolRemove => "pool-remove",
            Operation::VolCreate => "vol-create",
            Operation::VolCopy => "vol-copy",
            Operation::VolImport => "vol-import",
            Operation::VolImportStdin => "vol-import-stdin",
            Operation::VolExport => "vol-export",
            Operation::VolRemove => "vol-remove",
            Operation::VolMove => "vol-move",
            Operation::VolInfo => "vol-info",
            Operation::SnapCreate => "snap-create",
            Operation::SnapList => "snap-list",
            Operation::SnapRemove => "snap-remove",
            Operation::SnapClone => "snap-clone",
            Operation::SnapRollback => "snap-rollback",
            Operation::SnapProtect => "snap-protect",
            Operation::SnapUnprotect => "snap-unprotect",
        }
    }

    pub fn layout(&self) -> ArgLayout {
        match self {
            Operation::PoolList => ArgLayout::Bare,
            Operation::VolCreate => ArgLayout::PathWithSize,
            Operation::VolCopy
            | Operation::VolImport
            | Operation::VolExport
            | Operation::VolMove
            | Operation::SnapClone => ArgLayout::SourceDest,
            Operation::VolImportStdin => ArgLayout::StdinDest,
            _ => ArgLayout::Path,
        }
    }

    /// Whether the rendered command discards stderr with `2>/dev/null`.
    ///
    /// Best-effort pool/volume operations and snapshot listing are silenced.
    /// Volume info, stdin import and the snapshot mutations keep stderr so
    /// their failure detail reaches the caller.
    pub fn suppresses_stderr(&self) -> bool {
        matches!(
            self,
            Operation::PoolCreate
                | Operation::PoolList
                | Operation::PoolRemove
                | Operation::VolCreate
                | Operation::VolCopy
                | Operation::VolImport
                | Operation::VolExport
                | Operation::VolRemove
                | Operation::VolMove
                | Operation::SnapList
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Operation {
    type Err = LichbdError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| LichbdError::unknown_operation(s))
    }
}

/// Per-call arguments. Operations read only the fields their layout needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationParams {
    pub path: Option<String>,
    pub src: Option<String>,
    pub dst: Option<String>,
    pub size: Option<u64>,
    pub protocol: Option<String>,
}

impl OperationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Object path (pool, volume, snapshot or image)
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn dst(mut self, dst: impl Into<String>) -> Self {
        self.dst = Some(dst.into());
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Transport protocol name passed as `-p` by legacy dialects
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub(crate) fn require_path(&self, op: Operation) -> Result<&str> {
        required(op, "path", self.path.as_deref())
    }

    pub(crate) fn require_src(&self, op: Operation) -> Result<&str> {
        required(op, "src", self.src.as_deref())
    }

    pub(crate) fn require_dst(&self, op: Operation) -> Result<&str> {
        required(op, "dst", self.dst.as_deref())
    }

    pub(crate) fn require_size(&self, op: Operation) -> Result<u64> {
        self.size
            .ok_or_else(|| LichbdError::missing_parameter(op.as_str(), "size"))
    }

    pub(crate) fn require_protocol(&self, op: Operation) -> Result<&str> {
        required(op, "protocol", self.protocol.as_deref())
    }
}

fn required<'a>(op: Operation, name: &'static str, value: Option<&'a str>) -> Result<&'a str> {
    value.ok_or_else(|| LichbdError::missing_parameter(op.as_str(), name))
}

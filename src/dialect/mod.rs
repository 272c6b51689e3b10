// file: src/dialect/mod.rs
// version: 1.0.0
// guid: c4a91e5d-27b3-4f08-8d6c-1e5b9a70f2d3

//! lichbd command dialects
//!
//! Three generations of the `lichbd` tool spell the same operations
//! differently. A [`Dialect`] is a static, immutable record describing one
//! generation; [`resolve_dialect`] picks the record for a numeric tool
//! version. Nothing in this module logs or performs I/O.

pub mod operation;
pub mod render;
pub mod stat;
pub mod table;

pub use operation::{ArgLayout, Operation, OperationParams};
pub use render::{
    build_command, build_command_named, build_command_with, interpolate, Interpolation,
};
pub use stat::{parse_cluster_stat, parse_used, ClusterStat};

use serde::{Deserialize, Serialize};

/// Internal version id of the Q4 2016 release; the first `pool`/`vol` syntax
pub const LICHBD_VERSION_Q4_2016: u64 = 359;

/// Internal version id of the Q4 2017 release; the first `dir` syntax
pub const LICHBD_VERSION_Q4_2017: u64 = 403;

const _: () = assert!(LICHBD_VERSION_Q4_2016 < LICHBD_VERSION_Q4_2017);

/// Version range a dialect covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialectTag {
    Before375,
    Before403,
    Latest,
}

impl DialectTag {
    pub const ALL: [DialectTag; 3] = [
        DialectTag::Before375,
        DialectTag::Before403,
        DialectTag::Latest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DialectTag::Before375 => "Before375",
            DialectTag::Before403 => "Before403",
            DialectTag::Latest => "Latest",
        }
    }

    pub(crate) fn column(&self) -> usize {
        match self {
            DialectTag::Before375 => 0,
            DialectTag::Before403 => 1,
            DialectTag::Latest => 2,
        }
    }
}

impl std::fmt::Display for DialectTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the `lich stat` capacity report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatFormat {
    /// Separate `capacity:` and `used:` lines
    Labelled,
    /// A single `default: <used>/<total>` line
    DefaultPool,
}

/// One generation of lichbd command syntax
#[derive(Debug, PartialEq, Eq)]
pub struct Dialect {
    tag: DialectTag,
    path_prefix: &'static str,
    protocol_flag: bool,
    snapshot_tree: bool,
    stat_format: StatFormat,
    qemu_path: &'static str,
    qemu_img_path: &'static str,
}

pub static BEFORE_375: Dialect = Dialect {
    tag: DialectTag::Before375,
    path_prefix: "",
    protocol_flag: true,
    snapshot_tree: false,
    stat_format: StatFormat::Labelled,
    qemu_path: "/opt/fusionstack/qemu/bin/qemu-system-x86_64",
    qemu_img_path: "/opt/fusionstack/qemu/bin/qemu-img",
};

pub static BEFORE_403: Dialect = Dialect {
    tag: DialectTag::Before403,
    path_prefix: "",
    protocol_flag: true,
    snapshot_tree: false,
    stat_format: StatFormat::Labelled,
    qemu_path: "/opt/fusionstack/qemu/bin/qemu-system-x86_64",
    qemu_img_path: "/opt/fusionstack/qemu/bin/qemu-img",
};

pub static LATEST: Dialect = Dialect {
    tag: DialectTag::Latest,
    path_prefix: "/default/nbd/",
    protocol_flag: false,
    snapshot_tree: true,
    stat_format: StatFormat::DefaultPool,
    qemu_path: "/opt/fusionstack/qemu-2.6/bin/qemu-system-x86_64",
    qemu_img_path: "/opt/fusionstack/qemu-2.6/bin/qemu-img",
};

/// Select the dialect for a lichbd version. Thresholds are exclusive upper
/// bounds, so a version equal to a threshold gets the later dialect.
pub fn resolve_dialect(version: u64) -> &'static Dialect {
    if version < LICHBD_VERSION_Q4_2016 {
        &BEFORE_375
    } else if version < LICHBD_VERSION_Q4_2017 {
        &BEFORE_403
    } else {
        &LATEST
    }
}

impl Dialect {
    /// Look up a dialect by tag
    pub fn from_tag(tag: DialectTag) -> &'static Dialect {
        match tag {
            DialectTag::Before375 => &BEFORE_375,
            DialectTag::Before403 => &BEFORE_403,
            DialectTag::Latest => &LATEST,
        }
    }

    pub fn tag(&self) -> DialectTag {
        self.tag
    }

    pub fn name(&self) -> &'static str {
        self.tag.as_str()
    }

    /// Namespace root prepended to every object path; empty for legacy tools
    pub fn pool_path(&self) -> &'static str {
        self.path_prefix
    }

    /// Whether commands carry `-p <protocol>`
    pub fn uses_protocol_flag(&self) -> bool {
        self.protocol_flag
    }

    pub fn supports_snapshot_tree(&self) -> bool {
        self.snapshot_tree
    }

    pub fn stat_format(&self) -> StatFormat {
        self.stat_format
    }

    /// Verb for an operation, without the leading `lichbd`
    pub fn verb(&self, op: Operation) -> Option<&'static str> {
        table::verb(self.tag, op)
    }

    /// Path to the bundled `qemu-system-x86_64`
    pub fn qemu_path(&self) -> &'static str {
        self.qemu_path
    }

    /// Path to the bundled `qemu-img`
    pub fn qemu_img_path(&self) -> &'static str {
        self.qemu_img_path
    }

    /// Serializable view for reporting
    pub fn summary(&self) -> DialectSummary {
        DialectSummary {
            dialect: self.tag,
            pool_path: self.path_prefix.to_string(),
            protocol_flag: self.protocol_flag,
            supports_snapshot_tree: self.snapshot_tree,
            stat_format: self.stat_format,
            qemu_path: self.qemu_path.to_string(),
            qemu_img_path: self.qemu_img_path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialectSummary {
    pub dialect: DialectTag,
    pub pool_path: String,
    pub protocol_flag: bool,
    pub supports_snapshot_tree: bool,
    pub stat_format: StatFormat,
    pub qemu_path: String,
    pub qemu_img_path: String,
}

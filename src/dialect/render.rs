// file: src/dialect/render.rs
// version: 1.0.0
// guid: 5e07b3c8-91d2-4a6f-b4e8-2f6c0d9a1b57

//! Command rendering

use super::operation::{ArgLayout, Operation, OperationParams};
use super::table::{self, LICHBD_BIN};
use super::Dialect;
use crate::error::{LichbdError, Result};
use serde::{Deserialize, Serialize};

const STDERR_SUPPRESSION: &str = " 2>/dev/null";

/// How caller-supplied values are placed into the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    /// Inserted as-is. Matches what deployed tooling expects; callers must
    /// only pass opaque identifiers.
    #[default]
    Verbatim,
    /// POSIX single-quoted whenever the value contains anything outside
    /// `[A-Za-z0-9_./:@%+=,-]`
    ShellQuoted,
}

/// Render one argument. Every caller-supplied value passes through here.
pub fn interpolate(prefix: &str, value: &str, mode: Interpolation) -> String {
    let joined = format!("{}{}", prefix, value);
    match mode {
        Interpolation::Verbatim => joined,
        Interpolation::ShellQuoted => shell_quote(&joined),
    }
}

fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_./:@%+=,-".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

/// Render `op` for `dialect` with verbatim interpolation
pub fn build_command(dialect: &Dialect, op: Operation, params: &OperationParams) -> Result<String> {
    build_command_with(dialect, op, params, Interpolation::Verbatim)
}

/// Render an operation given by its kebab-case name
pub fn build_command_named(
    dialect: &Dialect,
    name: &str,
    params: &OperationParams,
) -> Result<String> {
    let op: Operation = name.parse()?;
    build_command(dialect, op, params)
}

/// Render `op` for `dialect`:
/// `lichbd <verb> <args>[ -p <protocol>][<trailer>][ 2>/dev/null]`
pub fn build_command_with(
    dialect: &Dialect,
    op: Operation,
    params: &OperationParams,
    mode: Interpolation,
) -> Result<String> {
    let verb = dialect
        .verb(op)
        .ok_or_else(|| LichbdError::unknown_operation(op.as_str()))?;
    let prefix = dialect.pool_path();
    let object = |value: &str| interpolate(prefix, value, mode);

    let mut parts = vec![LICHBD_BIN.to_string(), verb.to_string()];
    match op.layout() {
        ArgLayout::Bare => {
            if !prefix.is_empty() {
                parts.push(object(""));
            }
        }
        ArgLayout::Path => parts.push(object(params.require_path(op)?)),
        ArgLayout::PathWithSize => {
            parts.push(object(params.require_path(op)?));
            parts.push("--size".to_string());
            parts.push(params.require_size(op)?.to_string());
        }
        ArgLayout::SourceDest => {
            parts.push(object(params.require_src(op)?));
            parts.push(object(params.require_dst(op)?));
        }
        ArgLayout::StdinDest => {
            parts.push("-".to_string());
            parts.push(object(params.require_dst(op)?));
        }
    }

    if dialect.uses_protocol_flag() {
        parts.push("-p".to_string());
        parts.push(interpolate("", params.require_protocol(op)?, mode));
    }

    let mut command = parts.join(" ");
    command.push_str(table::trailer(dialect.tag(), op));
    if op.suppresses_stderr() {
        command.push_str(STDERR_SUPPRESSION);
    }
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{resolve_dialect, BEFORE_375, BEFORE_403, LATEST};

    fn path(p: &str) -> OperationParams {
        OperationParams::new().path(p).protocol("nbd")
    }

    fn pair(src: &str, dst: &str) -> OperationParams {
        OperationParams::new().src(src).dst(dst).protocol("nbd")
    }

    #[test]
    fn test_latest_pool_create() {
        let params = OperationParams::new().path("p1");
        let cmd = build_command(&LATEST, Operation::PoolCreate, &params).unwrap();
        assert_eq!(cmd, "lichbd dir create /default/nbd/p1 2>/dev/null");
    }

    #[test]
    fn test_before403_vol_create() {
        let params = OperationParams::new().path("v1").size(1024).protocol("nbd");
        let cmd = build_command(&BEFORE_403, Operation::VolCreate, &params).unwrap();
        assert_eq!(cmd, "lichbd vol create v1 --size 1024 -p nbd 2>/dev/null");
    }

    #[test]
    fn test_latest_vol_info_keeps_stderr() {
        let params = OperationParams::new().path("v1");
        let cmd = build_command(&LATEST, Operation::VolInfo, &params).unwrap();
        assert_eq!(cmd, "lichbd vol info -C full /default/nbd/v1 ");
        assert!(!cmd.contains("2>/dev/null"));
    }

    #[test]
    fn test_latest_snap_create() {
        let params = OperationParams::new().path("p/v@s1");
        let cmd = build_command(&LATEST, Operation::SnapCreate, &params).unwrap();
        assert_eq!(cmd, "lichbd snap create /default/nbd/p/v@s1");
    }

    #[test]
    fn test_before375_commands() {
        let cases = [
            (Operation::PoolCreate, path("p1"), "lichbd mkpool p1 -p nbd 2>/dev/null"),
            (Operation::PoolList, path("ignored"), "lichbd lspools -p nbd 2>/dev/null"),
            (Operation::PoolRemove, path("p1"), "lichbd rmpool p1 -p nbd 2>/dev/null"),
            (Operation::VolCopy, pair("a", "b"), "lichbd copy a b -p nbd 2>/dev/null"),
            (
                Operation::VolImport,
                pair("/tmp/f", "p/v"),
                "lichbd import /tmp/f p/v -p nbd 2>/dev/null",
            ),
            (
                Operation::VolImportStdin,
                OperationParams::new().dst("p/v").protocol("nbd"),
                "lichbd import - p/v -p nbd",
            ),
            (
                Operation::VolExport,
                pair("p/v", "/tmp/f"),
                "lichbd export p/v /tmp/f -p nbd 2>/dev/null",
            ),
            (Operation::VolRemove, path("p/v"), "lichbd rm p/v -p nbd 2>/dev/null"),
            (Operation::VolMove, pair("p/a", "p/b"), "lichbd mv p/a p/b -p nbd 2>/dev/null"),
            (Operation::VolInfo, path("p/v"), "lichbd info p/v -p nbd"),
            (Operation::SnapCreate, path("p/v@s"), "lichbd snap create p/v@s -p nbd"),
            (Operation::SnapList, path("p/v"), "lichbd snap ls p/v -p nbd 2>/dev/null"),
            (Operation::SnapRemove, path("p/v@s"), "lichbd snap remove p/v@s -p nbd"),
            (Operation::SnapClone, pair("p/v@s", "p/c"), "lichbd clone p/v@s p/c -p nbd"),
            (Operation::SnapRollback, path("p/v@s"), "lichbd snap rollback p/v@s -p nbd"),
            (Operation::SnapProtect, path("p/v@s"), "lichbd snap protect p/v@s -p nbd"),
            (Operation::SnapUnprotect, path("p/v@s"), "lichbd snap unprotect p/v@s -p nbd"),
        ];

        for (op, params, expected) in cases {
            assert_eq!(build_command(&BEFORE_375, op, &params).unwrap(), expected, "{}", op);
        }
    }

    #[test]
    fn test_latest_commands() {
        let cases = [
            (
                Operation::PoolList,
                OperationParams::new(),
                "lichbd dir ls /default/nbd/ 2>/dev/null",
            ),
            (Operation::PoolRemove, path("p1"), "lichbd dir rm /default/nbd/p1 2>/dev/null"),
            (
                Operation::VolCopy,
                pair("p/a", "p/b"),
                "lichbd vol copy /default/nbd/p/a /default/nbd/p/b 2>/dev/null",
            ),
            (
                Operation::VolImportStdin,
                OperationParams::new().dst("p/v"),
                "lichbd vol import - /default/nbd/p/v",
            ),
            (
                Operation::VolMove,
                pair("p/a", "p/b"),
                "lichbd vol mv /default/nbd/p/a /default/nbd/p/b  2>/dev/null",
            ),
            (Operation::SnapRemove, path("p/v@s"), "lichbd snap rm /default/nbd/p/v@s"),
            (
                Operation::SnapClone,
                pair("p/v@s", "p/c"),
                "lichbd snap clone /default/nbd/p/v@s /default/nbd/p/c",
            ),
            (Operation::SnapList, path("p/v"), "lichbd snap ls /default/nbd/p/v 2>/dev/null"),
        ];

        for (op, params, expected) in cases {
            assert_eq!(build_command(&LATEST, op, &params).unwrap(), expected, "{}", op);
        }
    }

    #[test]
    fn test_protocol_flag_only_in_legacy_dialects() {
        for op in Operation::ALL {
            let params = OperationParams::new()
                .path("p/v")
                .src("p/a")
                .dst("p/b")
                .size(1)
                .protocol("iscsi");
            let legacy = build_command(&BEFORE_403, op, &params).unwrap();
            let latest = build_command(&LATEST, op, &params).unwrap();
            assert!(legacy.contains(" -p iscsi"), "{}", legacy);
            assert!(!latest.contains(" -p "), "{}", latest);
            assert_eq!(legacy.ends_with("2>/dev/null"), op.suppresses_stderr());
            assert_eq!(latest.ends_with("2>/dev/null"), op.suppresses_stderr());
        }
    }

    #[test]
    fn test_missing_parameters() {
        let only_path = OperationParams::new().path("v1");
        let err = build_command(&LATEST, Operation::VolCreate, &only_path).unwrap_err();
        assert!(matches!(err, LichbdError::MissingParameter { parameter: "size", .. }));

        let err = build_command(&BEFORE_375, Operation::VolRemove, &only_path).unwrap_err();
        assert!(matches!(err, LichbdError::MissingParameter { parameter: "protocol", .. }));

        let only_src = OperationParams::new().src("a");
        let err = build_command(&LATEST, Operation::VolCopy, &only_src).unwrap_err();
        assert!(matches!(err, LichbdError::MissingParameter { parameter: "dst", .. }));
    }

    #[test]
    fn test_build_by_name() {
        let params = OperationParams::new().path("p1");
        let cmd = build_command_named(&LATEST, "pool-create", &params).unwrap();
        assert_eq!(cmd, "lichbd dir create /default/nbd/p1 2>/dev/null");

        let err = build_command_named(&LATEST, "pool-destroy", &params).unwrap_err();
        assert!(matches!(err, LichbdError::UnknownOperation(_)));
    }

    #[test]
    fn test_same_version_renders_identically() {
        let params = OperationParams::new().path("p/v").size(4096).protocol("nbd");
        for version in [0, 358, 359, 402, 403, 1000] {
            let dialect = resolve_dialect(version);
            let first = build_command(dialect, Operation::VolCreate, &params).unwrap();
            let second = build_command(dialect, Operation::VolCreate, &params).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_shell_quoted_interpolation() {
        assert_eq!(interpolate("", "pool-1/vol_2", Interpolation::ShellQuoted), "pool-1/vol_2");
        assert_eq!(interpolate("", "a b", Interpolation::ShellQuoted), "'a b'");
        assert_eq!(interpolate("", "x;rm -rf /", Interpolation::ShellQuoted), "'x;rm -rf /'");
        assert_eq!(interpolate("", "it's", Interpolation::ShellQuoted), "'it'\\''s'");
        assert_eq!(interpolate("", "", Interpolation::ShellQuoted), "''");
        assert_eq!(
            interpolate("/default/nbd/", "v 1", Interpolation::Verbatim),
            "/default/nbd/v 1"
        );
    }

    #[test]
    fn test_shell_quoted_command() {
        let params = OperationParams::new().path("p/$(id)");
        let cmd =
            build_command_with(&LATEST, Operation::VolRemove, &params, Interpolation::ShellQuoted)
                .unwrap();
        assert_eq!(cmd, "lichbd vol rm '/default/nbd/p/$(id)' 2>/dev/null");
    }
}

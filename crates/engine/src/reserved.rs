//! Runtime option names that must never be supplied as pipeline parameters.
//!
//! A user typing `--resume` instead of `-resume` ends up with a pipeline
//! parameter called `resume` and a run that silently ignores their intent.
//! Any supplied parameter whose name appears here is reported as a collision.

/// Options of the base launcher command and of its `run` subcommand.
pub const RESERVED_OPTIONS: &[&str] = &[
    // base command
    "bg",
    "c",
    "C",
    "config",
    "d",
    "D",
    "dockerize",
    "h",
    "log",
    "q",
    "quiet",
    "syslog",
    "v",
    "version",
    // run command
    "ansi",
    "ansi-log",
    "bucket-dir",
    "cache",
    "dsl1",
    "dsl2",
    "dump-channels",
    "dump-hashes",
    "E",
    "entry",
    "latest",
    "lib",
    "main-script",
    "N",
    "name",
    "offline",
    "params-file",
    "pi",
    "plugins",
    "poll-interval",
    "pool-size",
    "profile",
    "ps",
    "qs",
    "queue-size",
    "r",
    "resume",
    "revision",
    "stdin",
    "stub",
    "stub-run",
    "test",
    "w",
    "with-charliecloud",
    "with-conda",
    "with-dag",
    "with-docker",
    "with-mpi",
    "with-notification",
    "with-podman",
    "with-report",
    "with-singularity",
    "with-timeline",
    "with-tower",
    "with-trace",
    "with-weblog",
    "without-docker",
    "without-podman",
    "work-dir",
];

/// Returns `true` when `name` is a reserved runtime option. Matching is exact
/// and case-sensitive (`-c` and `-C` are different options).
pub fn contains(name: &str) -> bool {
    RESERVED_OPTIONS.contains(&name)
}

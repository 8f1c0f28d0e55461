//! Gitlet commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - Parent commit ID(s) (for history, the first parent is the mainline)
//! - A timestamp with its UTC offset
//! - The complete map of tracked paths to blob IDs
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! parent <parent-sha>
//! date <unix-seconds> <timezone>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Message of the root commit every repository starts from
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Snapshot of tracked paths, ordered by path
pub type TrackedFiles = BTreeMap<PathBuf, ObjectId>;

/// Gitlet commit object
///
/// Represents a complete snapshot of the tracked files with metadata.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the initial commit, two for merge commits)
    parents: Vec<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    tracked: TrackedFiles,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        tracked: TrackedFiles,
        message: String,
    ) -> Self {
        Commit {
            parents,
            timestamp,
            tracked,
            message,
        }
    }

    /// The root commit: no parents, nothing tracked, dated at the Unix epoch
    ///
    /// Being fully deterministic, it gets the same id in every repository.
    pub fn initial() -> Self {
        let epoch = DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset();

        Commit::new(
            Vec::new(),
            epoch,
            TrackedFiles::new(),
            INITIAL_COMMIT_MESSAGE.to_string(),
        )
    }

    /// Timestamp for a new commit
    ///
    /// Reads `GITLET_COMMIT_DATE` (`%Y-%m-%d %H:%M:%S %z`) when set, otherwise
    /// uses the current local time.
    pub fn timestamp_from_env() -> anyhow::Result<DateTime<FixedOffset>> {
        match std::env::var(COMMIT_DATE_ENV) {
            Ok(date) => DateTime::parse_from_str(&date, COMMIT_DATE_FORMAT)
                .with_context(|| format!("Invalid {COMMIT_DATE_ENV} value: {date}")),
            Err(_) => Ok(chrono::Local::now().fixed_offset()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First (mainline) parent
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn tracked(&self) -> &TrackedFiles {
        &self.tracked
    }

    /// Blob tracked at `path`, if any
    pub fn blob_for(&self, path: &Path) -> Option<&ObjectId> {
        self.tracked.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.tracked.contains_key(path)
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 01 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %d %H:%M:%S %Y %z").to_string()
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, blob_oid) in &self.tracked {
            lines.push(format!("file {} {}", blob_oid.as_ref(), path_to_slash(path)));
        }

        lines
    }
}

/// Render a repository-relative path with `/` separators
///
/// Stored paths must not depend on the platform that wrote them.
pub fn path_to_slash(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn parse_offset(offset: &str) -> anyhow::Result<FixedOffset> {
    let (sign, digits) = match offset.split_at_checked(1) {
        Some(("+", digits)) => (1, digits),
        Some(("-", digits)) => (-1, digits),
        _ => anyhow::bail!("Invalid timezone {offset}"),
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        anyhow::bail!("Invalid timezone {offset}");
    }

    let hours: i32 = digits[..2].parse()?;
    let minutes: i32 = digits[2..].parse()?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("Timezone out of range {offset}"))
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = self.header_lines();
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        Ok(Bytes::from(object_content.join("\n")))
    }
}

impl Unpackable for Commit {
    fn deserialize(bytes: Bytes) -> anyhow::Result<Self> {
        let content = String::from_utf8(bytes.to_vec())
            .context("Invalid commit object: content is not UTF-8")?;
        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut tracked = TrackedFiles::new();

        for line in header.lines() {
            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(date) = line.strip_prefix("date ") {
                let (seconds, offset) = date
                    .split_once(' ')
                    .context("Invalid commit object: invalid date line")?;
                let seconds = seconds
                    .parse::<i64>()
                    .context("Invalid commit object: invalid timestamp")?;
                let offset = parse_offset(offset)?;
                let datetime = DateTime::from_timestamp(seconds, 0)
                    .context("Invalid commit object: timestamp out of range")?;

                timestamp = Some(datetime.with_timezone(&offset));
            } else if let Some(file) = line.strip_prefix("file ") {
                let (blob_oid, path) = file
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                tracked.insert(
                    PathBuf::from(path),
                    ObjectId::try_parse(blob_oid.to_string())?,
                );
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing date line")?;

        Ok(Self::new(parents, timestamp, tracked, message.to_string()))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = self.header_lines();
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

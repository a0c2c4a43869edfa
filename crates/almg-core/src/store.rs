//! JSON persistence for sessions.
//!
//! Loading is strict: a document is decoded into [`SessionDocument`], checked
//! point by point, and only then turned into a [`Session`]. Nothing is
//! returned for a document that fails any check.

use crate::error::{AlmgError, Result};
use crate::session::{Point, Session};
use crate::summary::Summary;
use crate::zone::{classify, validate_coordinate};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk shape of a session, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionDocument {
    session_id: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    trajectory: Vec<Point>,
    summary: Summary,
}

impl TryFrom<SessionDocument> for Session {
    type Error = AlmgError;

    fn try_from(doc: SessionDocument) -> Result<Self> {
        if doc.session_id.trim().is_empty() {
            return Err(AlmgError::MalformedSession("session_id is empty".into()));
        }

        for (idx, point) in doc.trajectory.iter().enumerate() {
            let expected = idx as u32 + 1;
            if point.turn != expected {
                return Err(AlmgError::MalformedSession(format!(
                    "turn numbers must run 1, 2, 3, ... in order; found turn {} at position {}",
                    point.turn, expected
                )));
            }
            for (axis, value) in [('x', point.x), ('y', point.y), ('z', point.z)] {
                validate_coordinate(axis, value).map_err(|e| {
                    AlmgError::MalformedSession(format!("turn {}: {}", point.turn, e))
                })?;
            }
            let zone = classify(point.x, point.y, point.z)?;
            if zone != point.zone {
                return Err(AlmgError::MalformedSession(format!(
                    "turn {}: zone {} does not match coordinates ({}, {}, {}), which classify as {}",
                    point.turn, point.zone, point.x, point.y, point.z, zone
                )));
            }
        }

        let session = Session::from_parts(doc.session_id, doc.model, doc.created_at, doc.trajectory);
        if *session.summary() != doc.summary {
            return Err(AlmgError::MalformedSession(format!(
                "summary does not match trajectory: stored {:?}, computed {:?}",
                doc.summary,
                session.summary()
            )));
        }
        Ok(session)
    }
}

/// Parse and validate a session document.
pub fn from_json(json: &str) -> Result<Session> {
    let doc: SessionDocument =
        serde_json::from_str(json).map_err(|e| AlmgError::MalformedSession(e.to_string()))?;
    Session::try_from(doc)
}

/// Render a session as pretty-printed JSON.
pub fn to_json(session: &Session) -> Result<String> {
    Ok(serde_json::to_string_pretty(session)?)
}

/// Load a session from a JSON file.
pub fn load(path: &Path) -> Result<Session> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AlmgError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    let session = from_json(&contents)?;
    info!(
        "Loaded session {} ({} points) from {}",
        session.session_id(),
        session.len(),
        path.display()
    );
    Ok(session)
}

/// Write a session to `path`.
///
/// The document goes to a sibling temp file first and is renamed into
/// place once flushed and synced, so `path` never holds partial JSON.
pub fn save(session: &Session, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_failure(parent, e))?;
    }

    let temp_path = temp_path_for(path);
    if let Err(e) = write_document(session, &temp_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_failure(path, e)
    })?;

    info!(
        "Saved session {} ({} points) to {}",
        session.session_id(),
        session.len(),
        path.display()
    );
    Ok(())
}

/// File name used by the interactive `export` command.
pub fn export_file_name(session: &Session) -> String {
    format!("almg_session_{}.json", session.session_id())
}

fn write_document(session: &Session, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| write_failure(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, session).map_err(|e| {
        if e.is_io() {
            write_failure(path, e.into())
        } else {
            AlmgError::Serialization(e)
        }
    })?;
    writer
        .write_all(b"\n")
        .map_err(|e| write_failure(path, e))?;

    let file = writer
        .into_inner()
        .map_err(|e| write_failure(path, e.into_error()))?;
    file.sync_all().map_err(|e| write_failure(path, e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_failure(path: &Path, source: std::io::Error) -> AlmgError {
    AlmgError::FileWriteFailure {
        path: path.to_path_buf(),
        source,
    }
}

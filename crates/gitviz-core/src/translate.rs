// Payload -> stored representation
//
// Each handled event kind is translated into a NewEventRecord: the repo,
// actor, action, and a per-kind summary object that the activity view is
// built from. The logical identity of the event is a content digest, so
// redeliveries of the same payload collapse to one record.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::error::{Result, WebhookError};
use crate::event::EventKind;
use crate::payload::*;

/// Derived record for one logical event, ready to be upserted.
#[derive(Debug, Clone)]
pub struct NewEventRecord {
    /// Content-derived identity; stable across redeliveries
    pub event_key: String,
    pub kind: EventKind,
    /// Repository full name, when the payload carries one
    pub repo: Option<String>,
    /// Login of the account that triggered the event
    pub sender: Option<String>,
    /// Sub-action for kinds that have one (pull_request, repository)
    pub action: Option<String>,
    /// Per-kind summary of the activity
    pub summary: Value,
}

/// Compute the logical event key: SHA-256 over the event kind and the raw
/// payload bytes. The delivery UUID deliberately plays no part, so a
/// redelivered payload hashes to the same key.
pub fn event_key(kind: EventKind, body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(kind.as_str().as_bytes());
    hasher.update(b"\n");
    hasher.update(body);
    hex::encode(hasher.finalize())
}

/// Translate a raw payload into the stored representation for its kind.
pub fn translate(kind: EventKind, body: &[u8]) -> Result<NewEventRecord> {
    let key = event_key(kind, body);
    match kind {
        EventKind::Ping => {
            let p: PingPayload = parse(body)?;
            Ok(NewEventRecord {
                event_key: key,
                kind,
                repo: p.repository.map(|r| r.full_name),
                sender: None,
                action: None,
                summary: json!({ "zen": p.zen, "hook_id": p.hook_id }),
            })
        }
        EventKind::Repository => {
            let p: RepositoryPayload = parse(body)?;
            Ok(NewEventRecord {
                event_key: key,
                kind,
                repo: Some(p.repository.full_name),
                sender: p.sender.map(|a| a.login),
                action: Some(p.action.clone()),
                summary: json!({ "action": p.action, "name": p.repository.name }),
            })
        }
        EventKind::Create => {
            let p: CreatePayload = parse(body)?;
            Ok(NewEventRecord {
                event_key: key,
                kind,
                repo: Some(p.repository.full_name),
                sender: p.sender.map(|a| a.login),
                action: None,
                summary: json!({ "ref": p.git_ref, "ref_type": p.ref_type }),
            })
        }
        EventKind::Delete => {
            let p: DeletePayload = parse(body)?;
            Ok(NewEventRecord {
                event_key: key,
                kind,
                repo: Some(p.repository.full_name),
                sender: p.sender.map(|a| a.login),
                action: None,
                summary: json!({ "ref": p.git_ref, "ref_type": p.ref_type }),
            })
        }
        EventKind::Push => {
            let p: PushPayload = parse(body)?;
            let added: usize = p.commits.iter().map(|c| c.added.len()).sum();
            let modified: usize = p.commits.iter().map(|c| c.modified.len()).sum();
            let removed: usize = p.commits.iter().map(|c| c.removed.len()).sum();
            let sender = p
                .sender
                .map(|a| a.login)
                .unwrap_or_else(|| p.pusher.name.clone());
            Ok(NewEventRecord {
                event_key: key,
                kind,
                repo: Some(p.repository.full_name),
                sender: Some(sender),
                action: None,
                summary: json!({
                    "ref": p.git_ref,
                    "before": p.before,
                    "after": p.after,
                    "commits": p.commits.len(),
                    "files_added": added,
                    "files_modified": modified,
                    "files_removed": removed,
                }),
            })
        }
        EventKind::PullRequest => {
            let p: PullRequestPayload = parse(body)?;
            Ok(NewEventRecord {
                event_key: key,
                kind,
                repo: Some(p.repository.full_name),
                sender: p.sender.map(|a| a.login),
                action: Some(p.action.clone()),
                summary: json!({
                    "action": p.action,
                    "number": p.number,
                    "title": p.pull_request.title,
                    "state": p.pull_request.state,
                    "merged": p.pull_request.merged,
                }),
            })
        }
        EventKind::Status => {
            let p: StatusPayload = parse(body)?;
            Ok(NewEventRecord {
                event_key: key,
                kind,
                repo: Some(p.repository.full_name),
                sender: p.sender.map(|a| a.login),
                action: None,
                summary: json!({
                    "sha": p.sha,
                    "state": p.state,
                    "context": p.context,
                }),
            })
        }
    }
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| WebhookError::payload(e.to_string()))
}

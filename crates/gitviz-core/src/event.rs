// Event kinds handled by the receiver

use std::fmt;

/// The fixed set of GitHub event types the receiver handles.
///
/// The `X-GitHub-Event` header carries the wire name. Anything else -
/// including real GitHub event names we have no handler for - parses to
/// `None` and the endpoint answers 501.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Webhook installation test event
    Ping,
    /// Repository created, deleted, archived, etc.
    Repository,
    /// Branch or tag created
    Create,
    /// Branch or tag deleted
    Delete,
    /// Commits pushed to a ref
    Push,
    /// Pull request opened, closed, assigned, labeled, synchronized, commented
    PullRequest,
    /// Commit status updated
    Status,
}

impl EventKind {
    /// Parse the `X-GitHub-Event` header value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ping" => Some(EventKind::Ping),
            "repository" => Some(EventKind::Repository),
            "create" => Some(EventKind::Create),
            "delete" => Some(EventKind::Delete),
            "push" => Some(EventKind::Push),
            "pull_request" => Some(EventKind::PullRequest),
            "status" => Some(EventKind::Status),
            _ => None,
        }
    }

    /// Wire name as sent in the `X-GitHub-Event` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Ping => "ping",
            EventKind::Repository => "repository",
            EventKind::Create => "create",
            EventKind::Delete => "delete",
            EventKind::Push => "push",
            EventKind::PullRequest => "pull_request",
            EventKind::Status => "status",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Typed webhook payloads
//
// Subset of GitHub's webhook schema: only the fields the receiver derives
// its stored representation from. Unknown fields are ignored by serde.

use serde::Deserialize;

/// Repository the event happened in
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub private: Option<bool>,
}

/// A GitHub account (sender, PR author, assignee)
#[derive(Debug, Clone, Deserialize)]
pub struct Actor {
    pub login: String,
}

/// The git user recorded on a push
#[derive(Debug, Clone, Deserialize)]
pub struct Pusher {
    pub name: String,
}

/// Author/committer identity on a commit
#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A commit in a push payload, with the file-level change lists
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub author: Option<CommitAuthor>,
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub modified: Vec<String>,
    #[serde(default)]
    pub removed: Vec<String>,
}

/// `ping` - sent when the webhook is installed
#[derive(Debug, Clone, Deserialize)]
pub struct PingPayload {
    pub zen: String,
    #[serde(default)]
    pub hook_id: Option<i64>,
    #[serde(default)]
    pub repository: Option<Repository>,
}

/// `repository` - repository created/deleted/archived/etc.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    pub action: String,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<Actor>,
}

/// `create` - branch or tag created
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub ref_type: String,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<Actor>,
}

/// `delete` - branch or tag deleted
#[derive(Debug, Clone, Deserialize)]
pub struct DeletePayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub ref_type: String,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<Actor>,
}

/// `push` - commits pushed to a ref (commits may be empty, e.g. branch resets)
#[derive(Debug, Clone, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub before: String,
    pub after: String,
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub head_commit: Option<Commit>,
    pub repository: Repository,
    pub pusher: Pusher,
    #[serde(default)]
    pub sender: Option<Actor>,
}

/// Pull request summary inside a `pull_request` payload
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub title: String,
    pub state: String,
    #[serde(default)]
    pub merged: Option<bool>,
    #[serde(default)]
    pub user: Option<Actor>,
}

/// `pull_request` - opened/closed/assigned/labeled/synchronize/etc.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    pub action: String,
    pub number: i64,
    pub pull_request: PullRequest,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<Actor>,
}

/// `status` - commit status updated
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPayload {
    pub sha: String,
    pub state: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<Actor>,
}

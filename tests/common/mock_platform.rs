//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use conflict_labeler::error::{Error, Result};
use conflict_labeler::platform::PlatformService;
use conflict_labeler::types::{FileChange, Label, PlatformConfig, PullRequest};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// Call record for `add_label` / `remove_label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCall {
    pub label_id: String,
    pub subject_id: String,
}

/// Call record for `create_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCall {
    pub subject_id: String,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// Hand-written rather than generated so that `config()` can return a
/// reference.
///
/// Features:
/// - Scripted responses: each queued snapshot is returned once, the last
///   one repeats
/// - Call tracking for verification
/// - Error injection per operation (and per subject for mutations)
pub struct MockPlatformService {
    config: PlatformConfig,
    labels: Mutex<Vec<Label>>,
    open_pr_snapshots: Mutex<VecDeque<Vec<PullRequest>>>,
    pr_snapshots: Mutex<HashMap<u64, VecDeque<PullRequest>>>,
    pr_files: Mutex<HashMap<u64, Vec<FileChange>>>,
    commit_files: Mutex<HashMap<String, Option<Vec<FileChange>>>>,
    // Call tracking
    find_labels_calls: Mutex<Vec<String>>,
    list_open_calls: Mutex<u32>,
    get_pr_calls: Mutex<Vec<u64>>,
    add_label_calls: Mutex<Vec<LabelCall>>,
    remove_label_calls: Mutex<Vec<LabelCall>>,
    comment_calls: Mutex<Vec<CommentCall>>,
    pr_files_calls: Mutex<Vec<u64>>,
    commit_files_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_list_open: Mutex<Option<String>>,
    error_on_add_label: Mutex<HashSet<String>>,
    error_on_remove_label: Mutex<HashSet<String>>,
    error_on_comment: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            labels: Mutex::new(Vec::new()),
            open_pr_snapshots: Mutex::new(VecDeque::new()),
            pr_snapshots: Mutex::new(HashMap::new()),
            pr_files: Mutex::new(HashMap::new()),
            commit_files: Mutex::new(HashMap::new()),
            find_labels_calls: Mutex::new(Vec::new()),
            list_open_calls: Mutex::new(0),
            get_pr_calls: Mutex::new(Vec::new()),
            add_label_calls: Mutex::new(Vec::new()),
            remove_label_calls: Mutex::new(Vec::new()),
            comment_calls: Mutex::new(Vec::new()),
            pr_files_calls: Mutex::new(Vec::new()),
            commit_files_calls: Mutex::new(Vec::new()),
            error_on_list_open: Mutex::new(None),
            error_on_add_label: Mutex::new(HashSet::new()),
            error_on_remove_label: Mutex::new(HashSet::new()),
            error_on_comment: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Labels returned by `find_labels` (filtered by substring, like GitHub)
    pub fn set_labels(&self, labels: Vec<Label>) {
        *self.labels.lock().unwrap() = labels;
    }

    /// Queue one `list_open_pull_requests` response
    pub fn push_open_prs(&self, prs: Vec<PullRequest>) {
        self.open_pr_snapshots.lock().unwrap().push_back(prs);
    }

    /// Queue one `get_pull_request` response for the PR's number
    pub fn push_pr(&self, pr: PullRequest) {
        self.pr_snapshots
            .lock()
            .unwrap()
            .entry(pr.number)
            .or_default()
            .push_back(pr);
    }

    /// Set the response for `list_pull_request_files`
    pub fn set_pr_files(&self, pr_number: u64, files: Vec<FileChange>) {
        self.pr_files.lock().unwrap().insert(pr_number, files);
    }

    /// Set the response for `list_commit_files` (`None` = absent file list)
    pub fn set_commit_files(&self, commit_ref: &str, files: Option<Vec<FileChange>>) {
        self.commit_files
            .lock()
            .unwrap()
            .insert(commit_ref.to_string(), files);
    }

    // === Error injection methods ===

    /// Make `list_open_pull_requests` return an error
    pub fn fail_list_open(&self, msg: &str) {
        *self.error_on_list_open.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `add_label` fail for one subject
    pub fn fail_add_label_for(&self, subject_id: &str) {
        self.error_on_add_label
            .lock()
            .unwrap()
            .insert(subject_id.to_string());
    }

    /// Make `remove_label` fail for one subject
    pub fn fail_remove_label_for(&self, subject_id: &str) {
        self.error_on_remove_label
            .lock()
            .unwrap()
            .insert(subject_id.to_string());
    }

    /// Make `create_comment` return an error
    pub fn fail_comment(&self, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    pub fn get_find_labels_calls(&self) -> Vec<String> {
        self.find_labels_calls.lock().unwrap().clone()
    }

    pub fn list_open_call_count(&self) -> u32 {
        *self.list_open_calls.lock().unwrap()
    }

    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    pub fn get_add_label_calls(&self) -> Vec<LabelCall> {
        self.add_label_calls.lock().unwrap().clone()
    }

    pub fn get_remove_label_calls(&self) -> Vec<LabelCall> {
        self.remove_label_calls.lock().unwrap().clone()
    }

    pub fn get_comment_calls(&self) -> Vec<CommentCall> {
        self.comment_calls.lock().unwrap().clone()
    }

    pub fn get_pr_files_calls(&self) -> Vec<u64> {
        self.pr_files_calls.lock().unwrap().clone()
    }

    pub fn get_commit_files_calls(&self) -> Vec<String> {
        self.commit_files_calls.lock().unwrap().clone()
    }

    /// Total number of label mutations issued
    pub fn mutation_count(&self) -> usize {
        self.add_label_calls.lock().unwrap().len() + self.remove_label_calls.lock().unwrap().len()
    }

    /// Assert that `add_label` was called for a subject
    pub fn assert_label_added(&self, label_id: &str, subject_id: &str) {
        let calls = self.get_add_label_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.label_id == label_id && c.subject_id == subject_id),
            "Expected add_label({label_id}, {subject_id}) but got: {calls:?}"
        );
    }

    /// Assert that `remove_label` was called for a subject
    pub fn assert_label_removed(&self, label_id: &str, subject_id: &str) {
        let calls = self.get_remove_label_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.label_id == label_id && c.subject_id == subject_id),
            "Expected remove_label({label_id}, {subject_id}) but got: {calls:?}"
        );
    }
}

/// Pop the next scripted response, repeating the last one once the queue
/// is down to a single entry
fn next_scripted<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn find_labels(&self, query: &str) -> Result<Vec<Label>> {
        self.find_labels_calls
            .lock()
            .unwrap()
            .push(query.to_string());

        let labels = self.labels.lock().unwrap();
        Ok(labels
            .iter()
            .filter(|l| l.name.contains(query))
            .cloned()
            .collect())
    }

    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>> {
        *self.list_open_calls.lock().unwrap() += 1;

        if let Some(msg) = self.error_on_list_open.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let mut snapshots = self.open_pr_snapshots.lock().unwrap();
        Ok(next_scripted(&mut snapshots).unwrap_or_default())
    }

    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        self.get_pr_calls.lock().unwrap().push(pr_number);

        let mut snapshots = self.pr_snapshots.lock().unwrap();
        snapshots
            .get_mut(&pr_number)
            .and_then(next_scripted)
            .ok_or_else(|| {
                Error::Platform(format!(
                    "get_pull_request: no response configured for PR #{pr_number}"
                ))
            })
    }

    async fn add_label(&self, label_id: &str, subject_id: &str) -> Result<()> {
        self.add_label_calls.lock().unwrap().push(LabelCall {
            label_id: label_id.to_string(),
            subject_id: subject_id.to_string(),
        });

        if self.error_on_add_label.lock().unwrap().contains(subject_id) {
            return Err(Error::Platform(format!("add_label failed for {subject_id}")));
        }
        Ok(())
    }

    async fn remove_label(&self, label_id: &str, subject_id: &str) -> Result<()> {
        self.remove_label_calls.lock().unwrap().push(LabelCall {
            label_id: label_id.to_string(),
            subject_id: subject_id.to_string(),
        });

        if self.error_on_remove_label.lock().unwrap().contains(subject_id) {
            return Err(Error::Platform(format!(
                "remove_label failed for {subject_id}"
            )));
        }
        Ok(())
    }

    async fn list_pull_request_files(&self, pr_number: u64) -> Result<Vec<FileChange>> {
        self.pr_files_calls.lock().unwrap().push(pr_number);

        let files = self.pr_files.lock().unwrap();
        files.get(&pr_number).cloned().ok_or_else(|| {
            Error::Platform(format!(
                "list_pull_request_files: no response configured for PR #{pr_number}"
            ))
        })
    }

    async fn list_commit_files(&self, commit_ref: &str) -> Result<Option<Vec<FileChange>>> {
        self.commit_files_calls
            .lock()
            .unwrap()
            .push(commit_ref.to_string());

        let files = self.commit_files.lock().unwrap();
        files.get(commit_ref).cloned().ok_or_else(|| {
            Error::Platform(format!(
                "list_commit_files: no response configured for {commit_ref}"
            ))
        })
    }

    async fn create_comment(&self, subject_id: &str, body: &str) -> Result<()> {
        self.comment_calls.lock().unwrap().push(CommentCall {
            subject_id: subject_id.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_comment.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

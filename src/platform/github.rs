//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    FileChange, Label, MergeStateStatus, MergeableState, PlatformConfig, PullRequest,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Files requested per page from the PR and commit endpoints
const FILES_PER_PAGE: usize = 100;

/// Both file endpoints stop at 3000 files
const MAX_FILE_PAGES: usize = 30;

const PULL_REQUEST_FIELDS: &str = r"
    id
    number
    mergeable
    mergeStateStatus
    potentialMergeCommit {
        oid
    }
    labels(first: 100) {
        nodes {
            id
            name
        }
    }
";

// GraphQL response types

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct RepositoryData<T> {
    repository: T,
}

#[derive(Deserialize)]
struct Nodes<T> {
    nodes: Vec<T>,
}

#[derive(Deserialize)]
struct LabelsData {
    labels: Nodes<Label>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestsData {
    pull_requests: PullRequestConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestConnection {
    nodes: Vec<GraphQlPullRequest>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestData {
    pull_request: Option<GraphQlPullRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlPullRequest {
    id: String,
    number: u64,
    mergeable: MergeableState,
    merge_state_status: Option<MergeStateStatus>,
    potential_merge_commit: Option<GraphQlCommit>,
    labels: Option<Nodes<Label>>,
}

#[derive(Deserialize)]
struct GraphQlCommit {
    oid: String,
}

impl From<GraphQlPullRequest> for PullRequest {
    fn from(pr: GraphQlPullRequest) -> Self {
        Self {
            id: pr.id,
            number: pr.number,
            mergeable: pr.mergeable,
            merge_state_status: pr.merge_state_status,
            potential_merge_commit: pr.potential_merge_commit.map(|c| c.oid),
            labels: pr.labels.map(|l| l.nodes).unwrap_or_default(),
        }
    }
}

// REST response types

#[derive(Deserialize)]
struct RestFile {
    sha: Option<String>,
    filename: String,
}

impl From<RestFile> for FileChange {
    fn from(file: RestFile) -> Self {
        Self {
            sha: file.sha.unwrap_or_default(),
            filename: file.filename,
        }
    }
}

#[derive(Deserialize)]
struct RestCommit {
    files: Option<Vec<RestFile>>,
}

/// GitHub service using octocrab for GraphQL and reqwest for REST file listings
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (file listings)
    token: String,
    /// HTTP client for raw requests (file listings)
    http_client: Client,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, config: PlatformConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(config.api_url.as_str())?
            .build()?;

        let http_client = Client::builder().user_agent("conflict-labeler").build()?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
        })
    }

    /// Run a GraphQL query and unwrap its `data`, surfacing GraphQL errors
    async fn graphql<T: DeserializeOwned + Send>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response: GraphQlResponse<T> = self
            .client
            .graphql(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .await
            .map_err(|e| Error::GitHubApi(format!("GraphQL request failed: {e}")))?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        response
            .data
            .ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))
    }

    /// GET a REST endpoint relative to the API URL and decode the JSON body
    async fn rest_get<T: DeserializeOwned + Send>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.config.api_url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Request to {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::GitHubApi(format!("{path} returned {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse {path}: {e}")))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn find_labels(&self, query: &str) -> Result<Vec<Label>> {
        debug!(query, "searching labels");
        let data: RepositoryData<LabelsData> = self
            .graphql(
                r"
                query ($owner: String!, $repo: String!, $labelName: String!) {
                    repository(owner: $owner, name: $repo) {
                        labels(first: 100, query: $labelName) {
                            nodes {
                                id
                                name
                            }
                        }
                    }
                }
                ",
                serde_json::json!({
                    "owner": self.config.owner,
                    "repo": self.config.repo,
                    "labelName": query,
                }),
            )
            .await?;

        let labels = data.repository.labels.nodes;
        debug!(count = labels.len(), "found labels");
        Ok(labels)
    }

    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>> {
        let query = format!(
            r"
            query ($owner: String!, $repo: String!, $after: String) {{
                repository(owner: $owner, name: $repo) {{
                    pullRequests(first: 100, states: OPEN, after: $after) {{
                        nodes {{ {PULL_REQUEST_FIELDS} }}
                        pageInfo {{
                            endCursor
                            hasNextPage
                        }}
                    }}
                }}
            }}
            "
        );

        let mut pull_requests = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let data: RepositoryData<PullRequestsData> = self
                .graphql(
                    &query,
                    serde_json::json!({
                        "owner": self.config.owner,
                        "repo": self.config.repo,
                        "after": cursor,
                    }),
                )
                .await?;

            let connection = data.repository.pull_requests;
            pull_requests.extend(connection.nodes.into_iter().map(PullRequest::from));

            match connection.page_info {
                PageInfo {
                    has_next_page: true,
                    end_cursor: Some(next),
                } => cursor = Some(next),
                _ => break,
            }
        }

        debug!(count = pull_requests.len(), "listed open PRs");
        Ok(pull_requests)
    }

    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "getting PR");
        let query = format!(
            r"
            query ($owner: String!, $repo: String!, $number: Int!) {{
                repository(owner: $owner, name: $repo) {{
                    pullRequest(number: $number) {{ {PULL_REQUEST_FIELDS} }}
                }}
            }}
            "
        );

        let data: RepositoryData<PullRequestData> = self
            .graphql(
                &query,
                serde_json::json!({
                    "owner": self.config.owner,
                    "repo": self.config.repo,
                    "number": pr_number,
                }),
            )
            .await?;

        data.repository
            .pull_request
            .map(PullRequest::from)
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number} not found")))
    }

    async fn add_label(&self, label_id: &str, subject_id: &str) -> Result<()> {
        debug!(label_id, subject_id, "adding label");
        let _: serde_json::Value = self
            .graphql(
                r"
                mutation ($label: ID!, $subject: ID!) {
                    addLabelsToLabelable(input: { labelIds: [$label], labelableId: $subject }) {
                        clientMutationId
                    }
                }
                ",
                serde_json::json!({ "label": label_id, "subject": subject_id }),
            )
            .await?;
        Ok(())
    }

    async fn remove_label(&self, label_id: &str, subject_id: &str) -> Result<()> {
        debug!(label_id, subject_id, "removing label");
        let _: serde_json::Value = self
            .graphql(
                r"
                mutation ($label: ID!, $subject: ID!) {
                    removeLabelsFromLabelable(input: { labelIds: [$label], labelableId: $subject }) {
                        clientMutationId
                    }
                }
                ",
                serde_json::json!({ "label": label_id, "subject": subject_id }),
            )
            .await?;
        Ok(())
    }

    async fn list_pull_request_files(&self, pr_number: u64) -> Result<Vec<FileChange>> {
        debug!(pr_number, "listing PR files");
        let mut files = Vec::new();

        for page in 1..=MAX_FILE_PAGES {
            let batch: Vec<RestFile> = self
                .rest_get(&format!(
                    "/repos/{}/{}/pulls/{pr_number}/files?per_page={FILES_PER_PAGE}&page={page}",
                    self.config.owner, self.config.repo
                ))
                .await?;
            let len = batch.len();
            files.extend(batch.into_iter().map(FileChange::from));
            if len < FILES_PER_PAGE {
                break;
            }
        }

        debug!(pr_number, count = files.len(), "listed PR files");
        Ok(files)
    }

    async fn list_commit_files(&self, commit_ref: &str) -> Result<Option<Vec<FileChange>>> {
        debug!(commit_ref, "listing commit files");
        let mut files = Vec::new();

        for page in 1..=MAX_FILE_PAGES {
            let commit: RestCommit = self
                .rest_get(&format!(
                    "/repos/{}/{}/commits/{commit_ref}?per_page={FILES_PER_PAGE}&page={page}",
                    self.config.owner, self.config.repo
                ))
                .await?;
            let Some(batch) = commit.files else {
                if page == 1 {
                    return Ok(None);
                }
                break;
            };
            let len = batch.len();
            files.extend(batch.into_iter().map(FileChange::from));
            if len < FILES_PER_PAGE {
                break;
            }
        }

        debug!(commit_ref, count = files.len(), "listed commit files");
        Ok(Some(files))
    }

    async fn create_comment(&self, subject_id: &str, body: &str) -> Result<()> {
        debug!(subject_id, "creating comment");
        let _: serde_json::Value = self
            .graphql(
                r"
                mutation ($subject: ID!, $body: String!) {
                    addComment(input: { subjectId: $subject, body: $body }) {
                        clientMutationId
                    }
                }
                ",
                serde_json::json!({ "subject": subject_id, "body": body }),
            )
            .await?;
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

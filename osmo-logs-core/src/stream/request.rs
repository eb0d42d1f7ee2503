use crate::stream::error::StreamError;
use url::Url;

/// Which logs to fetch from `GET /api/workflow/{workflow_id}/logs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    pub workflow_id: String,
    pub group_id: Option<String>,
    pub task_id: Option<String>,
    /// Ask the backend to keep the response open and follow new output.
    pub tail: bool,
}

impl LogRequest {
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            group_id: None,
            task_id: None,
            tail: false,
        }
    }

    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn with_task(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    pub fn tail(mut self, tail: bool) -> Self {
        self.tail = tail;
        self
    }

    /// Resolve the endpoint under `base`, keeping any path prefix `base` has.
    pub fn url(&self, base: &Url) -> Result<Url, StreamError> {
        let mut url = base.clone();
        url.set_query(None);

        url.path_segments_mut()
            .map_err(|_| StreamError::BaseUrl {
                url: base.to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "workflow", self.workflow_id.as_str(), "logs"]);

        let params: Vec<(&str, &str)> = [
            ("group_id", self.group_id.as_deref()),
            ("task_id", self.task_id.as_deref()),
            ("tail", self.tail.then_some("true")),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect();

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }
}

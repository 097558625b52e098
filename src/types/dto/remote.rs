use serde::Deserialize;

/// Error body the remote service may send with a non-success status
#[derive(Deserialize, Debug)]
pub struct RemoteError {
    #[serde(default)]
    pub message: Option<String>,
}

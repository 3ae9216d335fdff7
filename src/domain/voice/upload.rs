//! File upload response and result

use serde::{Deserialize, Serialize};

/// Status code the server answers with when files were stored
pub const UPLOAD_CREATED: u16 = 201;

/// Descriptor of a file stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Body of an upload response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadData {
    #[serde(default)]
    pub file_infos: Vec<FileInfo>,
    #[serde(default)]
    pub client_ids: Vec<String>,
}

/// What the upload capability returned: a status code and an optional body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub code: u16,
    pub data: Option<UploadData>,
}

impl UploadResponse {
    /// Response carrying a single stored file
    pub fn created(file_id: impl Into<String>) -> Self {
        Self {
            code: UPLOAD_CREATED,
            data: Some(UploadData {
                file_infos: vec![FileInfo {
                    id: file_id.into(),
                    name: None,
                    size: None,
                    mime_type: None,
                }],
                client_ids: Vec::new(),
            }),
        }
    }

    /// Response with a status code and no body
    pub fn status_only(code: u16) -> Self {
        Self { code, data: None }
    }

    /// Apply the success predicate: a created status and at least one descriptor
    /// whose id is non-empty. The first descriptor wins.
    pub fn into_result(self) -> Option<UploadResult> {
        if self.code != UPLOAD_CREATED {
            return None;
        }
        let first = self.data?.file_infos.into_iter().next()?;
        if first.id.is_empty() {
            return None;
        }
        Some(UploadResult {
            remote_file_id: first.id,
            size_bytes: first.size,
        })
    }
}

/// Identifier of an uploaded asset, required before a post may reference it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub remote_file_id: String,
    /// Stored size as reported by the server; the recorder never measures it
    pub size_bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_with_file_is_success() {
        let result = UploadResponse::created("F1").into_result().unwrap();
        assert_eq!(result.remote_file_id, "F1");
    }

    #[test]
    fn first_descriptor_wins() {
        let response = UploadResponse {
            code: 201,
            data: Some(UploadData {
                file_infos: vec![
                    FileInfo { id: "A".into(), name: None, size: None, mime_type: None },
                    FileInfo { id: "B".into(), name: None, size: None, mime_type: None },
                ],
                client_ids: vec![],
            }),
        };
        assert_eq!(response.into_result().unwrap().remote_file_id, "A");
    }

    #[test]
    fn size_is_known_after_upload() {
        let response = UploadResponse {
            code: 201,
            data: Some(UploadData {
                file_infos: vec![FileInfo {
                    id: "F1".into(),
                    name: None,
                    size: Some(4096),
                    mime_type: None,
                }],
                client_ids: vec![],
            }),
        };
        assert_eq!(response.into_result().unwrap().size_bytes, Some(4096));
        assert_eq!(UploadResponse::created("F1").into_result().unwrap().size_bytes, None);
    }

    #[test]
    fn non_created_code_fails() {
        assert!(UploadResponse::status_only(500).into_result().is_none());

        let mut ok_but_wrong_code = UploadResponse::created("F1");
        ok_but_wrong_code.code = 200;
        assert!(ok_but_wrong_code.into_result().is_none());
    }

    #[test]
    fn empty_descriptor_list_fails() {
        let response = UploadResponse {
            code: 201,
            data: Some(UploadData::default()),
        };
        assert!(response.into_result().is_none());
        assert!(UploadResponse::status_only(201).into_result().is_none());
    }

    #[test]
    fn empty_file_id_fails() {
        assert!(UploadResponse::created("").into_result().is_none());
    }

    #[test]
    fn deserializes_server_body() {
        let body = r#"{"file_infos":[{"id":"F1","name":"Voice Message.mp3","size":12}],"client_ids":["c1"]}"#;
        let data: UploadData = serde_json::from_str(body).unwrap();
        assert_eq!(data.file_infos[0].id, "F1");
        assert_eq!(data.file_infos[0].size, Some(12));
        assert_eq!(data.client_ids, vec!["c1".to_string()]);
    }
}

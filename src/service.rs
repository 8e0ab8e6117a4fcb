use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::agent::Agent;
use crate::config::Config;
use crate::discover::{DatasetSearch, FileSearch, RecordSearch};
use crate::domain::{FileDescriptor, file_path_from_uri};
use crate::error::PennsieveError;
use crate::fs_util::write_archive;
use crate::zipit::{ArchiveRequest, ArchiveResponse, ZipitClient};

pub const HOST_API: &str = "https://api.pennsieve.io";

#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub response: ArchiveResponse,
    pub output: PathBuf,
}

/// The Pennsieve wrapper: Discover searches through the agent delegate,
/// bulk downloads through the zipit packaging service.
#[derive(Clone)]
pub struct Pennsieve<A: Agent, Z: ZipitClient> {
    agent: A,
    zipit: Z,
    profile_name: Option<String>,
}

impl<A: Agent, Z: ZipitClient> Pennsieve<A, Z> {
    pub fn new(agent: A, zipit: Z, config: Option<&Config>) -> Self {
        info!("initializing Pennsieve client");
        let profile_name = config.and_then(|config| config.pennsieve_profile_name.clone());
        match &profile_name {
            Some(name) => info!(profile = %name, "profile configured"),
            None => info!("no profile configured"),
        }
        Self {
            agent,
            zipit,
            profile_name,
        }
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn profile_name(&self) -> Option<&str> {
        self.profile_name.as_deref()
    }

    pub fn connect(&mut self) -> Result<(), PennsieveError> {
        info!("connecting to Pennsieve agent");
        self.agent.connect(self.profile_name.as_deref())
    }

    pub fn info(&self) -> Result<String, PennsieveError> {
        self.agent.agent_version()
    }

    // Identity as the agent reports it, never cached locally.
    pub fn get_profile(&self) -> Result<String, PennsieveError> {
        self.agent.whoami()
    }

    pub fn set_profile(&mut self, profile_name: &str) -> Result<String, PennsieveError> {
        self.agent.switch_profile(profile_name)
    }

    pub fn close(&mut self) -> Result<(), PennsieveError> {
        info!("closing Pennsieve agent session");
        self.agent.close()
    }

    pub fn list_datasets(&self, search: &DatasetSearch) -> Result<Value, PennsieveError> {
        debug!(limit = search.limit, offset = search.offset, "searching datasets");
        self.agent.get(
            &format!("{HOST_API}/discover/search/datasets"),
            &search.query_pairs(),
            &default_headers(),
        )
    }

    // Deliberately narrowed to the `files` array; callers of this
    // operation never want the wrapping metadata.
    pub fn list_files(&self, search: &FileSearch) -> Result<Vec<Value>, PennsieveError> {
        debug!(limit = search.limit, offset = search.offset, "searching files");
        let body = self.agent.get(
            &format!("{HOST_API}/discover/search/files"),
            &search.query_pairs(),
            &default_headers(),
        )?;
        match body.get("files").and_then(Value::as_array) {
            Some(files) => Ok(files.clone()),
            None => Err(PennsieveError::DiscoverResponse(
                "file search response carries no files array".to_string(),
            )),
        }
    }

    pub fn list_filenames(&self, search: &FileSearch) -> Result<Vec<String>, PennsieveError> {
        let files = self.list_files(search)?;
        files
            .iter()
            .map(|file| {
                let uri = file.get("uri").and_then(Value::as_str).ok_or_else(|| {
                    PennsieveError::DiscoverResponse("file entry carries no uri".to_string())
                })?;
                file_path_from_uri(uri)
            })
            .collect()
    }

    pub fn list_records(&self, search: &RecordSearch) -> Result<Value, PennsieveError> {
        debug!(limit = search.limit, offset = search.offset, "searching records");
        self.agent.get(
            &format!("{HOST_API}/discover/search/records"),
            &search.query_pairs(),
            &default_headers(),
        )
    }

    pub fn download_file(
        &self,
        file: &FileDescriptor,
        output_name: Option<&Path>,
    ) -> Result<DownloadResult, PennsieveError> {
        self.download_files(std::slice::from_ref(file), output_name)
    }

    /// Requests one archive for the batch and writes it to local storage.
    ///
    /// Every descriptor must reference the same dataset and version; the
    /// check runs before any network call, so a rejected batch performs
    /// none. Without `output_name`, a single-file batch is written under
    /// the file's own name and a multi-file batch under the first file's
    /// stem with a `.gz` extension.
    pub fn download_files(
        &self,
        files: &[FileDescriptor],
        output_name: Option<&Path>,
    ) -> Result<DownloadResult, PennsieveError> {
        let datasets: BTreeSet<(u64, u32)> = files.iter().map(FileDescriptor::dataset).collect();
        let (dataset_id, version) = match (datasets.len(), datasets.into_iter().next()) {
            (1, Some(pair)) => pair,
            (found, _) => return Err(PennsieveError::MixedDatasetBatch { found }),
        };

        let paths = files
            .iter()
            .map(FileDescriptor::transfer_path)
            .collect::<Result<Vec<_>, _>>()?;

        let request = ArchiveRequest {
            paths,
            dataset_id,
            version,
        };
        info!(
            dataset = dataset_id,
            version,
            files = files.len(),
            "requesting archive from zipit"
        );
        let response = self.zipit.fetch_archive(&request)?;

        let output = match output_name {
            Some(path) => path.to_path_buf(),
            None => default_archive_name(files),
        };
        let written = write_archive(&output, &response.body)?;
        debug!(bytes = written, output = %output.display(), "archive written");

        Ok(DownloadResult { response, output })
    }

    pub fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, PennsieveError> {
        self.agent.get(url, query, &[])
    }

    pub fn post(&self, url: &str, body: &Value) -> Result<Value, PennsieveError> {
        self.agent.post(url, body, &[])
    }

    pub fn put(&self, url: &str, body: &Value) -> Result<Value, PennsieveError> {
        self.agent.put(url, body, &[])
    }

    pub fn delete(&self, url: &str, query: &[(String, String)]) -> Result<Value, PennsieveError> {
        self.agent.delete(url, query, &[])
    }
}

/// Default archive name for a batch: the descriptor's own name for a
/// single file, the first file's stem with `.gz` for a packaged batch.
pub fn default_archive_name(files: &[FileDescriptor]) -> PathBuf {
    match files {
        [] => PathBuf::from("download.gz"),
        [single] => PathBuf::from(&single.name),
        [first, ..] => {
            let stem = Path::new(&first.name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| first.name.clone());
            PathBuf::from(format!("{stem}.gz"))
        }
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        (
            "Content-Type".to_string(),
            "application/json".to_string(),
        ),
        (
            "Accept".to_string(),
            "application/json; charset=utf-8".to_string(),
        ),
    ]
}

//! Shared testing utilities for phorge CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TOKEN: &str = "api-integration";

/// Isolated working directory plus a mock Conduit server.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    pub server: mockito::ServerGuard,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root, server: mockito::Server::new() }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for the `phorge` binary pointed at the mock server
    /// through the environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("phorge").expect("Failed to locate phorge binary");
        cmd.current_dir(self.work_dir())
            .env("PHORGE_HOST", self.server.url())
            .env("PHORGE_API_TOKEN", TOKEN)
            .env_remove("RUST_LOG");
        cmd
    }

    /// Build a command with no credentials in the environment.
    pub fn bare_cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("phorge").expect("Failed to locate phorge binary");
        cmd.current_dir(self.work_dir())
            .env_remove("PHORGE_HOST")
            .env_remove("PHORGE_API_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a file under the working directory and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write a `phorge.toml` pointing at the mock server.
    pub fn write_config(&self) -> PathBuf {
        self.write(
            "phorge.toml",
            &format!("host = \"{}\"\ntoken = \"{}\"\n", self.server.url(), TOKEN),
        )
    }
}

/// A `maniphest.search` style response body.
#[allow(dead_code)]
pub fn search_body(objects: &[(u64, &str, &str)]) -> String {
    let data: Vec<serde_json::Value> = objects
        .iter()
        .map(|(id, kind, name)| {
            serde_json::json!({
                "id": id,
                "type": kind,
                "phid": format!("PHID-{}-obj{}", kind, id),
                "fields": { "name": name },
                "attachments": {}
            })
        })
        .collect();
    serde_json::json!({
        "result": { "data": data, "cursor": { "limit": 100, "after": null, "before": null } },
        "error_code": null,
        "error_info": null
    })
    .to_string()
}

/// A `maniphest.edit` style response body.
#[allow(dead_code)]
pub fn edit_body(id: u64) -> String {
    serde_json::json!({
        "result": {
            "object": { "id": id, "phid": format!("PHID-TASK-obj{}", id) },
            "transactions": [{ "phid": "PHID-XACT-TASK-1" }]
        },
        "error_code": null,
        "error_info": null
    })
    .to_string()
}

/// A Conduit error envelope.
#[allow(dead_code)]
pub fn error_body(code: &str, info: &str) -> String {
    serde_json::json!({ "result": null, "error_code": code, "error_info": info }).to_string()
}

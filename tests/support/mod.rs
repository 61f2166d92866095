//! Test support utilities for deckhand integration tests.
//!
//! Provides an isolated project directory per test plus fixture
//! builders for the files provisioning operates on.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// Supabase env template fixture, trimmed to the keys provisioning
/// cares about plus a few inert ones.
pub const ENV_TEMPLATE: &str = "\
############
# Secrets
############

POSTGRES_PASSWORD=your-super-secret-and-long-postgres-password
JWT_SECRET=your-super-secret-jwt-token-with-at-least-32-characters-long
ANON_KEY=template-anon-key
SERVICE_ROLE_KEY=template-service-key
DASHBOARD_USERNAME=supabase
DASHBOARD_PASSWORD=this_password_is_insecure_and_should_be_updated

############
# Ports
############

STUDIO_PORT=3000
KONG_HTTP_PORT=8000
";

/// The SearXNG service block with the capability restriction active,
/// as it appears in the shipped docker-compose.yml.
pub const RESTRICTED_SNIPPET: &str = concat!(
    "searxng:\n",
    "    container_name: searxng\n",
    "    image: docker.io/searxng/searxng:latest\n",
    "    restart: unless-stopped\n",
    "    expose:\n",
    "      - 8080/tcp\n",
    "    volumes:\n",
    "      - ./searxng:/etc/searxng:rw\n",
    "    environment:\n",
    "      - SEARXNG_BASE_URL=https://${SEARXNG_HOSTNAME:-localhost}/\n",
    "      - UWSGI_WORKERS=${SEARXNG_UWSGI_WORKERS:-4}\n",
    "      - UWSGI_THREADS=${SEARXNG_UWSGI_THREADS:-4}\n",
    "    cap_drop:\n",
    "      - ALL",
);

/// The same block with the restriction commented out for first run.
pub const UNRESTRICTED_SNIPPET: &str = concat!(
    "searxng:\n",
    "    container_name: searxng\n",
    "    image: docker.io/searxng/searxng:latest\n",
    "    restart: unless-stopped\n",
    "    expose:\n",
    "      - 8080/tcp\n",
    "    volumes:\n",
    "      - ./searxng:/etc/searxng:rw\n",
    "    environment:\n",
    "      - SEARXNG_BASE_URL=https://${SEARXNG_HOSTNAME:-localhost}/\n",
    "      - UWSGI_WORKERS=${SEARXNG_UWSGI_WORKERS:-4}\n",
    "      - UWSGI_THREADS=${SEARXNG_UWSGI_THREADS:-4}\n",
    "    # cap_drop:  # Temporarily disabled for first run\n",
    "      # - ALL",
);

/// Test environment with an isolated temp project directory.
///
/// No process-global state is mutated — child processes use
/// `.current_dir()` so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Create a test environment with a vendored supabase checkout and
    /// env template in place, so provisioning never reaches for git.
    pub fn with_supabase_template() -> Self {
        let t = Self::new();
        t.write("supabase/docker/.env.example", ENV_TEMPLATE);
        t
    }

    /// Create a deckhand command running inside the test directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("deckhand").expect("failed to find deckhand binary");
        cmd.current_dir(self.dir.path());
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `deckhand provision`.
    pub fn provision(&self) -> Output {
        self.cmd()
            .arg("provision")
            .output()
            .expect("failed to run deckhand provision")
    }

    /// Run `deckhand provision` and assert it succeeded.
    pub fn provision_ok(&self) -> Output {
        let output = self.provision();
        assert!(
            output.status.success(),
            "provision failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    /// Absolute path of a file inside the test directory.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write a file inside the test directory, creating parent dirs.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create fixture dirs");
        }
        std::fs::write(path, content).expect("failed to write fixture");
    }

    /// Read a file inside the test directory.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).expect("failed to read file")
    }

    /// Whether a file exists inside the test directory.
    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    /// Write a docker-compose.yml containing the given searxng block.
    pub fn write_compose(&self, searxng_block: &str) {
        self.write(
            "docker-compose.yml",
            &format!(
                "services:\n  n8n:\n    image: n8nio/n8n:latest\n\n  {}\n",
                searxng_block
            ),
        );
    }
}

/// Parse an .env file's bindings, ignoring comments and blanks.
pub fn parse_env(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| {
            l.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        })
        .collect()
}

/// Look up a key in parsed bindings.
pub fn env_value<'a>(bindings: &'a [(String, String)], key: &str) -> Option<&'a str> {
    bindings
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Convert stdout to a string for assertions.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Convert stderr to a string for assertions.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Directory placeholder so provisioning treats supabase/ as vendored.
pub fn vendored_supabase(dir: &Path) {
    std::fs::create_dir_all(dir.join("supabase/docker")).expect("failed to create supabase dir");
}

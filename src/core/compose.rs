//! SearXNG capability toggle in docker-compose.yml.
//!
//! SearXNG needs full capabilities once, on first run, to write its own
//! uwsgi.ini. Afterwards the service runs with `cap_drop: ALL`. The two
//! states are flipped by literal substring replacement of the known
//! service block. That exact-whitespace match is fragile against manual
//! compose edits, a known limitation carried over from the upstream
//! setup scripts; an unrecognized block simply means nothing to patch.

use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;

/// SearXNG service block with capability restriction active.
const RESTRICTED_BLOCK: &str = concat!(
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

/// Same block with the restriction commented out for first run.
const UNRESTRICTED_BLOCK: &str = concat!(
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

/// Bring the compose file in line with SearXNG's initialization state.
///
/// The marker file is written by SearXNG itself once initialized; while
/// it is absent the capability restriction is lifted, afterwards it is
/// restored. Missing compose file or unrecognized block text is a no-op.
///
/// # Errors
///
/// Returns error if the compose file cannot be read or written.
pub fn sync_searxng_caps(compose: &Path, marker: &Path) -> Result<()> {
    if !compose.exists() {
        debug!(path = %compose.display(), "compose file not found, nothing to patch");
        return Ok(());
    }

    let is_first_run = !marker.exists();
    let content = std::fs::read_to_string(compose)?;

    if is_first_run && content.contains(RESTRICTED_BLOCK) {
        info!("first run detected for searxng, lifting cap_drop");
        std::fs::write(compose, content.replace(RESTRICTED_BLOCK, UNRESTRICTED_BLOCK))?;
    } else if !is_first_run && content.contains(UNRESTRICTED_BLOCK) {
        info!("searxng initialized, restoring cap_drop");
        std::fs::write(compose, content.replace(UNRESTRICTED_BLOCK, RESTRICTED_BLOCK))?;
    } else {
        debug!("searxng service block already in the desired state");
    }

    Ok(())
}

pub mod dates;
pub mod edges;
pub mod filter;
pub mod grid;
pub mod index_row;
pub mod lanes;
pub mod model;
pub mod normalize;
pub mod order;
pub mod snapshot;

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::OnceLock;

use wasm_bindgen::prelude::*;

use model::{Entry, Orientation, Paging, Snapshot, ViewParams};

// ---------------------------------------------------------------------------
// Handle storage for persistent Snapshot instances across WASM calls.
// ---------------------------------------------------------------------------

/// Global storage for snapshots, keyed by opaque u32 handles.
/// Uses OnceLock for lazy one-time initialization and Mutex for interior mutability.
fn snapshot_store() -> &'static Mutex<SnapshotStore> {
    static STORE: OnceLock<Mutex<SnapshotStore>> = OnceLock::new();
    STORE.get_or_init(|| Mutex::new(SnapshotStore::new()))
}

struct SnapshotStore {
    snapshots: HashMap<u32, Snapshot>,
    next_handle: u32,
}

impl SnapshotStore {
    fn new() -> Self {
        SnapshotStore {
            snapshots: HashMap::new(),
            next_handle: 1,
        }
    }

    fn insert(&mut self, snapshot: Snapshot) -> u32 {
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        if self.next_handle == 0 {
            self.next_handle = 1; // skip 0 as a sentinel
        }
        self.snapshots.insert(handle, snapshot);
        handle
    }

    fn get(&self, handle: u32) -> Option<&Snapshot> {
        self.snapshots.get(&handle)
    }

    fn remove(&mut self, handle: u32) -> bool {
        self.snapshots.remove(&handle).is_some()
    }
}

// ---------------------------------------------------------------------------
// JSON result wrapper for returning handle + data together.
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct HandleResult {
    handle: u32,
    #[serde(flatten)]
    snapshot: Snapshot,
}

#[derive(serde::Serialize)]
struct ErrorResult {
    error: String,
}

fn json_error(msg: &str) -> String {
    serde_json::to_string(&ErrorResult {
        error: msg.to_string(),
    })
    .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", msg))
}

/// Raw request body accepted by `build_graph_snapshot`. The text parser
/// that turns a git-log blob into `Entry` records lives outside this
/// crate (§6); callers hand us already-parsed entries plus view options.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRequest {
    entries: Vec<Entry>,
    #[serde(default)]
    orientation: RequestOrientation,
    #[serde(default)]
    show_index: bool,
    #[serde(default)]
    index_status: Option<model::IndexStatus>,
    #[serde(default)]
    paging: Option<RequestPaging>,
    #[serde(default)]
    filter: Option<RequestFilter>,
}

#[derive(serde::Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum RequestOrientation {
    #[default]
    Normal,
    Flipped,
}

#[derive(serde::Deserialize)]
struct RequestPaging {
    size: usize,
    page: usize,
}

#[derive(serde::Deserialize)]
struct RequestFilter {
    field: String,
    pattern: String,
}

// ---------------------------------------------------------------------------
// WASM-exported functions
// ---------------------------------------------------------------------------

/// Compute the full commit-graph snapshot from a JSON `SnapshotRequest` body.
///
/// Returns: JSON string with `{ handle, commits, edges, grid, graphWidth,
/// ... }` (the flattened `Snapshot`), or `{ error }` on failure.
///
/// The handle can be used with `filter_snapshot` and must be freed with
/// `free_snapshot` when done.
#[wasm_bindgen]
pub fn build_graph_snapshot(request_json: &str) -> String {
    let request: SnapshotRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => return json_error(&format!("Invalid request: {}", e)),
    };

    let regex_filter = match &request.filter {
        Some(f) => match filter::RegexFieldFilter::from_field_name(&f.field, &f.pattern) {
            Ok(filter) => Some(filter),
            Err(e) => return json_error(&e),
        },
        None => None,
    };

    let view = ViewParams {
        filter: regex_filter
            .as_ref()
            .map(|f| f as &dyn model::CommitFilter),
        paging: request
            .paging
            .map(|p| Paging::page(p.size, p.page))
            .unwrap_or_else(Paging::unpaged),
        orientation: match request.orientation {
            RequestOrientation::Normal => Orientation::Normal,
            RequestOrientation::Flipped => Orientation::Flipped,
        },
        show_index: request.show_index,
        index_status: request.index_status,
    };

    let snapshot = match snapshot::build_snapshot(request.entries, view) {
        Ok(s) => s,
        Err(e) => return json_error(&e.to_string()),
    };

    let mut store = match snapshot_store().lock() {
        Ok(s) => s,
        Err(_) => return json_error("Failed to acquire snapshot store lock"),
    };

    let handle = store.insert(snapshot.clone());
    let result = HandleResult { handle, snapshot };

    serde_json::to_string(&result).unwrap_or_else(|e| json_error(&format!("Serialization error: {}", e)))
}

/// Free a previously allocated snapshot handle and its associated data.
///
/// After calling this, the handle is invalid and must not be used.
#[wasm_bindgen]
pub fn free_snapshot(handle: u32) {
    if let Ok(mut store) = snapshot_store().lock() {
        store.remove(handle);
    }
}

/// Look up a single commit by hash in a stored snapshot.
///
/// Returns: JSON `Commit`, or `{ error }` if the handle or hash is unknown.
#[wasm_bindgen]
pub fn lookup_commit(handle: u32, hash: &str) -> String {
    let store = match snapshot_store().lock() {
        Ok(s) => s,
        Err(_) => return json_error("Failed to acquire snapshot store lock"),
    };

    let stored = match store.get(handle) {
        Some(s) => s,
        None => return json_error(&format!("Invalid handle: {}", handle)),
    };

    match snapshot::lookup(stored, hash) {
        Some(commit) => serde_json::to_string(commit)
            .unwrap_or_else(|e| json_error(&format!("Serialization error: {}", e))),
        None => json_error(&format!("Unknown hash: {}", hash)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! In-memory content repository speaking the two HTTP conventions the todo
//! view models rely on: JSON rendering of a node (`<path>.1.json`) and the
//! generic form POST write endpoint.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Form, Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const ROOT: &str = "/";

#[derive(Clone, Debug, Default)]
pub struct Node {
    pub properties: Map<String, Value>,
    /// Child names in creation order.
    pub children: Vec<String>,
}

/// Nodes keyed by absolute path. The root `/` always exists.
#[derive(Clone, Debug)]
pub struct Repository {
    nodes: HashMap<String, Node>,
}

impl Default for Repository {
    fn default() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT.to_string(), Node::default());
        Self { nodes }
    }
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo page served by the binary: an empty todo list.
    pub fn demo() -> Self {
        let mut repo = Self::new();
        repo.insert(
            "/content/todo",
            [
                ("jcr:title", json!("todos")),
                ("itemResourceType", json!("todo/components/item")),
            ],
        );
        repo
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&Node> {
        self.nodes.get(path)
    }

    /// Create `path` (and any missing ancestors) and merge `properties` in.
    pub fn insert<'a, I>(&mut self, path: &str, properties: I)
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        self.create(path);
        if let Some(node) = self.nodes.get_mut(path) {
            for (name, value) in properties {
                node.properties.insert(name.to_string(), value);
            }
        }
    }

    pub fn set_property(&mut self, path: &str, name: &str, value: Value) {
        self.insert(path, [(name, value)]);
    }

    /// Remove `path` and its subtree. Returns false when it did not exist.
    pub fn remove(&mut self, path: &str) -> bool {
        if path == ROOT || !self.nodes.contains_key(path) {
            return false;
        }
        let prefix = format!("{path}/");
        self.nodes.retain(|p, _| p != path && !p.starts_with(&prefix));
        if let Some((parent, name)) = split(path) {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|c| c != name);
            }
        }
        true
    }

    /// JSON rendering of `path` with `depth` levels of children inlined.
    pub fn render(&self, path: &str, depth: usize) -> Option<Value> {
        let node = self.nodes.get(path)?;
        let mut out = node.properties.clone();
        if depth > 0 {
            for name in &node.children {
                if let Some(child) = self.render(&join(path, name), depth - 1) {
                    out.insert(name.clone(), child);
                }
            }
        }
        Some(Value::Object(out))
    }

    /// Create `path` and any missing ancestors; existing nodes are untouched.
    pub fn create(&mut self, path: &str) {
        if self.nodes.contains_key(path) {
            return;
        }
        if let Some((parent, name)) = split(path) {
            self.create(parent);
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.push(name.to_string());
            }
        }
        self.nodes.insert(path.to_string(), Node::default());
    }
}

/// `(parent, name)` of an absolute path; `None` for the root.
fn split(path: &str) -> Option<(&str, &str)> {
    let (parent, name) = path.rsplit_once('/')?;
    if name.is_empty() {
        return None;
    }
    Some((if parent.is_empty() { ROOT } else { parent }, name))
}

fn join(parent: &str, name: &str) -> String {
    format!("{}/{name}", parent.trim_end_matches('/'))
}

pub type Db = Arc<RwLock<Repository>>;

pub fn app() -> Router {
    app_with(Repository::new())
}

pub fn app_with(repo: Repository) -> Router {
    let db: Db = Arc::new(RwLock::new(repo));
    Router::new()
        .route("/{*path}", get(read_node).post(write_node))
        .with_state(db)
}

pub async fn run(listener: TcpListener, repo: Repository) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(repo)).await
}

async fn read_node(
    State(db): State<Db>,
    Path(path): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let path = format!("/{path}");
    let (node, depth) = if let Some(node) = path.strip_suffix(".1.json") {
        (node, 1)
    } else if let Some(node) = path.strip_suffix(".json") {
        (node, 0)
    } else {
        return Err(StatusCode::NOT_FOUND);
    };
    let repo = db.read().await;
    repo.render(node, depth).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn write_node(
    State(db): State<Db>,
    Path(path): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let path = format!("/{path}");
    let mut repo = db.write().await;

    match field(&fields, ":operation") {
        Some("delete") => return delete(&mut repo, &path, &fields),
        Some(other) => {
            debug!(%path, operation = other, "unsupported operation");
            return Err(StatusCode::BAD_REQUEST);
        }
        None => {}
    }

    let (target, status) = if let Some(parent) = path.strip_suffix("/*") {
        let parent = if parent.is_empty() { ROOT } else { parent };
        if !repo.contains(parent) {
            return Err(StatusCode::NOT_FOUND);
        }
        (join(parent, &Uuid::new_v4().simple().to_string()), StatusCode::CREATED)
    } else if repo.contains(&path) {
        (path, StatusCode::OK)
    } else {
        (path, StatusCode::CREATED)
    };

    repo.create(&target);
    apply_fields(&mut repo, &target, &fields);
    info!(path = %target, status = status.as_u16(), "wrote node");
    Ok((status, Json(json!({ "path": target }))))
}

fn delete(
    repo: &mut Repository,
    path: &str,
    fields: &[(String, String)],
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let targets: Vec<&str> = fields
        .iter()
        .filter(|(k, _)| k == ":applyTo")
        .map(|(_, v)| v.as_str())
        .collect();

    if targets.is_empty() {
        if !repo.remove(path) {
            return Err(StatusCode::NOT_FOUND);
        }
        info!(path, "deleted node");
    } else {
        for target in &targets {
            let removed = repo.remove(target);
            debug!(path = %target, removed, "bulk delete");
        }
    }
    Ok((StatusCode::OK, Json(json!({ "path": path, "deleted": targets.len().max(1) }))))
}

fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
}

/// Write every non-control field onto `target`, or onto another node when
/// the key is an absolute property path. `<name>@TypeHint=Boolean` turns
/// `<name>` into a JSON boolean.
fn apply_fields(repo: &mut Repository, target: &str, fields: &[(String, String)]) {
    let hints: BTreeMap<&str, &str> = fields
        .iter()
        .filter_map(|(k, v)| k.strip_suffix("@TypeHint").map(|name| (name, v.as_str())))
        .collect();

    for (key, raw) in fields {
        if key == "_charset_" || key.starts_with(':') || key.ends_with("@TypeHint") {
            continue;
        }
        let value = match hints.get(key.as_str()) {
            Some(&"Boolean") => Value::Bool(raw.eq_ignore_ascii_case("true")),
            _ => Value::String(raw.clone()),
        };
        let key = key.strip_prefix("./").unwrap_or(key);
        match key.rsplit_once('/') {
            Some((node, name)) if key.starts_with('/') => repo.set_property(node, name, value),
            Some((node, name)) => repo.set_property(&join(target, node), name, value),
            None => repo.set_property(target, key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(fields: &[(&str, &str)]) -> Vec<(String, String)> {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn insert_creates_ancestors_in_order() {
        let mut repo = Repository::new();
        repo.create("/content/todo/b");
        repo.create("/content/todo/a");
        assert!(repo.contains("/content"));
        assert_eq!(repo.get("/content/todo").unwrap().children, ["b", "a"]);
    }

    #[test]
    fn render_inlines_one_level() {
        let mut repo = Repository::demo();
        repo.insert("/content/todo/a", [("jcr:title", json!("A"))]);
        repo.create("/content/todo/a/deep");
        let rendered = repo.render("/content/todo", 1).unwrap();
        assert_eq!(rendered["jcr:title"], "todos");
        assert_eq!(rendered["a"]["jcr:title"], "A");
        assert!(rendered["a"].get("deep").is_none());
        assert!(repo.render("/content/todo", 0).unwrap().get("a").is_none());
    }

    #[test]
    fn remove_drops_subtree_and_link() {
        let mut repo = Repository::demo();
        repo.create("/content/todo/a/deep");
        assert!(repo.remove("/content/todo/a"));
        assert!(!repo.contains("/content/todo/a/deep"));
        assert!(repo.get("/content/todo").unwrap().children.is_empty());
        assert!(!repo.remove("/content/todo/a"));
        assert!(!repo.remove(ROOT));
    }

    #[test]
    fn apply_fields_coerces_type_hints_and_absolute_keys() {
        let mut repo = Repository::demo();
        repo.create("/content/todo/a");
        apply_fields(
            &mut repo,
            "/content/todo",
            &pairs(&[
                ("_charset_", "utf-8"),
                ("/content/todo/a/completed", "TRUE"),
                ("/content/todo/a/completed@TypeHint", "Boolean"),
                ("note", "kept as text"),
            ]),
        );
        let item = repo.get("/content/todo/a").unwrap();
        assert_eq!(item.properties["completed"], json!(true));
        let page = repo.get("/content/todo").unwrap();
        assert_eq!(page.properties["note"], "kept as text");
        assert!(!page.properties.contains_key("_charset_"));
    }

    #[test]
    fn apply_fields_without_hint_stores_string() {
        let mut repo = Repository::demo();
        apply_fields(&mut repo, "/content/todo", &pairs(&[("completed", "true")]));
        assert_eq!(repo.get("/content/todo").unwrap().properties["completed"], "true");
    }
}

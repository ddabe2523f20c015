//! Path-addressed reads and writes over a JSON tree
//!
//! Nulls and empty objects do not exist in the tree: writing one deletes the
//! node, and parents left empty by a delete are removed too.

use serde_json::{Map, Value};
use streettalk_core::FeedPath;

/// Read the node at `path`
pub(crate) fn get_at<'a>(root: &'a Value, path: &FeedPath) -> Option<&'a Value> {
    let mut node = root;
    for segment in path.segments() {
        node = node.as_object()?.get(segment)?;
    }
    (!is_absent(node)).then_some(node)
}

/// Replace the node at `path`; `None` deletes it
pub(crate) fn set_at(root: &mut Value, path: &FeedPath, value: Option<Value>) {
    set_segments(root, path.segments(), normalize(value));
}

/// Turn a value into its stored form
pub(crate) fn normalize(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !is_absent(v))
}

fn set_segments(node: &mut Value, segments: &[String], value: Option<Value>) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value.unwrap_or_else(|| Value::Object(Map::new()));
        return;
    };

    if !node.is_object() {
        if value.is_none() {
            return;
        }
        // Writing below a leaf replaces the leaf
        *node = Value::Object(Map::new());
    }

    let Value::Object(children) = node else {
        return;
    };

    if rest.is_empty() {
        match value {
            Some(value) => {
                children.insert(first.clone(), value);
            }
            None => {
                children.remove(first);
            }
        }
        return;
    }

    if value.is_none() && !children.contains_key(first) {
        return;
    }

    let child = children
        .entry(first.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    set_segments(child, rest, value);
    if is_absent(child) {
        children.remove(first);
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

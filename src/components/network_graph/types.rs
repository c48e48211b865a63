//! Graph document structures and port-based link resolution.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::GraphError;

/// Value of `entrypoint` that marks a highlighted node.
///
/// Compared as a string: the boolean `true` does not match.
pub const ENTRYPOINT_MARKER: &str = "true";

/// A peer in the network document.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Port the peer listens on. Links refer to nodes by this value.
	#[serde(deserialize_with = "deserialize_port")]
	pub port: String,
	/// Raw `entrypoint` flag, kept verbatim. See [`GraphNode::is_entrypoint`].
	#[serde(default)]
	pub entrypoint: Option<Value>,
}

impl GraphNode {
	/// True only when `entrypoint` is the literal string `"true"`.
	pub fn is_entrypoint(&self) -> bool {
		matches!(&self.entrypoint, Some(Value::String(s)) if s == ENTRYPOINT_MARKER)
	}
}

/// A friendship between two peers, by port.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source port.
	#[serde(deserialize_with = "deserialize_port")]
	pub source: String,
	/// Target port.
	#[serde(deserialize_with = "deserialize_port")]
	pub target: String,
}

/// The document as written to `graphData.json`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// Peers, in document order.
	pub nodes: Vec<GraphNode>,
	/// Friendships between peers.
	pub links: Vec<GraphLink>,
}

/// A link whose endpoints are indices into [`Graph::nodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
	/// Index of the source node.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
}

/// A document whose links have all been matched to nodes.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	/// Peers, in document order.
	pub nodes: Vec<GraphNode>,
	/// Links, in document order.
	pub links: Vec<ResolvedLink>,
}

impl Graph {
	/// Resolves every link endpoint to the node with the same port.
	///
	/// Fails on the first duplicate port or unmatched endpoint; no partial
	/// graph is returned.
	pub fn resolve(data: GraphData) -> Result<Self, GraphError> {
		let mut by_port: HashMap<&str, usize> = HashMap::with_capacity(data.nodes.len());
		for (i, node) in data.nodes.iter().enumerate() {
			if by_port.insert(node.port.as_str(), i).is_some() {
				return Err(GraphError::DuplicatePort(node.port.clone()));
			}
		}

		let lookup = |link: usize, port: &str| {
			by_port
				.get(port)
				.copied()
				.ok_or_else(|| GraphError::DanglingReference {
					link,
					port: port.to_string(),
				})
		};

		let links = data
			.links
			.iter()
			.enumerate()
			.map(|(i, link)| {
				Ok(ResolvedLink {
					source: lookup(i, &link.source)?,
					target: lookup(i, &link.target)?,
				})
			})
			.collect::<Result<Vec<_>, GraphError>>()?;

		Ok(Self {
			nodes: data.nodes,
			links,
		})
	}

	/// Number of links touching each node, indexed like `nodes`.
	pub fn degrees(&self) -> Vec<usize> {
		let mut degrees = vec![0; self.nodes.len()];
		for link in &self.links {
			degrees[link.source] += 1;
			degrees[link.target] += 1;
		}
		degrees
	}
}

/// Ports are written as bare integers by the map generator and as strings by
/// hand-edited documents. Both normalise to the decimal string.
fn deserialize_port<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Port {
		Text(String),
		Number(serde_json::Number),
	}

	Ok(match Port::deserialize(deserializer)? {
		Port::Text(s) => s,
		Port::Number(n) => n.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn data(json: &str) -> GraphData {
		serde_json::from_str(json).unwrap()
	}

	#[test]
	fn entrypoint_only_matches_literal_string() {
		let doc = data(
			r#"{"nodes":[
				{"port":"a","entrypoint":"true"},
				{"port":"b","entrypoint":true},
				{"port":"c","entrypoint":"false"},
				{"port":"d","entrypoint":"yes"},
				{"port":"e"}
			],"links":[]}"#,
		);
		let flags: Vec<bool> = doc.nodes.iter().map(GraphNode::is_entrypoint).collect();
		assert_eq!(flags, vec![true, false, false, false, false]);
	}

	#[test]
	fn numeric_ports_become_strings() {
		let doc = data(
			r#"{"nodes":[{"port":9090,"entrypoint":"true"},{"port":9091}],
			"links":[{"source":9090,"target":"9091"}]}"#,
		);
		assert_eq!(doc.nodes[0].port, "9090");
		assert_eq!(doc.links[0].source, "9090");

		let graph = Graph::resolve(doc).unwrap();
		assert_eq!(graph.links, vec![ResolvedLink { source: 0, target: 1 }]);
	}

	#[test]
	fn resolve_keeps_counts_and_indices() {
		let doc = data(
			r#"{"nodes":[{"port":"A"},{"port":"B"},{"port":"C"}],
			"links":[{"source":"A","target":"B"},{"source":"C","target":"A"}]}"#,
		);
		let graph = Graph::resolve(doc).unwrap();
		assert_eq!(graph.nodes.len(), 3);
		assert_eq!(graph.links.len(), 2);
		for link in &graph.links {
			assert!(link.source < graph.nodes.len());
			assert!(link.target < graph.nodes.len());
		}
		assert_eq!(graph.nodes[graph.links[1].source].port, "C");
		assert_eq!(graph.degrees(), vec![2, 1, 1]);
	}

	#[test]
	fn dangling_target_is_rejected() {
		let doc = data(
			r#"{"nodes":[{"port":"A"}],"links":[{"source":"A","target":"Z"}]}"#,
		);
		match Graph::resolve(doc) {
			Err(GraphError::DanglingReference { link, port }) => {
				assert_eq!(link, 0);
				assert_eq!(port, "Z");
			}
			other => panic!("expected dangling reference, got {other:?}"),
		}
	}

	#[test]
	fn duplicate_port_is_rejected() {
		let doc = data(r#"{"nodes":[{"port":"A"},{"port":"A"}],"links":[]}"#);
		assert!(matches!(
			Graph::resolve(doc),
			Err(GraphError::DuplicatePort(port)) if port == "A"
		));
	}
}

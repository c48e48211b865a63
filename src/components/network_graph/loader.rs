//! Fetching and parsing the graph document.

use log::info;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::error::GraphError;
use super::types::{Graph, GraphData};

/// Parses a graph document and resolves its links.
pub fn parse_graph(json_text: &str) -> Result<Graph, GraphError> {
	let data: GraphData = serde_json::from_str(json_text)?;
	let graph = Graph::resolve(data)?;
	info!(
		"essence-map: loaded {} nodes, {} links",
		graph.nodes.len(),
		graph.links.len()
	);
	Ok(graph)
}

/// Fetches the document at `url` (relative to the page) and parses it.
pub async fn load_graph(url: &str) -> Result<Graph, GraphError> {
	let text = fetch_text(url).await?;
	parse_graph(&text)
}

async fn fetch_text(url: &str) -> Result<String, GraphError> {
	let window = web_sys::window().ok_or_else(|| GraphError::Fetch("no window".into()))?;

	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| GraphError::Fetch(format!("{url}: {e:?}")))?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| GraphError::Fetch(format!("{url}: not a response")))?;

	if !response.ok() {
		return Err(GraphError::Fetch(format!(
			"{url}: HTTP {} {}",
			response.status(),
			response.status_text()
		)));
	}

	let body = response
		.text()
		.map_err(|e| GraphError::Fetch(format!("{url}: {e:?}")))?;
	let body = JsFuture::from(body)
		.await
		.map_err(|e| GraphError::Fetch(format!("{url}: {e:?}")))?;

	body.as_string()
		.ok_or_else(|| GraphError::Fetch(format!("{url}: body is not text")))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_sample_document_loads() {
		let graph = parse_graph(include_str!("../../../static/graphData.json")).unwrap();
		assert_eq!(graph.nodes.len(), 4);
		assert_eq!(graph.links.len(), 4);
		assert_eq!(graph.nodes[0].port, "9090");
		assert!(graph.nodes[0].is_entrypoint());
		assert!(graph.nodes[1..].iter().all(|n| !n.is_entrypoint()));
	}

	#[test]
	fn malformed_json_is_a_load_failure() {
		let err = parse_graph(r#"{"nodes":[{"port":"A"}"#).unwrap_err();
		assert!(matches!(err, GraphError::Parse(_)));
		assert!(err.is_load_failure());
	}

	#[test]
	fn missing_links_collection_is_a_load_failure() {
		let err = parse_graph(r#"{"nodes":[]}"#).unwrap_err();
		assert!(err.is_load_failure());
	}

	#[test]
	fn dangling_reference_is_not_a_load_failure() {
		let err = parse_graph(
			r#"{"nodes":[{"port":"A"}],"links":[{"source":"A","target":"Z"}]}"#,
		)
		.unwrap_err();
		assert!(!err.is_load_failure());
		assert_eq!(err.to_string(), r#"link 0 references unknown port "Z""#);
	}
}

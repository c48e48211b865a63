//! Errors raised while loading the graph document.

/// Failure to produce a [`Graph`](super::types::Graph) from the document.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	/// The request failed or returned a non-success status.
	#[error("failed to fetch graph document: {0}")]
	Fetch(String),

	/// The body was not a valid graph document.
	#[error("failed to parse graph document: {0}")]
	Parse(#[from] serde_json::Error),

	/// A link endpoint names a port no node has.
	#[error("link {link} references unknown port {port:?}")]
	DanglingReference {
		/// Index of the link in the document.
		link: usize,
		/// The unmatched port value.
		port: String,
	},

	/// Two nodes share a port, so links to it are ambiguous.
	#[error("port {0:?} is defined by more than one node")]
	DuplicatePort(String),
}

impl GraphError {
	/// Whether this is a transport or parse failure rather than a
	/// consistency error inside an otherwise valid document.
	pub fn is_load_failure(&self) -> bool {
		matches!(self, GraphError::Fetch(_) | GraphError::Parse(_))
	}
}

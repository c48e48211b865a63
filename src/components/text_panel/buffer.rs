//! Text held by the status panel, and its markdown-like line classes.

/// Panel contents plus an insertion cursor (a byte offset into `text`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
	text: String,
	cursor: usize,
}

impl TextBuffer {
	/// Full contents.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Byte offset where the next insert lands.
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Moves the cursor, clamped to the text and snapped back to a char
	/// boundary.
	pub fn set_cursor(&mut self, pos: usize) {
		let mut pos = pos.min(self.text.len());
		while !self.text.is_char_boundary(pos) {
			pos -= 1;
		}
		self.cursor = pos;
	}

	/// Inserts `message` at the cursor and leaves the cursor after it.
	pub fn insert(&mut self, message: &str) {
		self.text.insert_str(self.cursor, message);
		self.cursor += message.len();
	}

	/// Lines with their highlight class, in display order.
	pub fn highlighted_lines(&self) -> Vec<(LineKind, &str)> {
		self.text
			.split('\n')
			.map(|line| (LineKind::classify(line), line))
			.collect()
	}
}

/// Markdown-like highlight class of a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
	/// Starts with `#`.
	Heading,
	/// Starts with `- ` or `* `.
	ListItem,
	/// Starts with `>`.
	Quote,
	Plain,
}

impl LineKind {
	/// Class of `line`, ignoring leading whitespace.
	pub fn classify(line: &str) -> Self {
		let trimmed = line.trim_start();
		if trimmed.starts_with('#') {
			LineKind::Heading
		} else if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
			LineKind::ListItem
		} else if trimmed.starts_with('>') {
			LineKind::Quote
		} else {
			LineKind::Plain
		}
	}

	/// Class set on the line's `<span>`.
	pub fn css_class(self) -> &'static str {
		match self {
			LineKind::Heading => "md-heading",
			LineKind::ListItem => "md-list",
			LineKind::Quote => "md-quote",
			LineKind::Plain => "md-text",
		}
	}
}

//! # Working-memory Document
//!
//! The live status file modeled as a preamble plus ordered `## ` sections,
//! so a section can be replaced or appended without textual regex surgery.
//! Untouched content renders back byte-for-byte, except that a trailing
//! newline is always ensured.

use errors::DocumentError;
use std::path::Path;

const SECTION_MARKER: &str = "## ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text without the marker.
    pub heading: String,
    /// Lines between this heading and the next one.
    pub lines: Vec<String>
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingMemoryDocument {
    preamble: Vec<String>,
    sections: Vec<Section>
}

impl WorkingMemoryDocument {
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::default();
        if text.is_empty() {
            return doc;
        }
        let text = text.strip_suffix('\n').unwrap_or(text);

        for line in text.split('\n') {
            if let Some(heading) = line.strip_prefix(SECTION_MARKER) {
                doc.sections.push(Section {
                    heading: heading.to_string(),
                    lines: Vec::new()
                });
                continue;
            }
            match doc.sections.last_mut() {
                Some(section) => section.lines.push(line.to_string()),
                None => doc.preamble.push(line.to_string())
            }
        }
        doc
    }

    /// Read the document; an absent file is an empty document.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(DocumentError::ReadFailed {
                path: path.to_path_buf(),
                reason: e.to_string()
            })
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.render()).map_err(|e| DocumentError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string()
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| heading_matches(&s.heading, name))
    }

    /// Replace the body of the first section named `name` (case-insensitive,
    /// trimmed), or append it at the end. The body is followed by one blank
    /// line.
    pub fn set_section(&mut self, name: &str, body: &str) {
        let mut lines: Vec<String> = body.split('\n').map(str::to_string).collect();
        lines.push(String::new());

        if let Some(section) = self
            .sections
            .iter_mut()
            .find(|s| heading_matches(&s.heading, name))
        {
            section.heading = name.to_string();
            section.lines = lines;
            return;
        }

        self.ensure_trailing_blank();
        self.sections.push(Section {
            heading: name.to_string(),
            lines
        });
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        for section in &self.sections {
            out.push_str(SECTION_MARKER);
            out.push_str(&section.heading);
            out.push('\n');
            for line in &section.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    fn ensure_trailing_blank(&mut self) {
        let last = match self.sections.last_mut() {
            Some(section) if section.lines.is_empty() => return,
            Some(section) => &mut section.lines,
            None if self.preamble.is_empty() => return,
            None => &mut self.preamble
        };
        if last.last().is_some_and(|l| !l.trim().is_empty()) {
            last.push(String::new());
        }
    }
}

fn heading_matches(heading: &str, name: &str) -> bool {
    heading.trim().to_lowercase() == name.trim().to_lowercase()
}

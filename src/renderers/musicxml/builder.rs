// Indenting XML text writer for MusicXML output

use std::fmt::Display;

/// Appends elements to a string buffer, two spaces per nesting level
pub struct XmlWriter {
    buffer: String,
    depth: usize,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
        }
    }

    pub fn declaration(&mut self) {
        self.buffer
            .push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    }

    pub fn doctype(&mut self, root: &str, public_id: &str, system_id: &str) {
        self.buffer.push_str(&format!(
            "<!DOCTYPE {} PUBLIC \"{}\" \"{}\">\n",
            root, public_id, system_id
        ));
    }

    /// Open an element that will have children
    pub fn open(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.indent();
        self.buffer.push('<');
        self.buffer.push_str(name);
        self.push_attributes(attributes);
        self.buffer.push_str(">\n");
        self.depth += 1;
    }

    pub fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buffer.push_str(&format!("</{}>\n", name));
    }

    /// Element with text content only
    pub fn text_element(&mut self, name: &str, text: impl Display) {
        self.attributed_text_element(name, &[], text);
    }

    pub fn attributed_text_element(&mut self, name: &str, attributes: &[(&str, &str)], text: impl Display) {
        self.indent();
        self.buffer.push('<');
        self.buffer.push_str(name);
        self.push_attributes(attributes);
        self.buffer.push_str(&format!(
            ">{}</{}>\n",
            xml_escape(&text.to_string()),
            name
        ));
    }

    /// Self-closing element
    pub fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.indent();
        self.buffer.push('<');
        self.buffer.push_str(name);
        self.push_attributes(attributes);
        self.buffer.push_str("/>\n");
    }

    pub fn finalize(self) -> String {
        self.buffer
    }

    fn push_attributes(&mut self, attributes: &[(&str, &str)]) {
        for (key, value) in attributes {
            self.buffer
                .push_str(&format!(" {}=\"{}\"", key, xml_escape(value)));
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str("  ");
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape XML special characters
pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

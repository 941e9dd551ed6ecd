//! Minimal indented XML writer used by the markup and spreadsheet renderers.

/// Streaming writer that keeps track of open elements and indentation.
pub(crate) struct XmlWriter {
    buf: String,
    open: Vec<&'static str>,
}

impl XmlWriter {
    /// Start a document with the UTF-8 XML declaration.
    pub(crate) fn new() -> Self {
        let mut buf = String::with_capacity(4096);
        buf.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        Self {
            buf,
            open: Vec::new(),
        }
    }

    /// Processing instruction on its own line (before the root element).
    pub(crate) fn instruction(&mut self, target: &str, content: &str) {
        self.buf.push_str(&format!("<?{target} {content}?>\n"));
    }

    pub(crate) fn open(&mut self, name: &'static str, attrs: &[(&str, &str)]) {
        self.indent();
        self.start_tag(name, attrs);
        self.buf.push_str(">\n");
        self.open.push(name);
    }

    pub(crate) fn close(&mut self) {
        if let Some(name) = self.open.pop() {
            self.indent();
            self.buf.push_str(&format!("</{name}>\n"));
        }
    }

    /// `<name attrs>text</name>` on one line; `<name attrs/>` when text is empty.
    pub(crate) fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) {
        self.indent();
        self.start_tag(name, attrs);
        if text.is_empty() {
            self.buf.push_str("/>\n");
        } else {
            self.buf.push('>');
            self.buf.push_str(&escape(text));
            self.buf.push_str(&format!("</{name}>\n"));
        }
    }

    /// Close anything still open and return the document.
    pub(crate) fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.close();
        }
        self.buf
    }

    fn start_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(name);
        for (key, value) in attrs {
            self.buf.push_str(&format!(" {key}=\"{}\"", escape(value)));
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.open.len() {
            self.buf.push_str("  ");
        }
    }
}

/// Escape XML special characters.
///
/// DEL and C1 controls become character references. Characters XML 1.0
/// cannot carry at all (other C0 controls, U+FFFE, U+FFFF) are dropped; line
/// items never contain them, only free-form project metadata can.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            '\u{7f}'..='\u{9f}' => out.push_str(&format!("&#x{:X};", c as u32)),
            c if c.is_control() || c == '\u{fffe}' || c == '\u{ffff}' => {}
            c => out.push(c),
        }
    }
    out
}

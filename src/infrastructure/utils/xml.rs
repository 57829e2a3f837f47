//! Minimal string-building XML writer used by the content export.
//!
//! The document shape is fixed, so there is no DOM here: elements are
//! appended in order with two-space indentation.

const INDENT: &str = "  ";
const CDATA_END: &str = "]]>";

/// Characters XML 1.0 allows in a document at all.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escapes the five XML special characters and `\r`; characters XML 1.0
/// cannot carry are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars().filter(|c| is_xml_char(*c)) {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\r' => escaped.push_str("&#13;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wraps raw text in a CDATA section.
///
/// A literal `]]>` would terminate the section early, so it is split across
/// two adjacent sections. A parser concatenates them back to the original.
/// Characters XML 1.0 cannot carry are dropped.
pub fn cdata(raw: &str) -> String {
    let raw: String = raw.chars().filter(|c| is_xml_char(*c)).collect();
    format!("<![CDATA[{}]]>", raw.replace(CDATA_END, "]]]]><![CDATA[>"))
}

pub struct XmlWriter {
    buf: String,
    depth: usize,
}

impl XmlWriter {
    pub fn new() -> Self {
        XmlWriter {
            buf: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }

    pub fn open(&mut self, name: &str) {
        self.open_with_attrs(name, &[]);
    }

    pub fn open_with_attrs(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.push_attrs(attrs);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    pub fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
    }

    /// `<name>escaped text</name>` on one line.
    pub fn text_element(&mut self, name: &str, value: &str) {
        self.raw_element(name, &[], &escape_xml(value));
    }

    /// `<name>` wrapping an unescaped CDATA section.
    pub fn cdata_element(&mut self, name: &str, raw: &str) {
        self.raw_element(name, &[], &cdata(raw));
    }

    fn raw_element(&mut self, name: &str, attrs: &[(&str, &str)], body: &str) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.push_attrs(attrs);
        self.buf.push('>');
        self.buf.push_str(body);
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
    }

    fn push_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (key, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(key);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape_xml(value));
            self.buf.push('"');
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_xml(r#"Test & "Special" <Chars> it's"#),
            "Test &amp; &quot;Special&quot; &lt;Chars&gt; it&apos;s"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_xml("Zażółć gęślą jaźń"), "Zażółć gęślą jaźń");
        assert_eq!(escape_xml(""), "");
    }

    #[test]
    fn control_characters_never_reach_the_document() {
        assert_eq!(escape_xml("a\u{0}b\u{8}c\u{B}d\u{C}e\u{1F}f"), "abcdef");
        assert_eq!(escape_xml("tab\tnew\nline"), "tab\tnew\nline");
        assert_eq!(escape_xml("windows\r\n"), "windows&#13;\n");
        assert_eq!(escape_xml("\u{FFFE}ok\u{FFFF}"), "ok");
        assert_eq!(cdata("{\"t\":\"a\u{1}b\"}"), "<![CDATA[{\"t\":\"ab\"}]]>");
    }

    #[test]
    fn cdata_splits_terminator() {
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
        assert_eq!(cdata("{\"html\":\"<p>x</p>\"}"), "<![CDATA[{\"html\":\"<p>x</p>\"}]]>");
    }

    #[test]
    fn writer_nests_and_indents() {
        let mut w = XmlWriter::new();
        w.open("website");
        w.open_with_attrs("category", &[("id", "a&b")]);
        w.text_element("pl", "Wszystkie");
        w.close("category");
        w.close("website");

        let xml = w.finish();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <website>\n  <category id=\"a&amp;b\">\n    <pl>Wszystkie</pl>\n  </category>\n</website>\n"
        );
    }
}

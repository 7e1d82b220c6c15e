use anyhow::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(language)?;
        Ok(Self { parser })
    }

    pub fn parse_source(&mut self, source: &[u8], file_path: &Path) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("Failed to parse file: {}", file_path.display()))
    }

    /// Reads raw bytes so sources in legacy encodings still parse.
    pub fn read_source(&self, file_path: &Path) -> Result<Vec<u8>> {
        let file = File::open(file_path)?;
        let metadata = file.metadata()?;
        let file_size = metadata.len() as usize;

        // Use buffered reader with optimal buffer size
        let mut reader =
            BufReader::with_capacity(if file_size < 8192 { file_size.max(1) } else { 8192 }, file);

        let mut content = Vec::with_capacity(file_size);
        reader.read_to_end(&mut content)?;
        Ok(content)
    }
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

/// First descendant of `kind` in pre-order, `node` included.
pub fn find_descendant_by_kind<'a>(node: &TSNode<'a>, kind: &str) -> Option<TSNode<'a>> {
    if node.kind() == kind {
        return Some(*node);
    }
    let mut cursor = node.walk();
    let children: Vec<TSNode<'a>> = node.children(&mut cursor).collect();
    children
        .iter()
        .find_map(|child| find_descendant_by_kind(child, kind))
}

/// Collapses whitespace in a type or name spelling and drops it next to
/// punctuation, so `const char * *` and `const char**` spell the same.
pub fn normalize_spelling(text: &str) -> String {
    const TIGHT: [char; 10] = ['*', '&', '<', '>', ',', '(', ')', '[', ']', ':'];

    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        let after_tight = out.chars().last().is_some_and(|last| TIGHT.contains(&last));
        if pending_space && !TIGHT.contains(&c) && !after_tight {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

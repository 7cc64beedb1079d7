use std::fs;
use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};

use crate::types::{MutationData, MutationRecord, ParseError};

const MUTATION_ELEMENT: &str = "mutation";
const STATUS_ATTRIBUTE: &str = "status";

/// Read and parse one report file
pub fn parse_report(path: &Path) -> Result<MutationData, ParseError> {
    let text = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report_str(&text).map_err(|source| ParseError::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect every `<mutation>` element below the document root, at any depth
pub fn parse_report_str(text: &str) -> Result<MutationData, roxmltree::Error> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(text, options)?;

    let records = doc
        .root_element()
        .descendants()
        .skip(1)
        .filter(is_mutation)
        .map(|node| MutationRecord {
            status: node.attribute(STATUS_ATTRIBUTE).map(str::to_string),
        })
        .collect();
    Ok(MutationData { records })
}

fn is_mutation(node: &Node) -> bool {
    node.is_element()
        && node.tag_name().name() == MUTATION_ELEMENT
        && node.tag_name().namespace().is_none()
}

//! Decoding of Rejseplanen XML documents into records.

use super::{ProviderError, Record};

/// Decode an upstream document into one record per child of its root.
///
/// An `error` attribute on the root element is how Rejseplanen reports a
/// failed query, so it becomes [`ProviderError::Upstream`].
pub fn parse_records(body: &str) -> Result<Vec<Record>, ProviderError> {
    let doc = roxmltree::Document::parse(body).map_err(|e| ProviderError::Xml(e.to_string()))?;
    let root = doc.root_element();

    if let Some(message) = root.attribute("error") {
        return Err(ProviderError::Upstream(message.to_string()));
    }

    Ok(root
        .children()
        .filter(|node| node.is_element())
        .map(|node| {
            node.attributes().fold(
                Record::new(node.tag_name().name()),
                |record, attr| record.with_field(attr.name(), attr.value()),
            )
        })
        .collect())
}

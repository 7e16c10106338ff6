//! Minimal DrawingML text bodies (`c:rich`, `c:txPr`).
//!
//! Only what data labels need: the default subtree and the path down to the
//! default run properties of the first paragraph.

use crate::error::Result;
use crate::schema::schema;
use crate::xml::{NodeId, XmlPart};

/// Build a detached text body with one empty paragraph:
///
/// ```text
/// <tag><a:bodyPr/><a:lstStyle/><a:p><a:pPr><a:defRPr/></a:pPr></a:p></tag>
/// ```
pub fn new_text_body(part: &mut XmlPart, tag: &str) -> Result<NodeId> {
    let body = part.create_element(tag);
    let body_pr = part.create_element("a:bodyPr");
    let lst_style = part.create_element("a:lstStyle");
    let p = part.create_element("a:p");
    let p_pr = part.create_element("a:pPr");
    let def_rpr = part.create_element("a:defRPr");

    part.append(p_pr, def_rpr)?;
    part.append(p, p_pr)?;
    part.append(body, body_pr)?;
    part.append(body, lst_style)?;
    part.append(body, p)?;
    Ok(body)
}

/// Default `<c:rich>` subtree.
pub fn new_rich(part: &mut XmlPart) -> Result<NodeId> {
    new_text_body(part, "c:rich")
}

/// Default `<c:txPr>` subtree.
pub fn new_text_properties(part: &mut XmlPart) -> Result<NodeId> {
    new_text_body(part, "c:txPr")
}

/// Return the `<a:defRPr>` of the first paragraph of a text body.
///
/// The paragraph, its `<a:pPr>` and the `<a:defRPr>` itself are created
/// in sequence when missing.
pub fn def_run_properties(part: &mut XmlPart, body: NodeId) -> Result<NodeId> {
    let registry = schema();
    let body_tag = part.tag(body).to_string();

    let paragraphs = registry.repeated(&body_tag, "a:p")?;
    let p = match paragraphs.list(part, body)?.first() {
        Some(p) => *p,
        None => paragraphs.add_last(part, body)?,
    };

    let p_pr = registry.optional("a:p", "a:pPr")?.get_or_create(part, p)?;
    registry.optional("a:pPr", "a:defRPr")?.get_or_create(part, p_pr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OxmlError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_text_body_shape() {
        let mut part = XmlPart::new("c:dLbls");
        let body = new_text_properties(&mut part).unwrap();

        assert_eq!(part.tag(body), "c:txPr");
        assert_eq!(part.child_tags(body), vec!["a:bodyPr", "a:lstStyle", "a:p"]);
        let p = part.first_child(body, "a:p").unwrap();
        let p_pr = part.first_child(p, "a:pPr").unwrap();
        assert_eq!(part.child_tags(p_pr), vec!["a:defRPr"]);
    }

    #[test]
    fn test_def_run_properties_returns_existing() {
        let mut part = XmlPart::new("c:dLbls");
        let body = new_rich(&mut part).unwrap();
        let p = part.first_child(body, "a:p").unwrap();
        let p_pr = part.first_child(p, "a:pPr").unwrap();
        let existing = part.first_child(p_pr, "a:defRPr").unwrap();

        assert_eq!(def_run_properties(&mut part, body).unwrap(), existing);
    }

    #[test]
    fn test_def_run_properties_builds_missing_chain() {
        let mut part = XmlPart::new("c:txPr");
        let body = part.root();
        let body_pr = part.create_element("a:bodyPr");
        part.append(body, body_pr).unwrap();

        let def_rpr = def_run_properties(&mut part, body).unwrap();

        assert_eq!(part.tag(def_rpr), "a:defRPr");
        assert_eq!(part.child_tags(body), vec!["a:bodyPr", "a:p"]);
        let p = part.first_child(body, "a:p").unwrap();
        assert_eq!(part.child_tags(p), vec!["a:pPr"]);
    }

    #[test]
    fn test_def_run_properties_puts_ppr_before_runs() {
        let mut part = XmlPart::new("c:rich");
        let body = part.root();
        let p = part.create_element("a:p");
        let run = part.create_element("a:r");
        part.append(p, run).unwrap();
        part.append(body, p).unwrap();

        def_run_properties(&mut part, body).unwrap();

        assert_eq!(part.child_tags(p), vec!["a:pPr", "a:r"]);
    }

    #[test]
    fn test_def_run_properties_rejects_non_text_body() {
        let mut part = XmlPart::new("c:dLbl");
        let root = part.root();
        let err = def_run_properties(&mut part, root).unwrap_err();
        assert!(matches!(err, OxmlError::SchemaViolation { .. }));
    }
}

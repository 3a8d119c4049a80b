//! Selector-based classification of login form elements.
//!
//! Two rule categories run in a fixed order over the same document: password
//! rules first, then credential (username/email) rules. Ordering matters for
//! the human-readable grouping of results, not for correctness. A node is
//! identified by its `ego_tree::NodeId` in the parsed tree, so an element
//! matched by several selectors — or by both a password and a credential
//! rule — is collected exactly once, under the earliest rule that hit it.

use crate::error::{ScanError, ScanResult};
use crate::parse::ParsedDocument;
use ego_tree::NodeId;
use scraper::Selector;
use serde::Serialize;
use std::collections::HashSet;

/// High-confidence password input selectors.
const PASSWORD_SELECTORS: &[&str] = &[
    r#"input[type="password"]"#,
    r#"input[autocomplete="current-password"]"#,
];

/// Username/email input selectors. Attribute substring matches are
/// case-sensitive, as in CSS.
const CREDENTIAL_SELECTORS: &[&str] = &[
    r#"input[name*="user"]"#,
    r#"input[name*="email"]"#,
    r#"input[name*="username"]"#,
    r#"input[id*="user"]"#,
    r#"input[id*="email"]"#,
    r#"input[id*="username"]"#,
    r#"input[autocomplete="username"]"#,
    r#"input[autocomplete="email"]"#,
];

/// Category of a detected login input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// A password-type input.
    Password,
    /// A username/email-type input.
    Credential,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Password => write!(f, "password"),
            FieldKind::Credential => write!(f, "credential"),
        }
    }
}

/// A detected login input: its category plus the raw serialized markup.
/// Never mutated after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginElement {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(rename = "html")]
    pub markup: String,
}

/// Run the ordered rule set over a parsed document.
///
/// Returns all password matches first (selector-list order, then document
/// order within a selector), followed by all credential matches with the
/// same ordering discipline. Fails with [`ScanError::NoLoginElements`] when
/// the combined sequence is empty.
pub fn classify(doc: &ParsedDocument) -> ScanResult<Vec<LoginElement>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut found = Vec::new();

    collect(doc, PASSWORD_SELECTORS, FieldKind::Password, &mut seen, &mut found);
    collect(doc, CREDENTIAL_SELECTORS, FieldKind::Credential, &mut seen, &mut found);

    if found.is_empty() {
        return Err(ScanError::NoLoginElements);
    }
    Ok(found)
}

fn collect(
    doc: &ParsedDocument,
    selectors: &[&str],
    kind: FieldKind,
    seen: &mut HashSet<NodeId>,
    out: &mut Vec<LoginElement>,
) {
    for raw in selectors {
        let sel = Selector::parse(raw).expect("selector is valid");
        for el in doc.html().select(&sel) {
            if seen.insert(el.id()) {
                out.push(LoginElement {
                    kind,
                    markup: el.html(),
                });
            }
        }
    }
}

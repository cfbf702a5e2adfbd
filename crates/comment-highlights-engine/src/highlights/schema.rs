use std::borrow::Cow;

use crate::model::Mark;

/// Mark type used for comment highlights.
pub const HIGHLIGHT_MARK: &str = "highlight";

/// Attribute holding the application-assigned highlight id.
pub const HIGHLIGHT_ID_ATTR: &str = "highlightId";

/// Names the mark type and id attribute that identify a comment highlight.
///
/// Marks of the right type whose id attribute is missing or not a string are
/// malformed and never match any id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSchema {
    pub mark_type: Cow<'static, str>,
    pub id_attribute: Cow<'static, str>,
}

impl HighlightSchema {
    pub const DEFAULT: HighlightSchema = HighlightSchema {
        mark_type: Cow::Borrowed(HIGHLIGHT_MARK),
        id_attribute: Cow::Borrowed(HIGHLIGHT_ID_ATTR),
    };

    pub fn new(mark_type: impl Into<String>, id_attribute: impl Into<String>) -> Self {
        Self {
            mark_type: Cow::Owned(mark_type.into()),
            id_attribute: Cow::Owned(id_attribute.into()),
        }
    }

    /// The highlight id carried by `mark`, if it is a well-formed highlight.
    pub fn highlight_id<'m>(&self, mark: &'m Mark) -> Option<&'m str> {
        if !mark.is_type(&self.mark_type) {
            return None;
        }
        mark.attr_str(&self.id_attribute)
    }

    pub fn is_highlight(&self, mark: &Mark, highlight_id: &str) -> bool {
        self.highlight_id(mark) == Some(highlight_id)
    }

    /// Builds the mark an "apply highlight" operation would attach.
    pub fn mark(&self, highlight_id: &str) -> Mark {
        Mark::new(self.mark_type.as_ref()).with_attr(self.id_attribute.as_ref(), highlight_id)
    }
}

impl Default for HighlightSchema {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//! Markup stripping char filter.
//!
//! Removes markup elements from document text, including the bodies of
//! `<script>` and `<style>` elements, decodes character references and turns
//! every embedded line break into a single space. The output is never longer
//! than the input.

use regex::{Captures, Regex};

use super::CharFilter;
use crate::error::{KhabarError, Result};

const EMBEDDED_CODE: &str = r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>";
const COMMENT: &str = r"(?s)<!--.*?-->";
const TAG: &str = r"</?[A-Za-z!?][^>]*>";
const ENTITY: &str = r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]{2,8});";
const LINE_BREAK: &str = r"\r\n|\r|\n";

/// A char filter that strips markup and flattens line breaks.
#[derive(Clone, Debug)]
pub struct MarkupCharFilter {
    embedded_code: Regex,
    comment: Regex,
    tag: Regex,
    entity: Regex,
    line_break: Regex,
}

impl MarkupCharFilter {
    /// Create a new markup char filter.
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| KhabarError::analysis(format!("invalid markup pattern: {e}")))
        };

        Ok(MarkupCharFilter {
            embedded_code: compile(EMBEDDED_CODE)?,
            comment: compile(COMMENT)?,
            tag: compile(TAG)?,
            entity: compile(ENTITY)?,
            line_break: compile(LINE_BREAK)?,
        })
    }

    fn decode_entity(caps: &Captures<'_>) -> String {
        let body = &caps[1];
        let decoded = if let Some(hex) = body
            .strip_prefix("#x")
            .or_else(|| body.strip_prefix("#X"))
        {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = body.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            match body {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                "zwnj" => Some('\u{200C}'),
                "zwj" => Some('\u{200D}'),
                _ => None,
            }
        };

        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    }
}

impl CharFilter for MarkupCharFilter {
    fn filter(&self, input: &str) -> String {
        let text = self.embedded_code.replace_all(input, "");
        let text = self.comment.replace_all(&text, "");
        let text = self.tag.replace_all(&text, "");
        let text = self.entity.replace_all(&text, Self::decode_entity);
        self.line_break.replace_all(&text, " ").into_owned()
    }

    fn name(&self) -> &'static str {
        "markup"
    }
}

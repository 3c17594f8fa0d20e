/// One item produced by the stylesheet tokenizer.
///
/// Tokens borrow from the stylesheet text they were produced from and keep
/// its source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetToken<'a> {
    /// Start of a new `@font-face` block.
    BlockBoundary,
    /// A single `property: value;` pair, exactly as written in the source.
    Declaration {
        property: &'a str,
        raw_value: &'a str,
    },
}

impl<'a> StylesheetToken<'a> {
    pub fn declaration(property: &'a str, raw_value: &'a str) -> Self {
        StylesheetToken::Declaration {
            property,
            raw_value,
        }
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, StylesheetToken::BlockBoundary)
    }
}

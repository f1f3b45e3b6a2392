//! Selector list normalization used when two selector groups are merged.

/// Byte cursor that rewrites one selector into its reduced form.
struct SelectorReducer<'sel> {
    /// Underlying bytes of the trimmed selector.
    input_bytes: &'sel [u8],
    /// Current cursor index into `input_bytes`.
    index: usize,
    /// Nesting depth of `[...]` and `(...)`; combinators only count at depth 0.
    depth: usize,
    /// Quote byte of the string being copied, if any.
    quote: Option<u8>,
    out: Vec<u8>,
}

impl<'sel> SelectorReducer<'sel> {
    #[inline]
    fn new(selector: &'sel str) -> Self {
        let input_bytes = selector.trim().as_bytes();
        Self {
            input_bytes,
            index: 0,
            depth: 0,
            quote: None,
            out: Vec::with_capacity(input_bytes.len()),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input_bytes.get(self.index).copied()
    }

    #[inline]
    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.index = self.index.saturating_add(1);
        }
    }

    /// Remove spaces already emitted before a combinator.
    #[inline]
    fn trim_out_end(&mut self) {
        while self.out.last().is_some_and(|byte| *byte == b' ') {
            self.out.pop();
        }
    }

    /// Copy one byte of a quoted string, including escapes, verbatim.
    fn copy_quoted(&mut self, byte: u8, quote: u8) {
        self.out.push(byte);
        if byte == b'\\' {
            if let Some(escaped) = self.peek() {
                self.out.push(escaped);
                self.index = self.index.saturating_add(1);
            }
        } else if byte == quote {
            self.quote = None;
        }
    }

    fn reduce(mut self) -> String {
        while let Some(byte) = self.peek() {
            self.index = self.index.saturating_add(1);
            if let Some(quote) = self.quote {
                self.copy_quoted(byte, quote);
                continue;
            }
            match byte {
                b'"' | b'\'' => {
                    self.quote = Some(byte);
                    self.out.push(byte);
                }
                b'[' | b'(' => {
                    self.depth = self.depth.saturating_add(1);
                    self.out.push(byte);
                }
                b']' | b')' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.out.push(byte);
                }
                b'>' | b'+' | b'~' if self.depth == 0 => {
                    self.trim_out_end();
                    self.out.push(byte);
                    self.skip_spaces();
                }
                b'*' if self.depth == 0
                    && self
                        .peek()
                        .is_some_and(|next| matches!(next, b':' | b'#' | b'.' | b'[')) => {}
                _ if byte.is_ascii_whitespace() => {
                    if self.depth > 0 {
                        self.out.push(byte);
                    } else if self.out.last().is_some_and(|last| *last != b' ') {
                        self.out.push(b' ');
                    }
                }
                _ => self.out.push(byte),
            }
        }
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

/// Reduce a single selector: trim, tighten combinators, drop redundant `*`.
/// Quoted strings and bracketed content are left as written.
#[inline]
pub fn reduce_selector(selector: &str) -> String {
    SelectorReducer::new(selector).reduce()
}

/// Normalize a merged selector list: reduce each selector, drop empties, then
/// sort and deduplicate.
pub fn clean_selectors<I, S>(selectors: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut plain: Vec<String> = selectors
        .into_iter()
        .map(|selector| reduce_selector(selector.as_ref()))
        .filter(|selector| !selector.is_empty())
        .collect();
    plain.sort();
    plain.dedup();
    plain
}
